//! Compiled contract artifacts.

use std::path::Path;

use alloy_primitives::Bytes;
use anyhow::{Context, Result};
use serde::Deserialize;

/// On-disk artifact layout produced by the compilation step. Fields the
/// harness does not consume (abi, link references, ...) are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: String,
    #[serde(default)]
    source_name: Option<String>,
    bytecode: String,
}

/// A compiled contract artifact resolved by name.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// The contract name recorded in the artifact.
    pub contract_name: String,
    /// Source file the contract was compiled from, when recorded.
    pub source_name: Option<String>,
    /// Creation bytecode, without constructor arguments.
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Resolve the artifact for `name` from `artifacts_dir`.
    ///
    /// Expects `<artifacts_dir>/<name>.json` as written by the compilation
    /// step. A missing file means the contract has not been compiled.
    pub fn resolve(artifacts_dir: &Path, name: &str) -> Result<Self> {
        let path = artifacts_dir.join(format!("{}.json", name));

        let content = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "Failed to read artifact for contract {} (expected at {})",
                name,
                path.display()
            )
        })?;

        Self::from_json(&content)
            .with_context(|| format!("Failed to parse contract artifact {}", path.display()))
    }

    /// Parse an artifact from its JSON representation.
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: RawArtifact =
            serde_json::from_str(content).context("Artifact is not valid JSON")?;

        let bytecode = hex::decode(raw.bytecode.trim_start_matches("0x"))
            .context("Artifact bytecode is not valid hex")?;

        if bytecode.is_empty() {
            anyhow::bail!(
                "Contract {} has no creation bytecode (abstract contract or interface?)",
                raw.contract_name
            );
        }

        Ok(Self {
            contract_name: raw.contract_name,
            source_name: raw.source_name,
            bytecode: bytecode.into(),
        })
    }
}
