//! Persistent records of completed deployments.

use std::path::Path;

use alloy_primitives::{Address, B256};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::DeployedContract;

/// Record of a successful deployment, stored alongside the project so the
/// deployed address survives the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// The deployed contract name.
    pub contract: String,
    /// Network the contract was deployed to.
    pub network: String,
    /// Chain ID of that network.
    pub chain_id: u64,
    /// The deployed contract address.
    pub address: Address,
    /// Hash of the deployment transaction.
    pub transaction_hash: B256,
    /// Block the deployment was mined in.
    pub block_number: u64,
    /// Unix timestamp when the deployment completed.
    pub deployed_at: u64,
    /// Harness version that created this deployment.
    pub harness_version: String,
}

impl DeploymentRecord {
    /// Create a record for a completed deployment.
    ///
    /// The timestamp is set to the current system time, and the
    /// harness_version from the CARGO_PKG_VERSION environment variable.
    pub fn new(
        contract: impl Into<String>,
        network: impl Into<String>,
        chain_id: u64,
        deployed: &DeployedContract,
    ) -> Self {
        Self {
            contract: contract.into(),
            network: network.into(),
            chain_id,
            address: deployed.address,
            transaction_hash: deployed.transaction_hash,
            block_number: deployed.block_number,
            deployed_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("System time should be after Unix epoch")
                .as_secs(),
            harness_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Save this record to a file as formatted JSON.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize deployment record")?;

        std::fs::write(path, json).context(format!(
            "Failed to write deployment record to {}",
            path.display()
        ))?;

        tracing::info!(path = %path.display(), "Deployment record saved");
        Ok(())
    }

    /// Load a record from a file.
    ///
    /// Returns an error if the file doesn't exist, is malformed, or cannot
    /// be read.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Deployment record does not exist: {}", path.display());
        }

        let content = std::fs::read_to_string(path).context(format!(
            "Failed to read deployment record from {}",
            path.display()
        ))?;

        let record: Self =
            serde_json::from_str(&content).context("Failed to parse deployment record JSON")?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};
    use tempdir::TempDir;

    fn deployed_contract() -> DeployedContract {
        DeployedContract {
            address: address!("b60e8dd61c5d32be8058bb8eb970870f07233155"),
            transaction_hash: b256!(
                "88df016429689c079f3b2f6ad39fa052532c56795b733da78a91ebe6a713944b"
            ),
            block_number: 10_099_292,
        }
    }

    #[test]
    fn test_new_record_fields() {
        let record = DeploymentRecord::new("CryptoDevs", "goerli", 5, &deployed_contract());

        assert_eq!(record.contract, "CryptoDevs");
        assert_eq!(record.network, "goerli");
        assert_eq!(record.chain_id, 5);
        assert_eq!(record.address, deployed_contract().address);
        assert_eq!(record.block_number, 10_099_292);
        assert!(record.deployed_at > 0);
        assert!(!record.harness_version.is_empty());
    }

    #[test]
    fn test_record_save_and_load() {
        let temp_dir = TempDir::new("cryptodevs-test").expect("Failed to create temp dir");
        let record_path = temp_dir.path().join("CryptoDevs.json");

        let original = DeploymentRecord::new("CryptoDevs", "goerli", 5, &deployed_contract());

        original
            .save_to_file(&record_path)
            .expect("Failed to save record");

        let loaded =
            DeploymentRecord::load_from_file(&record_path).expect("Failed to load record");

        assert_eq!(original, loaded, "Loaded record should match original");
    }

    #[test]
    fn test_record_load_missing_file() {
        let temp_dir = TempDir::new("cryptodevs-test").expect("Failed to create temp dir");
        let record_path = temp_dir.path().join("nonexistent.json");

        let result = DeploymentRecord::load_from_file(&record_path);
        assert!(result.is_err(), "Loading missing file should return error");
    }

    #[test]
    fn test_record_load_corrupted_file() {
        let temp_dir = TempDir::new("cryptodevs-test").expect("Failed to create temp dir");
        let record_path = temp_dir.path().join("CryptoDevs.json");

        std::fs::write(&record_path, "{ invalid json }").expect("Failed to write corrupted file");

        let result = DeploymentRecord::load_from_file(&record_path);
        assert!(result.is_err(), "Loading corrupted file should return error");
    }
}
