//! Network profiles binding an RPC endpoint to signing credentials.

use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use url::Url;

/// The network name the harness deploys to.
pub const GOERLI: &str = "goerli";

/// Chain ID of the Goerli testnet.
pub const GOERLI_CHAIN_ID: u64 = 5;

/// Target compiler version the contract artifacts are built with.
pub const SOLIDITY_VERSION: &str = "0.8.17";

/// Environment variable holding the JSON-RPC endpoint URL.
pub const RPC_URL_ENV: &str = "QUICKNODE_HTTP_URL";

/// Environment variable holding the hex-encoded deployer private key.
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Named bundle of RPC endpoint + signing credentials addressing one
/// deployment target. Read-only after construction.
#[derive(Debug, Clone)]
pub struct NetworkProfile {
    /// The network name (e.g. "goerli").
    pub name: String,
    /// Chain ID the endpoint is expected to serve, if known.
    pub chain_id: Option<u64>,
    /// The JSON-RPC endpoint URL.
    pub rpc_url: Url,
    /// Signing keys, primary first. Never empty.
    signers: Vec<PrivateKeySigner>,
}

impl NetworkProfile {
    /// Create a profile from an endpoint URL and a list of hex private keys.
    ///
    /// The key list must be non-empty and every key well-formed; malformed
    /// credentials fail here, before any network interaction.
    pub fn new(
        name: impl Into<String>,
        chain_id: Option<u64>,
        rpc_url: &str,
        keys: &[String],
    ) -> Result<Self> {
        let name = name.into();

        let rpc_url = Url::parse(rpc_url)
            .with_context(|| format!("Invalid RPC endpoint URL for network {}", name))?;

        if keys.is_empty() {
            anyhow::bail!("No signing keys configured for network {}", name);
        }

        let signers = keys
            .iter()
            .enumerate()
            .map(|(i, key)| {
                key.parse::<PrivateKeySigner>().with_context(|| {
                    format!("Signing key #{} is not a well-formed private key", i)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name,
            chain_id,
            rpc_url,
            signers,
        })
    }

    /// Assemble the "goerli" profile from the process environment.
    ///
    /// Reads the endpoint from `QUICKNODE_HTTP_URL` and the deployer key
    /// from `PRIVATE_KEY`. A missing variable is a configuration error, so
    /// no transaction can be broadcast on misconfiguration.
    pub fn goerli_from_env() -> Result<Self> {
        Self::goerli_from_vars(
            std::env::var(RPC_URL_ENV).ok(),
            std::env::var(PRIVATE_KEY_ENV).ok(),
        )
    }

    fn goerli_from_vars(rpc_url: Option<String>, private_key: Option<String>) -> Result<Self> {
        let rpc_url = rpc_url
            .with_context(|| format!("Missing required environment variable {}", RPC_URL_ENV))?;
        let private_key = private_key.with_context(|| {
            format!("Missing required environment variable {}", PRIVATE_KEY_ENV)
        })?;

        Self::new(GOERLI, Some(GOERLI_CHAIN_ID), &rpc_url, &[private_key])
    }

    /// The primary signing key (account index 0).
    pub fn signer(&self) -> &PrivateKeySigner {
        &self.signers[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known Anvil development key, safe to embed in tests.
    const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_profile_construction() {
        let profile = NetworkProfile::new(
            "goerli",
            Some(GOERLI_CHAIN_ID),
            "https://eth-goerli.example.com/abc123",
            &[TEST_KEY.to_string()],
        )
        .expect("Profile should build from valid inputs");

        assert_eq!(profile.name, "goerli");
        assert_eq!(profile.chain_id, Some(5));
        assert_eq!(profile.rpc_url.scheme(), "https");
        // The signer address is derived from the key, not stored.
        assert_eq!(
            profile.signer().address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_profile_accepts_unprefixed_key() {
        let key = TEST_KEY.trim_start_matches("0x").to_string();
        let profile =
            NetworkProfile::new("goerli", None, "https://example.com", &[key]).unwrap();
        assert_eq!(
            profile.signer().address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_profile_rejects_empty_key_list() {
        let result = NetworkProfile::new("goerli", None, "https://example.com", &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_rejects_malformed_key() {
        for bad in ["", "0x1234", "not-a-key", "0xzz0974bec39a17e36ba4a6b4d238ff94"] {
            let result = NetworkProfile::new(
                "goerli",
                None,
                "https://example.com",
                &[bad.to_string()],
            );
            assert!(result.is_err(), "Key '{}' should be rejected", bad);
        }
    }

    #[test]
    fn test_profile_rejects_malformed_url() {
        let result = NetworkProfile::new("goerli", None, "not a url", &[TEST_KEY.to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_goerli_requires_both_variables() {
        let url = Some("https://example.com".to_string());
        let key = Some(TEST_KEY.to_string());

        assert!(NetworkProfile::goerli_from_vars(None, key.clone()).is_err());
        assert!(NetworkProfile::goerli_from_vars(url.clone(), None).is_err());
        assert!(NetworkProfile::goerli_from_vars(None, None).is_err());

        let profile = NetworkProfile::goerli_from_vars(url, key).unwrap();
        assert_eq!(profile.name, GOERLI);
        assert_eq!(profile.chain_id, Some(GOERLI_CHAIN_ID));
    }
}
