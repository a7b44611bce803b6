//! Deploy-time constants consumed verbatim as constructor arguments.

use alloy_primitives::{Address, address};

/// Name of the contract artifact to deploy.
pub const CONTRACT_NAME: &str = "CryptoDevs";

/// Address of the already-deployed whitelist contract.
pub const WHITELIST_CONTRACT_ADDRESS: Address =
    address!("6b85e1d9b95849eee11b0bae27b856aae1961a6c");

/// Base URL the contract serves token metadata from.
pub const METADATA_URL: &str = "https://nft-collection-sneh1999.vercel.app/api/";
