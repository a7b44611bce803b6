//! cryptodevs-deploy - Deployment library for the CryptoDevs NFT contract.
//!
//! This crate provides everything the deployment binary needs: the goerli
//! network profile, contract artifact resolution, constructor-argument
//! encoding, and the driver that signs and broadcasts the creation
//! transaction and waits for it to be mined.

mod abi;
mod artifact;
mod deployer;
mod network;
mod record;
pub mod rpc;

pub use abi::{encode_constructor_args, init_code};
pub use artifact::ContractArtifact;
pub use deployer::{ContractDeployer, DeployedContract};
pub use network::{
    GOERLI, GOERLI_CHAIN_ID, NetworkProfile, PRIVATE_KEY_ENV, RPC_URL_ENV, SOLIDITY_VERSION,
};
pub use record::DeploymentRecord;
