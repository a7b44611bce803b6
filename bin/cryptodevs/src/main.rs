//! cryptodevs is the deployment harness for the CryptoDevs NFT contract.

mod cli;
mod constants;

use anyhow::{Context, Result};
use clap::Parser;

use cli::Cli;
use constants::{CONTRACT_NAME, METADATA_URL, WHITELIST_CONTRACT_ADDRESS};
use cryptodevs_deploy::{
    ContractArtifact, ContractDeployer, DeploymentRecord, GOERLI, GOERLI_CHAIN_ID, NetworkProfile,
    SOLIDITY_VERSION, encode_constructor_args,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    // Load credentials from the .env file; variables already present in the
    // environment take precedence.
    match dotenvy::from_path(&cli.env_file) {
        Ok(()) => tracing::debug!(env_file = %cli.env_file.display(), "Environment file loaded"),
        Err(e) => {
            tracing::debug!(env_file = %cli.env_file.display(), error = %e, "No environment file loaded")
        }
    }

    let network = NetworkProfile::goerli_from_env()?;

    tracing::info!(
        network = %network.name,
        rpc_url = %network.rpc_url,
        solidity = SOLIDITY_VERSION,
        "Loaded network profile"
    );

    let artifact = ContractArtifact::resolve(&cli.artifacts_dir, CONTRACT_NAME)?;
    let constructor_args = encode_constructor_args(METADATA_URL, &WHITELIST_CONTRACT_ADDRESS);

    let deployer = ContractDeployer::new(network)?;
    let deployed = deployer.deploy(&artifact, &constructor_args).await?;

    println!("Crypto Devs Contract Address: {}", deployed.address);

    // Record the deployment so the address survives the process.
    let record = DeploymentRecord::new(CONTRACT_NAME, GOERLI, GOERLI_CHAIN_ID, &deployed);
    let record_dir = cli.deployments_dir.join(GOERLI);
    std::fs::create_dir_all(&record_dir).with_context(|| {
        format!(
            "Failed to create deployments directory {}",
            record_dir.display()
        )
    })?;
    record.save_to_file(&record_dir.join(format!("{}.json", CONTRACT_NAME)))?;

    Ok(())
}
