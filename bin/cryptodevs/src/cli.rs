use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

/// Command-line interface for the deployment harness.
///
/// The contract and its constructor arguments are fixed constants (see
/// `constants.rs`); the flags here only tune the environment the deployment
/// runs in.
#[derive(Parser)]
#[command(name = "cryptodevs")]
#[command(author, version, about = "Deploy the CryptoDevs NFT contract")]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "CRYPTODEVS_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// Path to the .env file holding the network credentials.
    ///
    /// A missing file is tolerated when QUICKNODE_HTTP_URL and PRIVATE_KEY
    /// are already set in the environment.
    #[arg(long, env = "CRYPTODEVS_ENV_FILE", default_value = ".env")]
    pub env_file: PathBuf,

    /// Directory containing the compiled contract artifacts.
    #[arg(long, env = "CRYPTODEVS_ARTIFACTS", default_value = "artifacts")]
    pub artifacts_dir: PathBuf,

    /// Directory where deployment records are written.
    #[arg(long, env = "CRYPTODEVS_DEPLOYMENTS", default_value = "deployments")]
    pub deployments_dir: PathBuf,
}
