use std::{path::PathBuf, time::Duration};

use clap::Parser;
use miden_client::rpc::Endpoint;

use crate::DeploymentError;

/// Connection and workspace settings for the deployment script.
///
/// Nothing here reaches the deployment request: the contract and its
/// constructor arguments are fixed.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Deploys the GuessingGame contract")]
pub struct DeployConfig {
    /// `testnet`, `devnet`, `localhost` or a full node URL
    #[arg(long, env = "MIDEN_RPC_ENDPOINT", default_value = "testnet")]
    pub rpc_endpoint: String,

    #[arg(long, env = "MIDEN_RPC_TIMEOUT_MS", default_value_t = 10_000)]
    pub rpc_timeout_ms: u64,

    #[arg(long, env = "MIDEN_STORE_PATH", default_value = "./store.sqlite3")]
    pub store_path: PathBuf,

    #[arg(long, env = "MIDEN_KEYSTORE_PATH", default_value = "./keystore")]
    pub keystore_path: PathBuf,

    /// Directory holding compiled `.masp` packages
    #[arg(long, env = "ARTIFACTS_DIR", default_value = "./artifacts")]
    pub artifacts_dir: PathBuf,

    /// Directory of contract projects, used to build a missing artifact
    #[arg(long, env = "CONTRACTS_DIR")]
    pub contracts_dir: Option<PathBuf>,

    /// Build missing artifacts with the debug profile
    #[arg(long)]
    pub debug: bool,

    #[arg(long, env = "CONFIRMATION_POLL_MS", default_value_t = 2_000)]
    pub confirmation_poll_ms: u64,

    /// Use verbose output (-vv very verbose output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl DeployConfig {
    pub fn endpoint(&self) -> Result<Endpoint, DeploymentError> {
        match self.rpc_endpoint.as_str() {
            "testnet" => Ok(Endpoint::testnet()),
            "devnet" => Ok(Endpoint::devnet()),
            "localhost" => Ok(Endpoint::localhost()),
            url => Endpoint::try_from(url).map_err(|e| DeploymentError::InvalidEndpoint {
                endpoint: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.confirmation_poll_ms)
    }

    pub fn release(&self) -> bool {
        !self.debug
    }
}
