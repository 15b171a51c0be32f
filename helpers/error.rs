use std::{error::Error as StdError, path::PathBuf};

use miden_client::ClientError;
use thiserror::Error;

/// Any failure surfaced while deploying a contract.
#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error("client error")]
    Client(#[from] ClientError),

    #[error("invalid rpc endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("keystore error: {0}")]
    Keystore(String),

    #[error("no artifact for contract `{contract}` at {}", .path.display())]
    ArtifactNotFound { contract: String, path: PathBuf },

    #[error("malformed artifact {}: {reason}", .path.display())]
    MalformedArtifact { path: PathBuf, reason: String },

    #[error("failed to build contract project {}: {reason}", .project.display())]
    Build { project: PathBuf, reason: String },

    #[error("failed to construct contract account: {0}")]
    Account(String),

    #[error("failed to construct deployment transaction: {0}")]
    Transaction(String),

    #[error("deployment of `{contract}` rejected: {reason}")]
    Rejected { contract: String, reason: String },

    #[error("interrupted before the deployment settled")]
    Interrupted,

    #[error("io error")]
    Io(#[from] std::io::Error),
}

impl DeploymentError {
    /// Renders the error followed by its full source chain, one cause per line.
    pub fn detail(&self) -> String {
        let mut out = format!("Error: {self}");
        let mut source = self.source();
        while let Some(cause) = source {
            out.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }
        out
    }
}
