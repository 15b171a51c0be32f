//! Deploys the GuessingGame contract and prints its address

use std::process::ExitCode;

use clap::Parser;
use helpers::{init_tracing, run, DeployConfig, MidenNode, EXIT_FAILURE};

#[tokio::main]
async fn main() -> ExitCode {
    let config = DeployConfig::parse();
    init_tracing(config.verbose);

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    let mut node = match MidenNode::connect(&config).await {
        Ok(node) => node,
        Err(e) => {
            eprintln!("{}", e.detail());
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for interrupt: {e}");
            std::future::pending::<()>().await;
        }
    };

    ExitCode::from(run(&mut node, shutdown, &mut stdout, &mut stderr).await)
}
