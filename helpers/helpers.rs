//! Building blocks for the GuessingGame deployment script and its tests

mod artifacts;
mod client;
mod config;
mod deployer;
mod environment;
mod error;
mod logging;
mod node;

pub use artifacts::{artifact_stem, build_project_in_dir, read_package, ArtifactStore};
pub use client::{
    account_component_from_package, constructor_storage_slots, create_contract_account,
    setup_client, AccountCreationConfig, DeployClient,
};
pub use config::DeployConfig;
pub use deployer::{
    deploy_guessing_game, guessing_game_request, run, EXIT_FAILURE, EXIT_SUCCESS, GUESSING_GAME,
    GUESSING_GAME_SUBSCRIPTION_ID,
};
pub use environment::{DeployedContract, DeploymentRequest, ExecutionEnvironment, PendingDeployment};
pub use error::DeploymentError;
pub use logging::init_tracing;
pub use node::MidenNode;
