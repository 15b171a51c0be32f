//! The seam between the deployer and whatever executes the deployment.

use async_trait::async_trait;

use crate::DeploymentError;

/// A request to create a new contract instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub contract_name: String,
    pub constructor_args: Vec<u64>,
}

impl DeploymentRequest {
    pub fn new(contract_name: impl Into<String>, constructor_args: Vec<u64>) -> Self {
        Self {
            contract_name: contract_name.into(),
            constructor_args,
        }
    }
}

/// A submitted deployment whose transaction has not been confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeployment {
    pub contract_name: String,
    /// Address the contract will be reachable at once confirmed.
    pub address: String,
    pub transaction_id: String,
}

/// A deployment the environment has confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub contract_name: String,
    pub address: String,
}

impl From<PendingDeployment> for DeployedContract {
    fn from(pending: PendingDeployment) -> Self {
        Self {
            contract_name: pending.contract_name,
            address: pending.address,
        }
    }
}

/// An execution environment able to deploy contracts.
///
/// `deploy_contract` submits the deployment and returns as soon as the
/// environment has accepted it. `wait_for_deployment` suspends until the
/// deployment transaction is confirmed or fails.
#[async_trait(?Send)]
pub trait ExecutionEnvironment {
    async fn deploy_contract(
        &mut self,
        request: &DeploymentRequest,
    ) -> Result<PendingDeployment, DeploymentError>;

    async fn wait_for_deployment(
        &mut self,
        pending: &PendingDeployment,
    ) -> Result<DeployedContract, DeploymentError>;
}
