//! Deployments against a Miden node.

use std::time::Duration;

use async_trait::async_trait;
use miden_client::{
    store::TransactionFilter,
    transaction::{TransactionId, TransactionRequestBuilder, TransactionStatus},
};
use tracing::{debug, info};

use crate::{
    client::{constructor_storage_slots, create_contract_account, setup_client, DeployClient},
    AccountCreationConfig, ArtifactStore, DeployConfig, DeployedContract, DeploymentError,
    DeploymentRequest, ExecutionEnvironment, PendingDeployment,
};

/// Where a submitted deployment transaction stands on the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TransactionState {
    Committed,
    /// Pending, or not yet known to the local store.
    Waiting,
    Failed(String),
}

impl From<Option<&TransactionStatus>> for TransactionState {
    fn from(status: Option<&TransactionStatus>) -> Self {
        match status {
            Some(TransactionStatus::Committed { .. }) => Self::Committed,
            Some(TransactionStatus::Pending) | None => Self::Waiting,
            Some(other) => Self::Failed(format!("{other:?}")),
        }
    }
}

/// Settles `pending` once its transaction has left the waiting state.
pub(crate) fn settle(
    state: TransactionState,
    pending: &PendingDeployment,
) -> Option<Result<DeployedContract, DeploymentError>> {
    match state {
        TransactionState::Committed => Some(Ok(pending.clone().into())),
        TransactionState::Waiting => None,
        TransactionState::Failed(reason) => Some(Err(DeploymentError::Rejected {
            contract: pending.contract_name.clone(),
            reason,
        })),
    }
}

pub struct MidenNode {
    client: DeployClient,
    artifacts: ArtifactStore,
    poll_interval: Duration,
    submitted: Vec<TransactionId>,
}

impl MidenNode {
    pub fn new(client: DeployClient, artifacts: ArtifactStore, poll_interval: Duration) -> Self {
        Self {
            client,
            artifacts,
            poll_interval,
            submitted: Vec::new(),
        }
    }

    pub async fn connect(config: &DeployConfig) -> Result<Self, DeploymentError> {
        let client = setup_client(config).await?;

        let mut artifacts = ArtifactStore::new(&config.artifacts_dir);
        if let Some(contracts_dir) = &config.contracts_dir {
            artifacts = artifacts.with_contracts_dir(contracts_dir, config.release());
        }

        Ok(Self::new(client, artifacts, config.poll_interval()))
    }

    fn submitted_id(&self, pending: &PendingDeployment) -> Result<TransactionId, DeploymentError> {
        self.submitted
            .iter()
            .find(|id| id.to_hex() == pending.transaction_id)
            .cloned()
            .ok_or_else(|| DeploymentError::Rejected {
                contract: pending.contract_name.clone(),
                reason: format!(
                    "transaction {} was not submitted by this client",
                    pending.transaction_id
                ),
            })
    }
}

#[async_trait(?Send)]
impl ExecutionEnvironment for MidenNode {
    async fn deploy_contract(
        &mut self,
        request: &DeploymentRequest,
    ) -> Result<PendingDeployment, DeploymentError> {
        let package = self.artifacts.load(&request.contract_name)?;

        let account_config = AccountCreationConfig {
            storage_slots: constructor_storage_slots(&request.constructor_args),
            ..Default::default()
        };
        let account = create_contract_account(&mut self.client, &package, account_config).await?;

        // An empty transaction against the fresh account publishes it.
        let tx_request = TransactionRequestBuilder::new()
            .build()
            .map_err(|e| DeploymentError::Transaction(e.to_string()))?;
        let tx_result = self.client.new_transaction(account.id(), tx_request).await?;
        let tx_id = tx_result.executed_transaction().id();
        let transaction_id = tx_id.to_hex();

        self.client.submit_transaction(tx_result).await?;
        self.submitted.push(tx_id);

        Ok(PendingDeployment {
            contract_name: request.contract_name.clone(),
            address: account.id().to_hex(),
            transaction_id,
        })
    }

    async fn wait_for_deployment(
        &mut self,
        pending: &PendingDeployment,
    ) -> Result<DeployedContract, DeploymentError> {
        let tx_id = self.submitted_id(pending)?;

        loop {
            let summary = self.client.sync_state().await?;

            let records = self
                .client
                .get_transactions(TransactionFilter::Ids(vec![tx_id.clone()]))
                .await?;
            let state = TransactionState::from(records.first().map(|record| &record.status));

            if let Some(outcome) = settle(state, pending) {
                if outcome.is_ok() {
                    info!(
                        contract = %pending.contract_name,
                        address = %pending.address,
                        block = %summary.block_num,
                        "deployment confirmed"
                    );
                }
                return outcome;
            }

            debug!(tx_id = %pending.transaction_id, block = %summary.block_num, "not committed yet");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
