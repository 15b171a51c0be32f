//! Client setup and contract account construction

use std::{collections::BTreeSet, sync::Arc};

use miden_client::{
    account::{component::NoAuth, Account, AccountStorageMode, AccountType, StorageSlot},
    builder::ClientBuilder,
    keystore::FilesystemKeyStore,
    rpc::TonicRpcClient,
    utils::Deserializable,
    Client, Felt, Word,
};
use miden_core::FieldElement;
use miden_mast_package::Package;
use miden_objects::account::{
    AccountBuilder, AccountComponent, AccountComponentMetadata, AccountComponentTemplate,
};
use rand::{rngs::StdRng, RngCore};
use tracing::debug;

use crate::{DeployConfig, DeploymentError};

pub type DeployClient = Client<FilesystemKeyStore<StdRng>>;

/// Connects a client to the configured node, backed by a sqlite store and a filesystem keystore.
pub async fn setup_client(config: &DeployConfig) -> Result<DeployClient, DeploymentError> {
    let endpoint = config.endpoint()?;
    let rpc_api = Arc::new(TonicRpcClient::new(&endpoint, config.rpc_timeout_ms));

    let keystore = Arc::new(
        FilesystemKeyStore::<StdRng>::new(config.keystore_path.clone())
            .map_err(|e| DeploymentError::Keystore(e.to_string()))?,
    );

    let store_path = config.store_path.to_string_lossy().to_string();
    let client = ClientBuilder::new()
        .rpc(rpc_api)
        .sqlite_store(store_path.as_str())
        .authenticator(keystore)
        .in_debug_mode((config.verbose > 1).into())
        .build()
        .await?;

    Ok(client)
}

/// Account settings for a deployed contract
#[derive(Clone)]
pub struct AccountCreationConfig {
    pub account_type: AccountType,
    pub storage_mode: AccountStorageMode,
    pub storage_slots: Vec<StorageSlot>,
    pub supported_types: Option<Vec<AccountType>>,
}

impl Default for AccountCreationConfig {
    fn default() -> Self {
        Self {
            account_type: AccountType::RegularAccountImmutableCode,
            storage_mode: AccountStorageMode::Public,
            storage_slots: vec![],
            supported_types: None,
        }
    }
}

/// Initial storage for constructor arguments: argument `i` lands in value slot `i`.
pub fn constructor_storage_slots(args: &[u64]) -> Vec<StorageSlot> {
    args.iter()
        .map(|&arg| {
            StorageSlot::Value(Word::from([
                Felt::ZERO,
                Felt::ZERO,
                Felt::ZERO,
                Felt::new(arg),
            ]))
        })
        .collect()
}

pub fn account_component_from_package(
    package: &Package,
    config: &AccountCreationConfig,
) -> Result<AccountComponent, DeploymentError> {
    let bytes = package
        .account_component_metadata_bytes
        .as_deref()
        .ok_or_else(|| {
            DeploymentError::Account("no account component metadata present".to_string())
        })?;

    let metadata = AccountComponentMetadata::read_from_bytes(bytes)
        .map_err(|e| DeploymentError::Account(e.to_string()))?;
    let template =
        AccountComponentTemplate::new(metadata, package.unwrap_library().as_ref().clone());

    let component = AccountComponent::new(template.library().clone(), config.storage_slots.clone())
        .map_err(|e| DeploymentError::Account(e.to_string()))?;

    let supported_types = match &config.supported_types {
        Some(types) => BTreeSet::from_iter(types.iter().cloned()),
        None => BTreeSet::from_iter([config.account_type]),
    };

    Ok(component.with_supported_types(supported_types))
}

/// Builds a contract account from `package` and registers it with the client.
///
/// The account only exists locally until a transaction against it is committed.
pub async fn create_contract_account(
    client: &mut DeployClient,
    package: &Package,
    config: AccountCreationConfig,
) -> Result<Account, DeploymentError> {
    let account_component = account_component_from_package(package, &config)?;

    let mut init_seed = [0_u8; 32];
    client.rng().fill_bytes(&mut init_seed);

    // Sync client state to get latest block info
    client.sync_state().await?;

    let (account, seed) = AccountBuilder::new(init_seed)
        .account_type(config.account_type)
        .storage_mode(config.storage_mode)
        .with_component(account_component)
        .with_auth_component(NoAuth)
        .build()
        .map_err(|e| DeploymentError::Account(e.to_string()))?;

    debug!(account = %account.id().to_hex(), "registering contract account");
    client.add_account(&account, Some(seed), false).await?;

    Ok(account)
}
