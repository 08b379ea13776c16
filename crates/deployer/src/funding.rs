//! Funding accounts from the genesis account of a standalone chain.

use async_trait::async_trait;
use tracing::info;
use xbridge_ledger::Transaction;
use xbridge_registry::{ConfigStore, StorageBackend};

use crate::{
    config::FundingConfig,
    connector::ClientFactory,
    errors::{DeployError, DeployResult},
};

/// Sends an account enough of the native asset to operate.
#[async_trait]
pub trait AccountFunder: Send + Sync {
    /// Funds `account` on the registered chain named `chain`.
    async fn fund_account(&self, chain: &str, account: &str) -> DeployResult<()>;
}

/// Pays from the genesis account, which owns every drop of a fresh standalone ledger.
#[derive(Debug)]
pub struct GenesisFunder<'a, B, F> {
    store: &'a ConfigStore<B>,
    clients: F,
    config: FundingConfig,
}

impl<'a, B, F> GenesisFunder<'a, B, F> {
    /// Creates a funder resolving chains in `store`.
    pub const fn new(store: &'a ConfigStore<B>, clients: F, config: FundingConfig) -> Self {
        Self {
            store,
            clients,
            config,
        }
    }
}

#[async_trait]
impl<'a, B, F> AccountFunder for GenesisFunder<'a, B, F>
where
    B: StorageBackend + Sync,
    F: ClientFactory,
{
    async fn fund_account(&self, chain: &str, account: &str) -> DeployResult<()> {
        let record = self.store.find_chain(chain)?;
        let client = self.clients.client_for(&record)?;

        let payment =
            Transaction::payment(&self.config.genesis_account, account, &self.config.amount);
        client
            .submit_and_accept(&payment, &self.config.genesis_secret)
            .await
            .map_err(|source| DeployError::Transaction {
                step: payment.kind(),
                chain: chain.to_string(),
                source,
            })?;
        info!(%chain, %account, amount = %self.config.amount, "funded account");

        Ok(())
    }
}
