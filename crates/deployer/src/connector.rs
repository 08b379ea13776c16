//! Turning a registered chain into a ledger client.

use tracing::debug;
use xbridge_ledger::{JsonRpcLedgerClient, LedgerClient, LedgerResult, RpcConfig, RpcEndpoint};
use xbridge_registry::ChainRecord;

/// Produces a client for a registered chain.
pub trait ClientFactory: Send + Sync {
    /// Connects to `chain`.
    fn client_for(&self, chain: &ChainRecord) -> LedgerResult<Box<dyn LedgerClient>>;
}

/// Connects to the JSON-RPC endpoint declared in the chain's node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeClientFactory {
    rpc: RpcConfig,
}

impl NodeClientFactory {
    /// Creates a factory whose clients use `rpc`.
    pub const fn new(rpc: RpcConfig) -> Self {
        Self { rpc }
    }
}

impl ClientFactory for NodeClientFactory {
    fn client_for(&self, chain: &ChainRecord) -> LedgerResult<Box<dyn LedgerClient>> {
        let endpoint = RpcEndpoint::from_node_config(&chain.config_path)?;
        let client = JsonRpcLedgerClient::from_endpoint(&endpoint, &self.rpc)?;
        debug!(chain = %chain.name, url = %client.url(), "connected to chain");

        Ok(Box::new(client))
    }
}
