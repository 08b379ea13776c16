//! JSON-RPC client configuration.

use std::time::Duration;

use crate::constants::DEFAULT_REQUEST_TIMEOUT;

/// Settings shared by every ledger client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RpcConfig {
    /// Bound on each request, after which it fails as a transport error.
    pub request_timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
