//! Ledger errors.

use std::path::PathBuf;

use jsonrpsee::core::client::Error as ClientError;
use thiserror::Error;

/// Errors that can occur while talking to a node.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The node could not be reached or the request timed out.
    #[error("transport error talking to {url}: {source}")]
    Transport {
        /// Endpoint of the node.
        url: String,

        /// The underlying error.
        #[source]
        source: ClientError,
    },

    /// The node answered a request with an error status.
    #[error("{method} failed: {error}: {message}")]
    Rpc {
        /// The method that was called.
        method: &'static str,

        /// Short error code reported by the node.
        error: String,

        /// Human readable explanation.
        message: String,
    },

    /// The node answered with something other than what the method returns.
    #[error("unexpected {method} response: {reason}")]
    UnexpectedResponse {
        /// The method that was called.
        method: &'static str,

        /// What was wrong with the response.
        reason: String,
    },

    /// The node applied the transaction with a non-success engine result.
    #[error("transaction rejected with {engine_result}: {message}")]
    Rejected {
        /// Engine result code, e.g. `tecNO_PERMISSION`.
        engine_result: String,

        /// Human readable explanation.
        message: String,
    },

    /// The node configuration does not describe a usable JSON-RPC endpoint.
    #[error("node config {}: {reason}", path.display())]
    NodeConfig {
        /// The configuration file.
        path: PathBuf,

        /// What is missing or invalid.
        reason: String,
    },

    /// A transaction could not be encoded.
    #[error("encode: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
