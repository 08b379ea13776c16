//! Deployment errors.

use std::{fmt, path::PathBuf};

use thiserror::Error;
use xbridge_ledger::LedgerError;
use xbridge_registry::RegistryError;

/// One account that could not be funded on one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingFailure {
    /// Chain the payment was sent on.
    pub chain: String,

    /// Account that was to be funded.
    pub account: String,

    /// Why the payment failed.
    pub reason: String,
}

impl fmt::Display for FundingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}: {}", self.account, self.chain, self.reason)
    }
}

/// Errors that can occur while building a bridge.
#[derive(Debug, Error)]
pub enum DeployError {
    /// A bridge with this name is already recorded.
    #[error("bridge {0} already exists")]
    BridgeExists(String),

    /// A named chain is not registered.
    #[error("chain {0} is not running")]
    ChainNotRunning(String),

    /// A named witness is not registered.
    #[error("witness {0} is not running")]
    WitnessNotRunning(String),

    /// The same chain was named as both sides.
    #[error("a bridge needs two different chains, got {0} twice")]
    SameChain(String),

    /// No witness was named.
    #[error("a bridge needs at least one witness")]
    NoWitnesses,

    /// The bootstrap document is missing, malformed or does not match the bridge.
    #[error("bootstrap {}: {reason}", path.display())]
    Bootstrap {
        /// The bootstrap file.
        path: PathBuf,

        /// What went wrong.
        reason: String,
    },

    /// A transaction was not applied.
    #[error("{step} on chain {chain} failed: {source}")]
    Transaction {
        /// Transaction type.
        step: &'static str,

        /// Chain the transaction was submitted to.
        chain: String,

        /// The underlying error.
        #[source]
        source: LedgerError,
    },

    /// Some operational accounts were not funded.
    #[error("failed to fund {} account(s): {}", failures.len(), join(failures))]
    Funding {
        /// Every failed payment, in attempt order.
        failures: Vec<FundingFailure>,
    },

    /// A chain could not be queried.
    #[error("ledger: {0}")]
    Ledger(#[from] LedgerError),

    /// The registry could not be read or updated.
    #[error("registry: {0}")]
    Registry(#[from] RegistryError),
}

impl DeployError {
    /// Whether the build was refused before anything was changed.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            DeployError::BridgeExists(_)
                | DeployError::ChainNotRunning(_)
                | DeployError::WitnessNotRunning(_)
                | DeployError::SameChain(_)
                | DeployError::NoWitnesses
        )
    }
}

fn join(failures: &[FundingFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for deployment operations.
pub type DeployResult<T> = Result<T, DeployError>;
