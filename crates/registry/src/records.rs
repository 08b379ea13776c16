//! Records persisted in the registry document.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use xbridge_primitives::types::{ChainSide, Issue, XChainBridge};

/// A daemon started by the supervisor.
///
/// Chains and witnesses are recorded with the same shape; which collection a record belongs to is
/// decided by the [`EntityKind`](xbridge_primitives::types::EntityKind) it was appended under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Unique name within the record's collection.
    pub name: String,

    /// Absolute path of the daemon binary.
    pub executable_path: PathBuf,

    /// Absolute path of the daemon's configuration file, unique within the collection.
    pub config_path: PathBuf,

    /// OS process id assigned at launch.
    pub process_id: u32,
}

impl ProcessRecord {
    /// Creates a new record.
    pub fn new(
        name: impl Into<String>,
        executable_path: impl Into<PathBuf>,
        config_path: impl Into<PathBuf>,
        process_id: u32,
    ) -> Self {
        Self {
            name: name.into(),
            executable_path: executable_path.into(),
            config_path: config_path.into(),
            process_id,
        }
    }

    /// Whether this record matches `name`, or `config_path` when one is given.
    pub fn collides_with(&self, name: &str, config_path: Option<&Path>) -> bool {
        self.name == name || config_path.is_some_and(|path| self.config_path == path)
    }
}

/// A running node participating in one ledger.
pub type ChainRecord = ProcessRecord;

/// A running attestor observing both chains of a bridge.
pub type WitnessRecord = ProcessRecord;

/// A bridge configured between two registered chains.
///
/// Every pair is ordered `(locking, issuing)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRecord {
    /// Unique bridge name.
    pub name: String,

    /// Names of the locking and issuing chains.
    pub chain_pair: (String, String),

    /// Number of witnesses attesting for this bridge.
    pub witness_count: usize,

    /// Door account on each chain.
    pub door_accounts: (String, String),

    /// Bridged asset on each chain.
    pub bridge_currencies: (Issue, Issue),

    /// Reward paid to witnesses per signature, in drops.
    pub signature_reward: String,

    /// Minimum amount, in drops, that a cross-chain account creation must carry on each chain.
    ///
    /// Each entry is the *other* chain's base reserve: creating an account on the far side of
    /// the bridge has to fund that side's reserve.
    pub account_create_amounts: (String, String),
}

impl BridgeRecord {
    /// Name of the chain on `side`.
    pub fn chain(&self, side: ChainSide) -> &str {
        side.select(&self.chain_pair).as_str()
    }

    /// Door account on `side`.
    pub fn door_account(&self, side: ChainSide) -> &str {
        side.select(&self.door_accounts).as_str()
    }

    /// Minimum account-creation amount submitted with `side`'s bridge-creation transaction.
    pub fn account_create_amount(&self, side: ChainSide) -> &str {
        side.select(&self.account_create_amounts).as_str()
    }

    /// The on-ledger bridge definition shared by both sides.
    pub fn xchain_bridge(&self) -> XChainBridge {
        XChainBridge {
            locking_chain_door: self.door_accounts.0.clone(),
            locking_chain_issue: self.bridge_currencies.0.clone(),
            issuing_chain_door: self.door_accounts.1.clone(),
            issuing_chain_issue: self.bridge_currencies.1.clone(),
        }
    }
}
