//! Transactions submitted while setting up a bridge.
//!
//! Each variant serializes to the `tx_json` object the node expects, tagged by `TransactionType`.
//! Fee, sequence and signature are left for the node to fill in.

use serde::{Deserialize, Serialize};
use xbridge_primitives::types::XChainBridge;

use crate::constants::ASF_DISABLE_MASTER;

/// One account allowed to co-sign for a multi-signing account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignerEntry {
    /// The signer.
    pub account: String,

    /// How much the signer's signature counts toward the quorum.
    pub signer_weight: u16,
}

impl SignerEntry {
    /// Creates a new entry.
    pub fn new(account: impl Into<String>, signer_weight: u16) -> Self {
        Self {
            account: account.into(),
            signer_weight,
        }
    }
}

/// Signature weight required to act for a door account signed for by `signers` witnesses.
///
/// One witness may be offline at any time, except that a single witness must always sign.
pub fn quorum(signers: usize) -> u32 {
    u32::try_from(signers.saturating_sub(1).max(1)).unwrap_or(u32::MAX)
}

/// A transaction as handed to the node for signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "TransactionType")]
pub enum Transaction {
    /// Creates one side of a bridge on the door account.
    #[serde(rename_all = "PascalCase")]
    XChainCreateBridge {
        /// The door account.
        account: String,

        /// The bridge definition shared by both sides.
        x_chain_bridge: XChainBridge,

        /// Reward paid to the witnesses per attestation, in drops.
        signature_reward: String,

        /// Least amount a cross-chain account creation must carry, in drops.
        min_account_create_amount: String,
    },

    /// Installs the accounts allowed to multi-sign for `account`.
    #[serde(rename_all = "PascalCase")]
    SignerListSet {
        /// The account being configured.
        account: String,

        /// Combined weight required to sign.
        signer_quorum: u32,

        /// The signers.
        #[serde(with = "wrapped_entries")]
        signer_entries: Vec<SignerEntry>,
    },

    /// Changes account settings.
    #[serde(rename_all = "PascalCase")]
    AccountSet {
        /// The account being configured.
        account: String,

        /// Flag to enable.
        set_flag: u32,
    },

    /// Sends the native asset.
    #[serde(rename_all = "PascalCase")]
    Payment {
        /// The sender.
        account: String,

        /// The receiver.
        destination: String,

        /// Amount in drops.
        amount: String,
    },
}

impl Transaction {
    /// Bridge creation on `door`.
    pub fn create_bridge(
        door: impl Into<String>,
        bridge: XChainBridge,
        signature_reward: impl Into<String>,
        min_account_create_amount: impl Into<String>,
    ) -> Self {
        Transaction::XChainCreateBridge {
            account: door.into(),
            x_chain_bridge: bridge,
            signature_reward: signature_reward.into(),
            min_account_create_amount: min_account_create_amount.into(),
        }
    }

    /// Signer list on `account`, with the quorum derived from the number of entries.
    pub fn signer_list(account: impl Into<String>, entries: Vec<SignerEntry>) -> Self {
        Transaction::SignerListSet {
            account: account.into(),
            signer_quorum: quorum(entries.len()),
            signer_entries: entries,
        }
    }

    /// Disables the master key of `account`, leaving only its signer list able to sign.
    pub fn disable_master_key(account: impl Into<String>) -> Self {
        Transaction::AccountSet {
            account: account.into(),
            set_flag: ASF_DISABLE_MASTER,
        }
    }

    /// Native payment of `amount` drops.
    pub fn payment(
        account: impl Into<String>,
        destination: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Transaction::Payment {
            account: account.into(),
            destination: destination.into(),
            amount: amount.into(),
        }
    }

    /// The `TransactionType` this serializes with.
    pub const fn kind(&self) -> &'static str {
        match self {
            Transaction::XChainCreateBridge { .. } => "XChainCreateBridge",
            Transaction::SignerListSet { .. } => "SignerListSet",
            Transaction::AccountSet { .. } => "AccountSet",
            Transaction::Payment { .. } => "Payment",
        }
    }

    /// The sending account.
    pub fn account(&self) -> &str {
        match self {
            Transaction::XChainCreateBridge { account, .. }
            | Transaction::SignerListSet { account, .. }
            | Transaction::AccountSet { account, .. }
            | Transaction::Payment { account, .. } => account,
        }
    }
}

/// Signer entries go on the wire as `[{"SignerEntry": {..}}, ..]`.
mod wrapped_entries {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::SignerEntry;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Wrapped<T> {
        signer_entry: T,
    }

    pub(super) fn serialize<S: Serializer>(
        entries: &[SignerEntry],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(entries.iter().map(|signer_entry| Wrapped { signer_entry }))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<SignerEntry>, D::Error> {
        let wrapped = Vec::<Wrapped<SignerEntry>>::deserialize(deserializer)?;
        Ok(wrapped.into_iter().map(|w| w.signer_entry).collect())
    }
}
