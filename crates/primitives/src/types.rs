//! Domain types shared by the registry, the ledger client and the deployer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::NATIVE_CURRENCY;

/// The two kinds of daemon the control plane supervises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A node participating in one ledger.
    Chain,

    /// An attestor observing both chains of a bridge.
    Witness,
}

impl EntityKind {
    /// Returns the lowercase label used in logs and messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Chain => "chain",
            EntityKind::Witness => "witness",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a bridge.
///
/// The locking chain holds the original asset; the issuing chain mints its wrapped
/// counterpart. Every bridge-level pair in this workspace is ordered `(locking, issuing)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChainSide {
    /// The chain that locks the original asset.
    Locking,

    /// The chain that issues the wrapped asset.
    Issuing,
}

impl ChainSide {
    /// Both sides, in the order bridge steps are executed.
    pub const ALL: [ChainSide; 2] = [ChainSide::Locking, ChainSide::Issuing];

    /// Position of this side inside a `(locking, issuing)` pair.
    pub const fn index(&self) -> usize {
        match self {
            ChainSide::Locking => 0,
            ChainSide::Issuing => 1,
        }
    }

    /// Picks this side's element out of a `(locking, issuing)` pair.
    pub const fn select<'a, T>(&self, pair: &'a (T, T)) -> &'a T {
        match self {
            ChainSide::Locking => &pair.0,
            ChainSide::Issuing => &pair.1,
        }
    }
}

impl fmt::Display for ChainSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainSide::Locking => f.write_str("locking"),
            ChainSide::Issuing => f.write_str("issuing"),
        }
    }
}

/// An asset identifier as understood by the ledger.
///
/// The native asset carries only a currency code; issued tokens also name their issuer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    /// Currency code, e.g. `XRP` or a three-letter token code.
    pub currency: String,

    /// Issuing account, absent for the native asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl Issue {
    /// The ledger's native asset.
    pub fn native() -> Self {
        Self {
            currency: NATIVE_CURRENCY.to_string(),
            issuer: None,
        }
    }

    /// An issued token.
    pub fn issued(currency: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            issuer: Some(issuer.into()),
        }
    }

    /// Whether this is the native asset.
    pub fn is_native(&self) -> bool {
        self.issuer.is_none() && self.currency == NATIVE_CURRENCY
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.issuer {
            Some(issuer) => write!(f, "{}.{}", self.currency, issuer),
            None => f.write_str(&self.currency),
        }
    }
}

/// The on-ledger definition of a cross-chain bridge.
///
/// Field names follow the ledger's JSON so the struct can be embedded in transactions and parsed
/// out of witness configuration files unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XChainBridge {
    /// Door account on the locking chain.
    pub locking_chain_door: String,

    /// Asset locked on the locking chain.
    pub locking_chain_issue: Issue,

    /// Door account on the issuing chain.
    pub issuing_chain_door: String,

    /// Asset issued on the issuing chain.
    pub issuing_chain_issue: Issue,
}

impl XChainBridge {
    /// Door accounts as a `(locking, issuing)` pair.
    pub fn doors(&self) -> (String, String) {
        (
            self.locking_chain_door.clone(),
            self.issuing_chain_door.clone(),
        )
    }

    /// Bridged assets as a `(locking, issuing)` pair.
    pub fn issues(&self) -> (Issue, Issue) {
        (
            self.locking_chain_issue.clone(),
            self.issuing_chain_issue.clone(),
        )
    }
}
