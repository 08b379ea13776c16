//! Funding configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FUNDING_AMOUNT, GENESIS_ACCOUNT, GENESIS_SECRET};

/// What a bridge build does when funding one account fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingPolicy {
    /// Attempt every account, then report all failures together.
    #[default]
    Continue,

    /// Stop at the first failure.
    Abort,
}

/// Where funding comes from and how much each account gets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundingConfig {
    /// Drops sent to each account.
    pub amount: String,

    /// Account the payments are sent from.
    pub genesis_account: String,

    /// Secret of [`Self::genesis_account`].
    pub genesis_secret: String,

    /// Behaviour when funding an account fails during a bridge build.
    pub on_failure: FundingPolicy,
}

impl Default for FundingConfig {
    fn default() -> Self {
        Self {
            amount: DEFAULT_FUNDING_AMOUNT.to_string(),
            genesis_account: GENESIS_ACCOUNT.to_string(),
            genesis_secret: GENESIS_SECRET.to_string(),
            on_failure: FundingPolicy::default(),
        }
    }
}
