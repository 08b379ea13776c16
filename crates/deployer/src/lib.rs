//! Activating a cross-chain bridge between two running chains.
//!
//! [`protocol::BridgeDeployer`] runs the whole sequence: it validates the request against the
//! registry, derives the bridge parameters from the first witness and the live chains, records
//! the bridge, submits the door-account transactions on both sides and finally funds the
//! witnesses' operational accounts. Steps are never rolled back; a failure leaves everything
//! done so far in place and the bridge record persisted.

pub mod bootstrap;
pub mod config;
pub mod connector;
pub mod constants;
pub mod errors;
pub mod funding;
pub mod params;
pub mod protocol;

#[cfg(test)]
mod testing;

pub use bootstrap::BootstrapDocument;
pub use config::{FundingConfig, FundingPolicy};
pub use connector::{ClientFactory, NodeClientFactory};
pub use errors::{DeployError, DeployResult, FundingFailure};
pub use funding::{AccountFunder, GenesisFunder};
pub use protocol::{BridgeDeployer, BuildRequest, DeploymentReport, SubmittedTx};
