//! Vocabulary shared by every xbridge crate: entity kinds, bridge sides and the ledger's bridge
//! and asset definitions.
//!
//! Nothing here depends on another crate of the workspace.

pub mod constants;
pub mod types;
