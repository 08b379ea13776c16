//! Talking to the ledger nodes.
//!
//! Nodes run in standalone mode and sign on our behalf: every transaction is handed to the node
//! together with the signing secret (`submit` in sign-and-submit mode), then a ledger is closed
//! explicitly with `ledger_accept`.

pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod node_config;
pub mod tx;

pub use client::{JsonRpcLedgerClient, LedgerClient, SubmitOutcome};
pub use config::RpcConfig;
pub use errors::{LedgerError, LedgerResult};
pub use node_config::RpcEndpoint;
pub use tx::{quorum, SignerEntry, Transaction};
