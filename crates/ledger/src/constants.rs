//! Ledger protocol constants.

use std::time::Duration;

/// Default bound on a single JSON-RPC request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Engine results that mean the transaction was accepted.
pub const SUCCESS_ENGINE_RESULTS: &[&str] = &["tesSUCCESS", "terQUEUED"];

/// `AccountSet` flag that disables signing with the account's master key.
pub const ASF_DISABLE_MASTER: u32 = 4;

/// Address a node listens on when bound to every interface.
pub const UNSPECIFIED_IP: &str = "0.0.0.0";

/// Address used to reach a node bound to every interface.
pub const LOCALHOST_IP: &str = "127.0.0.1";
