//! Constants shared across the workspace.

/// Currency code of the ledger's native asset.
pub const NATIVE_CURRENCY: &str = "XRP";

/// Signature reward used when the operator does not provide one.
pub const DEFAULT_SIGNATURE_REWARD: &str = "100";
