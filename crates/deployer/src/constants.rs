//! Deployment defaults.

/// File looked up when the bootstrap path names a directory.
pub const BOOTSTRAP_FILE_NAME: &str = "bridge_bootstrap.json";

/// Environment variable conventionally pointing at the directory holding the bootstrap file.
pub const BOOTSTRAP_DIR_ENVVAR: &str = "XCHAIN_CONFIG_DIR";

/// Drops sent to each funded account (1000 XRP).
pub const DEFAULT_FUNDING_AMOUNT: &str = "1000000000";

/// The account holding every drop of a fresh standalone ledger.
pub const GENESIS_ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

/// Well-known secret of [`GENESIS_ACCOUNT`].
pub const GENESIS_SECRET: &str = "snoPBrXtMeMyMHUVTgbuqAfg1SUTb";
