/// Base of the whoami string reported in logs and traces.
pub(crate) const SERVICE_NAME: &str = "xbridge";

/// Directory under the platform config directory used when no data directory is given.
pub(crate) const DEFAULT_DATA_DIR_NAME: &str = "xbridge";

/// Registry document inside the data directory.
pub(crate) const REGISTRY_FILE_NAME: &str = "config.json";
