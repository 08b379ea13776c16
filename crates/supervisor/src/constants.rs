//! Fixed invocations and timings.

use std::time::Duration;

use xbridge_primitives::types::EntityKind;

/// How long a freshly spawned daemon must stay alive to count as started.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(300);

/// Flag that points a daemon at its configuration file.
pub const CONF_FLAG: &str = "--conf";

/// Subcommand that asks a running daemon to shut down.
pub const STOP_SUBCOMMAND: &str = "stop";

/// Flags appended after `--conf <file>` when starting a daemon of `kind`.
///
/// Chains run standalone (`-a`) so they close ledgers only on request.
pub const fn start_flags(kind: EntityKind) -> &'static [&'static str] {
    match kind {
        EntityKind::Chain => &["-a", "--silent"],
        EntityKind::Witness => &["--silent"],
    }
}
