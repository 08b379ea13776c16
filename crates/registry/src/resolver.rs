//! Existence checks used as preconditions before the registry is mutated.
//!
//! These are pure queries over a loaded [`Registry`]. They do not reserve anything, so a caller
//! racing another invocation must expect the store-level re-check in
//! [`ConfigStore`](crate::store::ConfigStore) to fire instead.

use std::path::Path;

use xbridge_primitives::types::EntityKind;

use crate::registry::Registry;

impl Registry {
    /// Whether any record of `kind` uses `name`, or `config_path` when one is given.
    pub fn process_exists(&self, kind: EntityKind, name: &str, config_path: Option<&Path>) -> bool {
        self.processes(kind)
            .iter()
            .any(|record| record.collides_with(name, config_path))
    }

    /// Whether a chain is registered under `name` or already uses `config_path`.
    pub fn chain_exists(&self, name: &str, config_path: Option<&Path>) -> bool {
        self.process_exists(EntityKind::Chain, name, config_path)
    }

    /// Whether a witness is registered under `name` or already uses `config_path`.
    pub fn witness_exists(&self, name: &str, config_path: Option<&Path>) -> bool {
        self.process_exists(EntityKind::Witness, name, config_path)
    }

    /// Whether a bridge is registered under `name`.
    pub fn bridge_exists(&self, name: &str) -> bool {
        self.find_bridge(name).is_some()
    }
}
