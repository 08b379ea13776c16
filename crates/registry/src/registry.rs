//! The in-memory snapshot of the registry document.

use serde::{Deserialize, Serialize};
use xbridge_primitives::types::EntityKind;

use crate::records::{BridgeRecord, ChainRecord, ProcessRecord, WitnessRecord};

/// One consistent view of everything the control plane knows about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Running chains, in start order.
    pub chains: Vec<ChainRecord>,

    /// Running witnesses, in start order.
    pub witnesses: Vec<WitnessRecord>,

    /// Configured bridges, in build order.
    pub bridges: Vec<BridgeRecord>,
}

impl Registry {
    /// The collection holding records of `kind`.
    pub fn processes(&self, kind: EntityKind) -> &[ProcessRecord] {
        match kind {
            EntityKind::Chain => &self.chains,
            EntityKind::Witness => &self.witnesses,
        }
    }

    pub(crate) fn processes_mut(&mut self, kind: EntityKind) -> &mut Vec<ProcessRecord> {
        match kind {
            EntityKind::Chain => &mut self.chains,
            EntityKind::Witness => &mut self.witnesses,
        }
    }

    /// First record of `kind` named `name`.
    pub fn find_process(&self, kind: EntityKind, name: &str) -> Option<&ProcessRecord> {
        self.processes(kind).iter().find(|record| record.name == name)
    }

    /// First chain named `name`.
    pub fn find_chain(&self, name: &str) -> Option<&ChainRecord> {
        self.find_process(EntityKind::Chain, name)
    }

    /// First witness named `name`.
    pub fn find_witness(&self, name: &str) -> Option<&WitnessRecord> {
        self.find_process(EntityKind::Witness, name)
    }

    /// First bridge named `name`.
    pub fn find_bridge(&self, name: &str) -> Option<&BridgeRecord> {
        self.bridges.iter().find(|bridge| bridge.name == name)
    }

    /// Whether nothing at all is registered.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty() && self.witnesses.is_empty() && self.bridges.is_empty()
    }
}
