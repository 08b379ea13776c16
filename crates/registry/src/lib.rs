//! The durable registry of supervised chains, witnesses and configured bridges.
//!
//! The registry is a single JSON document holding three ordered collections. Every mutation is a
//! full read-modify-write of that document through a [`store::StorageBackend`], so the file on
//! disk is always the source of truth. Invocations from independent processes are not
//! coordinated: the last writer wins.
//!
//! Existence checks used as command preconditions live on the [`registry::Registry`] snapshot
//! (see [`resolver`]). They are advisory: nothing is reserved between the check and the write.

pub mod errors;
pub mod records;
pub mod registry;
pub mod resolver;
pub mod store;
pub mod witness;

pub use errors::{RegistryError, RegistryResult};
pub use records::{BridgeRecord, ChainRecord, ProcessRecord, WitnessRecord};
pub use registry::Registry;
pub use store::{ConfigStore, JsonFileBackend, RemoveTarget, StorageBackend};
pub use witness::WitnessBridgeConfig;
