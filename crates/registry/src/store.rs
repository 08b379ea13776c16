//! The file-backed registry store.
//!
//! [`ConfigStore`] owns no state of its own: every call loads the document through its
//! [`StorageBackend`], applies the change and writes the whole document back.

use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use tracing::{debug, info, trace};
use xbridge_primitives::types::EntityKind;

use crate::{
    errors::{RegistryError, RegistryResult},
    records::{BridgeRecord, ChainRecord, ProcessRecord, WitnessRecord},
    registry::Registry,
};

/// Persistence strategy for the registry document.
pub trait StorageBackend {
    /// Reads the whole document.
    fn read(&self) -> RegistryResult<Registry>;

    /// Replaces the whole document.
    fn write(&self, registry: &Registry) -> RegistryResult<()>;
}

/// Stores the registry as a pretty-printed JSON file.
///
/// Writes go to a sibling `.tmp` file first and are renamed over the target, so a crash mid-write
/// leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Uses an existing registry file.
    ///
    /// A missing file is an error: a registry that cannot be found cannot be trusted.
    pub fn open(path: impl Into<PathBuf>) -> RegistryResult<Self> {
        let path = path.into();
        if !path.is_file() {
            return Err(RegistryError::Io {
                source: io::Error::new(ErrorKind::NotFound, "registry file does not exist"),
                path,
            });
        }

        Ok(Self { path })
    }

    /// Uses the registry file at `path`, seeding an empty document if nothing exists there yet.
    ///
    /// An existing file is left untouched, even if it turns out to be malformed.
    pub fn create_if_missing(path: impl Into<PathBuf>) -> RegistryResult<Self> {
        let backend = Self { path: path.into() };
        if backend.path.exists() {
            return Ok(backend);
        }

        if let Some(parent) = backend.path.parent() {
            fs::create_dir_all(parent).map_err(|source| RegistryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        info!(path = %backend.path.display(), "initializing empty registry");
        backend.write(&Registry::default())?;

        Ok(backend)
    }

    /// The registry file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self) -> RegistryResult<Registry> {
        let contents = fs::read_to_string(&self.path).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })?;
        trace!(path = %self.path.display(), "read registry file");

        serde_json::from_str(&contents).map_err(|source| RegistryError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, registry: &Registry) -> RegistryResult<()> {
        let json = serde_json::to_string_pretty(registry).map_err(|source| {
            RegistryError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|source| RegistryError::Io {
            path: tmp_path.clone(),
            source,
        })?;

        if let Err(source) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(RegistryError::Io {
                path: self.path.clone(),
                source,
            });
        }
        trace!(path = %self.path.display(), "wrote registry file");

        Ok(())
    }
}

/// What a removal applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveTarget {
    /// Every record named this.
    Name(String),

    /// The whole collection.
    All,
}

impl RemoveTarget {
    /// Builds a target from the `--name` / `--all` pair used on the command line.
    ///
    /// `all` wins when both are given. Giving neither is an error so that a missing name never
    /// turns into "remove everything" or "remove nothing" by accident.
    pub fn from_flags(name: Option<String>, all: bool) -> RegistryResult<Self> {
        match (name, all) {
            (_, true) => Ok(RemoveTarget::All),
            (Some(name), false) => Ok(RemoveTarget::Name(name)),
            (None, false) => Err(RegistryError::InvalidArgument(
                "must specify a name or `--all`".to_string(),
            )),
        }
    }

    /// Whether a record called `name` falls under this target.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            RemoveTarget::Name(target) => target == name,
            RemoveTarget::All => true,
        }
    }
}

/// The registry of chains, witnesses and bridges.
#[derive(Debug, Clone)]
pub struct ConfigStore<B = JsonFileBackend> {
    backend: B,
}

impl<B: StorageBackend> ConfigStore<B> {
    /// Creates a store over `backend`.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Loads the current snapshot.
    pub fn load(&self) -> RegistryResult<Registry> {
        self.backend.read()
    }

    /// Appends a chain or witness record and persists.
    ///
    /// Fails with [`RegistryError::DuplicateEntry`] if the name or configuration file is already
    /// taken within the collection.
    pub fn append_process(&self, kind: EntityKind, record: ProcessRecord) -> RegistryResult<()> {
        self.mutate(|registry| {
            if registry.process_exists(kind, &record.name, Some(&record.config_path)) {
                return Err(RegistryError::DuplicateEntry {
                    kind: kind.as_str(),
                    name: record.name.clone(),
                });
            }

            debug!(%kind, name = %record.name, pid = record.process_id, "registering process");
            registry.processes_mut(kind).push(record);
            Ok(())
        })
    }

    /// Appends a bridge record and persists.
    pub fn append_bridge(&self, record: BridgeRecord) -> RegistryResult<()> {
        self.mutate(|registry| {
            if registry.bridge_exists(&record.name) {
                return Err(RegistryError::DuplicateEntry {
                    kind: "bridge",
                    name: record.name.clone(),
                });
            }

            debug!(name = %record.name, "registering bridge");
            registry.bridges.push(record);
            Ok(())
        })
    }

    /// Removes chain or witness records and persists, returning what was removed.
    pub fn remove_processes(
        &self,
        kind: EntityKind,
        target: &RemoveTarget,
    ) -> RegistryResult<Vec<ProcessRecord>> {
        self.mutate(|registry| {
            let removed = drain_matching(registry.processes_mut(kind), target, |r| &r.name);
            debug!(%kind, count = removed.len(), "removed processes");
            Ok(removed)
        })
    }

    /// Removes bridge records and persists, returning what was removed.
    pub fn remove_bridges(&self, target: &RemoveTarget) -> RegistryResult<Vec<BridgeRecord>> {
        self.mutate(|registry| {
            let removed = drain_matching(&mut registry.bridges, target, |r| &r.name);
            debug!(count = removed.len(), "removed bridges");
            Ok(removed)
        })
    }

    /// Looks up a record of `kind` by name.
    pub fn find_process(&self, kind: EntityKind, name: &str) -> RegistryResult<ProcessRecord> {
        self.load()?
            .find_process(kind, name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                kind: kind.as_str(),
                name: name.to_string(),
            })
    }

    /// Looks up a chain by name.
    pub fn find_chain(&self, name: &str) -> RegistryResult<ChainRecord> {
        self.find_process(EntityKind::Chain, name)
    }

    /// Looks up a witness by name.
    pub fn find_witness(&self, name: &str) -> RegistryResult<WitnessRecord> {
        self.find_process(EntityKind::Witness, name)
    }

    /// Looks up a bridge by name.
    pub fn find_bridge(&self, name: &str) -> RegistryResult<BridgeRecord> {
        self.load()?
            .find_bridge(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                kind: "bridge",
                name: name.to_string(),
            })
    }

    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Registry) -> RegistryResult<T>,
    ) -> RegistryResult<T> {
        let mut registry = self.backend.read()?;
        let output = change(&mut registry)?;
        self.backend.write(&registry)?;

        Ok(output)
    }
}

fn drain_matching<T>(
    records: &mut Vec<T>,
    target: &RemoveTarget,
    name_of: impl Fn(&T) -> &String,
) -> Vec<T> {
    let (removed, kept): (Vec<T>, Vec<T>) = records
        .drain(..)
        .partition(|record| target.matches(name_of(record)));
    *records = kept;

    removed
}
