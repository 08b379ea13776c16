//! Filesystem helpers.

use std::path::{Path, PathBuf};

/// The document an empty registry serializes to.
pub const EMPTY_REGISTRY: &str = r#"{"chains":[],"witnesses":[],"bridges":[]}"#;

/// Writes `contents` to `dir/name` and returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("must be able to write fixture file");

    path
}

/// Writes a shell script to `dir/name` and marks it executable.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = write_file(dir, name, &format!("#!/bin/sh\n{body}\n"));
    let mut permissions = std::fs::metadata(&path)
        .expect("fixture script must exist")
        .permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).expect("must be able to chmod fixture script");

    path
}
