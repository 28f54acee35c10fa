//! JSON codec and durable file writes for the store.
//!
//! The I/O helpers here are blocking and must run on the blocking pool.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use people_core::Person;

use super::{Result, StoreError};

/// Encode a snapshot as pretty-printed JSON.
pub(super) fn encode(people: &[Person]) -> Result<String> {
    serde_json::to_string_pretty(people).map_err(StoreError::Encode)
}

/// Decode file contents. Blank text is an empty dataset.
pub(super) fn decode(path: &Path, text: &str) -> Result<Vec<Person>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Size of the file in bytes, or `None` when it does not exist.
pub(super) fn file_len(path: &Path) -> io::Result<Option<u64>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.len())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Read the file as UTF-8, treating a missing file as empty.
pub(super) fn read_text(path: &Path) -> io::Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err),
    }
}

/// Replace `path` with `contents` via a sibling temp file.
///
/// The temp file is renamed over the target. When the rename is refused
/// (e.g. across devices) the temp file is copied over the target and removed,
/// which leaves a short non-atomic window.
pub(super) fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path(path);
    let result = write_temp(&temp_path, contents).and_then(|()| replace(&temp_path, path));
    if result.is_err() {
        // Best effort; the write error is returned either way.
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn write_temp(temp_path: &Path, contents: &str) -> io::Result<()> {
    let mut temp = File::create(temp_path)?;
    temp.write_all(contents.as_bytes())?;
    temp.sync_all()
}

fn replace(temp_path: &Path, path: &Path) -> io::Result<()> {
    if let Err(err) = fs::rename(temp_path, path) {
        tracing::warn!(
            "Atomic rename to {} failed ({}); falling back to copy",
            path.display(),
            err
        );
        fs::copy(temp_path, path)?;
        fs::remove_file(temp_path)?;
    }
    Ok(())
}

/// `<dir>/<file-name>.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
