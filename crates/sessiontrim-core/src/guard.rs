//! Backup-then-overwrite persistence

use crate::CompactError;
use sessiontrim_session::{write_events, Event};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Sibling backup location: the file name with `.bak` appended
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

/// Back up `path`, then replace it with `events`
///
/// The original is not touched unless the backup copy succeeded, and the
/// replacement goes through a temp file + rename.
pub fn persist(path: &Path, events: &[Event]) -> Result<PathBuf, CompactError> {
    let backup = backup_path(path);
    std::fs::copy(path, &backup).map_err(|source| CompactError::Io {
        action: "back up",
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(backup = %backup.display(), "backed up session");

    write_events(path, events).map_err(|source| CompactError::Io {
        action: "write",
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), records = events.len(), "wrote compacted session");

    Ok(backup)
}
