//! JSONL I/O and atomic file operations

use crate::{Event, SessionError};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

/// Read every record of a session transcript, in file order
///
/// Blank lines are skipped. Any malformed line fails the whole read.
pub fn read_events(path: &Path) -> Result<Vec<Event>, SessionError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => SessionError::NotFound {
            path: path.to_path_buf(),
        },
        _ => SessionError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let reader = BufReader::new(file);
    let mut events = Vec::new();

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let mut raw = raw.map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        let line = String::from_utf8(raw).map_err(|e| SessionError::Parse {
            path: path.to_path_buf(),
            line: idx + 1,
            reason: e.to_string(),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let event = Event::from_line(&line).map_err(|reason| SessionError::Parse {
            path: path.to_path_buf(),
            line: idx + 1,
            reason,
        })?;
        events.push(event);
    }

    Ok(events)
}

/// Replace a transcript with the given records, one per line
pub fn write_events(path: &Path, events: &[Event]) -> std::io::Result<()> {
    let mut data = String::new();
    for event in events {
        data.push_str(&event.to_line()?);
        data.push('\n');
    }
    atomic_write(path, data.as_bytes())
}

/// Write data atomically using temp file + rename
///
/// An existing file keeps its permissions. The temp file is removed if
/// anything fails.
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path(path);
    let result = write_then_rename(path, &temp_path, data);
    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}

fn write_then_rename(path: &Path, temp_path: &Path, data: &[u8]) -> std::io::Result<()> {
    let permissions = match std::fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    std::fs::write(temp_path, data)?;
    if let Some(permissions) = permissions {
        std::fs::set_permissions(temp_path, permissions)?;
    }
    std::fs::rename(temp_path, path)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
