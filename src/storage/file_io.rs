//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::RolodexError;

/// Read JSON from a file, returning a default value if file doesn't exist
///
/// A file that exists but does not parse yields [`RolodexError::Json`], so
/// callers can tell a damaged file apart from an unreadable one.
pub fn read_json<T, P>(path: P) -> Result<T, RolodexError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => {
            RolodexError::Permission(format!("Cannot read from: {}", path.display()))
        }
        _ => RolodexError::Storage(format!("Failed to open {}: {}", path.display(), e)),
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| RolodexError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Fail with [`RolodexError::Permission`] if `dir` exists but is read-only
pub fn ensure_writable<P: AsRef<Path>>(dir: P) -> Result<(), RolodexError> {
    let dir = dir.as_ref();
    match fs::metadata(dir) {
        Ok(meta) if meta.permissions().readonly() => Err(RolodexError::Permission(format!(
            "Cannot write to: {}",
            dir.display()
        ))),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), RolodexError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let io_err = |what: &str, e: std::io::Error| match e.kind() {
        ErrorKind::PermissionDenied => {
            RolodexError::Permission(format!("Cannot write to: {}", path.display()))
        }
        _ => RolodexError::Storage(format!("{}: {}", what, e)),
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err("Failed to create directory", e))?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| io_err("Failed to create temp file", e))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| RolodexError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| io_err("Failed to flush data", e))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| io_err("Failed to sync data", e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        io_err("Failed to rename temp file", e)
    })?;

    Ok(())
}

/// Copy a damaged file aside so a later save cannot overwrite it
///
/// Returns the path of the copy (`<file>.corrupt-<timestamp>`). If an
/// earlier copy with identical contents exists, that copy is returned and
/// no new one is made.
pub fn quarantine<P: AsRef<Path>>(path: P) -> Result<PathBuf, RolodexError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string());
    let prefix = format!("{}.corrupt-", file_name);

    let contents = fs::read(path).map_err(|e| {
        RolodexError::Storage(format!("Failed to read {}: {}", path.display(), e))
    })?;
    if let Some(existing) = find_identical_copy(path, &prefix, &contents) {
        return Ok(existing);
    }

    let target = path.with_file_name(format!(
        "{}{}",
        prefix,
        Local::now().format("%Y%m%d-%H%M%S")
    ));

    fs::write(&target, &contents).map_err(|e| {
        RolodexError::Storage(format!(
            "Failed to copy {} to {}: {}",
            path.display(),
            target.display(),
            e
        ))
    })?;

    Ok(target)
}

fn find_identical_copy(path: &Path, prefix: &str, contents: &[u8]) -> Option<PathBuf> {
    let dir = path.parent()?;
    fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
        .map(|entry| entry.path())
        .find(|candidate| fs::read(candidate).is_ok_and(|bytes| bytes == contents))
}
