//! Crash-safe replacement of small files.
//!
//! The new contents are written to a temp file beside the target and renamed
//! over it, so a reader sees either the old file or the new one. Where the
//! platform refuses to rename over an existing file, the old file is first
//! moved to `<name>.bak`; [`recover_bak_file`] puts it back if the process
//! died between the two renames.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, PersistError};
use tracing::{debug, warn};

/// How hard to push the bytes to disk before reporting success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Durability {
    /// `fsync` the file, then make a best-effort `fsync` of its directory.
    #[default]
    Synced,
    /// Rename only. Enough for tests and throwaway files.
    Relaxed,
}

/// Sibling used while swapping files on platforms without rename-over.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("file"), OsString::from);
    name.push(".bak");
    path.with_file_name(name)
}

/// Restore `<name>.bak` if `path` is missing.
///
/// Returns `true` when a backup was moved back into place.
pub fn recover_bak_file(path: &Path) -> bool {
    let backup = backup_path(path);
    if path.exists() || !backup.exists() {
        return false;
    }
    match fs::rename(&backup, path) {
        Ok(()) => {
            warn!(path = %path.display(), "Restored file from interrupted write");
            true
        }
        Err(e) => {
            warn!(path = %backup.display(), "Failed to restore backup: {e}");
            false
        }
    }
}

/// Replace `path` with `bytes`, fully synced.
pub fn atomic_write(path: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    atomic_write_with(path, bytes, Durability::Synced)
}

/// Replace `path` with `bytes`.
///
/// The parent directory must already exist.
pub fn atomic_write_with(
    path: impl AsRef<Path>,
    bytes: &[u8],
    durability: Durability,
) -> io::Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    if durability == Durability::Synced {
        tmp.as_file().sync_all()?;
    }

    if let Err(refused) = tmp.persist(path) {
        swap_through_backup(refused, path)?;
    }

    if durability == Durability::Synced {
        sync_dir(dir);
    }
    debug!(path = %path.display(), bytes = bytes.len(), "Replaced file");
    Ok(())
}

/// Second attempt after a refused rename: park the old file as `.bak`, move
/// the temp file in, then drop the backup. The old file is put back if the
/// second rename also fails.
fn swap_through_backup(refused: PersistError, path: &Path) -> io::Result<()> {
    if !path.exists() {
        return Err(refused.error);
    }
    let backup = backup_path(path);
    let _ = fs::remove_file(&backup);
    fs::rename(path, &backup)?;

    if let Err(second) = refused.file.persist(path) {
        let _ = fs::rename(&backup, path);
        return Err(second.error);
    }
    if let Err(e) = fs::remove_file(&backup) {
        warn!(path = %backup.display(), "Failed to remove backup: {e}");
    }
    Ok(())
}

fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    {
        if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
            debug!(path = %dir.display(), "Directory sync skipped: {e}");
        }
    }

    #[cfg(not(unix))]
    let _ = dir;
}
