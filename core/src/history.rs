//! Transaction history persistence.
//!
//! The history is a single JSON array, newest transaction first. It is always
//! rewritten whole; there is no incremental append on disk.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use parkir_types::{TransactionId, TransactionRecord};
use parkir_utils::Durability;

const CORRUPT_SUFFIX: &str = ".corrupt";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to write history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode history: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Owner of the on-disk history file.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the first malformed history file is moved by
    /// [`HistoryStore::load`]. Later ones get `.1`, `.2`, ... appended.
    #[must_use]
    pub fn quarantine_path(&self) -> PathBuf {
        self.quarantine_slot(0)
    }

    fn quarantine_slot(&self, n: u32) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("history"), OsString::from);
        name.push(CORRUPT_SUFFIX);
        if n > 0 {
            name.push(format!(".{n}"));
        }
        self.path.with_file_name(name)
    }

    /// Read every stored transaction.
    ///
    /// Never fails: a missing file is an empty history, and an unreadable or
    /// malformed file is logged and also treated as empty. A malformed file is
    /// moved to [`HistoryStore::quarantine_path`] first so the next save does
    /// not overwrite the only copy.
    #[must_use]
    pub fn load(&self) -> Vec<TransactionRecord> {
        parkir_utils::recover_bak_file(&self.path);

        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file yet, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), "Failed to read history, starting empty: {e}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<TransactionRecord>>(&json) {
            Ok(records) => {
                info!(
                    path = %self.path.display(),
                    count = records.len(),
                    "Loaded transaction history"
                );
                records
            }
            Err(e) => {
                warn!(path = %self.path.display(), "Malformed history file, starting empty: {e}");
                self.quarantine();
                Vec::new()
            }
        }
    }

    /// Move the file to the first unused quarantine slot. Earlier copies are
    /// never overwritten.
    fn quarantine(&self) {
        let Some(target) = (0..u32::MAX)
            .map(|n| self.quarantine_slot(n))
            .find(|slot| !slot.exists())
        else {
            warn!(path = %self.path.display(), "No free slot for malformed history");
            return;
        };
        match fs::rename(&self.path, &target) {
            Ok(()) => warn!(
                path = %target.display(),
                "Moved malformed history aside"
            ),
            Err(e) => warn!(
                path = %self.path.display(),
                "Failed to move malformed history aside: {e}"
            ),
        }
    }

    /// Overwrite the history file with `records`.
    ///
    /// Creates the parent directory if needed. Output is pretty-printed with
    /// four-space indentation.
    pub fn save(&self, records: &[TransactionRecord]) -> Result<(), HistoryError> {
        let io_err = |source: io::Error| HistoryError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut serializer)?;

        parkir_utils::atomic_write_with(&self.path, &buf, Durability::Synced).map_err(io_err)?;

        debug!(
            path = %self.path.display(),
            count = records.len(),
            "Saved transaction history"
        );
        Ok(())
    }

    /// Highest id in `records`, or [`TransactionId::ZERO`] when empty.
    ///
    /// The registry increments this before every assignment.
    #[must_use]
    pub fn last_id(records: &[TransactionRecord]) -> TransactionId {
        records
            .iter()
            .map(|record| record.id)
            .max()
            .unwrap_or(TransactionId::ZERO)
    }
}
