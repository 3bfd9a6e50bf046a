//! Durable roster storage.
//!
//! The roster lives in a single JSON file. Reads never fail the caller: a
//! missing, unreadable or corrupt file yields an empty roster (a corrupt
//! file is first copied aside to `<file>.bak`). Writes go to `<file>.tmp`
//! and are renamed over the durable file so an interrupted save never
//! leaves a half-written roster behind.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{StoreConfig, backup_path, temp_path};
use crate::models::{MemberRecord, StoredRoster};
use crate::queries::members as member_queries;

/// Errors raised while writing the roster.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A filesystem operation failed.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The roster could not be encoded as JSON.
    #[error("failed to serialize roster: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// How the roster file was found at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// No data file yet; starting with an empty roster.
    Missing,
    /// The file was read and parsed.
    Loaded,
    /// The file was corrupt. `backup` is where its bytes were copied, or
    /// `None` if the copy failed.
    Recovered { backup: Option<PathBuf> },
    /// The file exists but could not be read (permissions, I/O). Nothing is
    /// backed up; the session runs from an empty roster.
    Unreadable,
}

/// Result of [`load`]: the records plus how they were obtained.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub members: Vec<MemberRecord>,
    pub status: LoadStatus,
}

impl LoadReport {
    fn empty(status: LoadStatus) -> Self {
        Self {
            members: Vec::new(),
            status,
        }
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    members: &'a [MemberRecord],
}

/// Read the roster at `path`.
///
/// Accepts either the `{"members": [...]}` envelope or a bare list. Never
/// returns an error; see [`LoadStatus`] for the fallbacks.
pub fn load(path: &Path) -> LoadReport {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no roster file, starting empty");
            return LoadReport::empty(LoadStatus::Missing);
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "roster file unreadable, starting empty");
            return LoadReport::empty(LoadStatus::Unreadable);
        }
    };

    match serde_json::from_slice::<StoredRoster>(&bytes) {
        Ok(stored) => {
            let members = stored.into_members();
            info!(path = %path.display(), count = members.len(), "loaded roster");
            LoadReport {
                members,
                status: LoadStatus::Loaded,
            }
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "roster file is corrupt, starting empty");
            let backup = match backup_corrupt_file(path) {
                Ok(backup) => Some(backup),
                Err(err) => {
                    warn!(error = %err, "could not back up corrupt roster file");
                    None
                }
            };
            LoadReport::empty(LoadStatus::Recovered { backup })
        }
    }
}

/// Copy the file at `path` byte-for-byte to `<path>.bak`.
///
/// Best-effort: [`load`] logs and otherwise ignores a failure here.
pub fn backup_corrupt_file(path: &Path) -> Result<PathBuf, StoreError> {
    let backup = backup_path(path);
    fs::copy(path, &backup).map_err(|e| StoreError::io("back up", path, e))?;
    info!(backup = %backup.display(), "backed up corrupt roster file");
    Ok(backup)
}

/// Write `members` to `path` inside the `{"members": [...]}` envelope.
///
/// The JSON goes to `<path>.tmp` first and is then renamed over `path`. On
/// failure the temp file is removed (best-effort) and the error returned;
/// the previous contents of `path` are left as they were.
pub fn save(path: &Path, members: &[MemberRecord]) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(&EnvelopeRef { members })?;
    let tmp = temp_path(path);

    if let Err(err) = write_then_replace(&tmp, path, &payload) {
        match fs::remove_file(&tmp) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => debug!(tmp = %tmp.display(), error = %e, "could not remove temp file"),
        }
        return Err(err);
    }

    info!(path = %path.display(), count = members.len(), "saved roster");
    Ok(())
}

fn write_then_replace(tmp: &Path, path: &Path, payload: &[u8]) -> Result<(), StoreError> {
    let mut file = File::create(tmp).map_err(|e| StoreError::io("create", tmp, e))?;
    file.write_all(payload)
        .map_err(|e| StoreError::io("write", tmp, e))?;
    file.sync_all().map_err(|e| StoreError::io("sync", tmp, e))?;
    drop(file);

    fs::rename(tmp, path).map_err(|e| StoreError::io("replace", path, e))
}

// ---------------------------------------------------------------------------
// MemberStore
// ---------------------------------------------------------------------------

/// The working roster: every record in insertion order plus the file it is
/// saved to.
///
/// Owned by the top-level loop and lent to each operation.
#[derive(Debug, Clone)]
pub struct MemberStore {
    path: PathBuf,
    members: Vec<MemberRecord>,
}

impl MemberStore {
    /// Load the roster configured by `config`.
    pub fn open(config: &StoreConfig) -> (Self, LoadStatus) {
        let report = load(&config.data_file);
        let store = Self {
            path: config.data_file.clone(),
            members: report.members,
        };
        (store, report.status)
    }

    /// A store over `members` without touching the filesystem.
    pub fn with_members(path: impl Into<PathBuf>, members: Vec<MemberRecord>) -> Self {
        Self {
            path: path.into(),
            members,
        }
    }

    /// All records in insertion order.
    pub fn members(&self) -> &[MemberRecord] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut MemberRecord> {
        self.members.get_mut(index)
    }

    /// Index of the record whose phone equals `phone` exactly.
    pub fn find_by_phone(&self, phone: &str) -> Option<usize> {
        member_queries::find_by_phone(&self.members, phone)
    }

    /// Append a record. Does not save.
    pub fn push(&mut self, record: MemberRecord) {
        self.members.push(record);
    }

    /// Remove and return the most recently appended record. Does not save.
    pub fn pop(&mut self) -> Option<MemberRecord> {
        self.members.pop()
    }

    /// Write the whole roster to the durable file.
    pub fn save(&self) -> Result<(), StoreError> {
        save(&self.path, &self.members)
    }
}
