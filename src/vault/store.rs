//! The persisted collection of password entries.
//!
//! `EntryStore` keeps every entry in memory behind one mutex and rewrites
//! the whole storage file after each mutation.  Each public method takes
//! the lock exactly once for its full duration; the persistence helper
//! never locks, it works on the data the caller already holds.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::entry::PasswordEntry;
use super::format;
use crate::errors::{PwKeeperError, Result};

/// Default storage file name.
pub const DEFAULT_STORAGE_FILE: &str = "passwords.json";

/// Lifecycle of the in-memory collection.
#[derive(Debug)]
enum StoreState {
    /// `load` has not succeeded yet.
    Unloaded,
    /// Entries in insertion order.
    Ready(Vec<PasswordEntry>),
}

/// Service-name-keyed entry collection backed by a JSON file.
///
/// Share between threads with `Arc<EntryStore>`.
#[derive(Debug)]
pub struct EntryStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl EntryStore {
    /// Create an unloaded store for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(StoreState::Unloaded),
        }
    }

    /// Returns the path to the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` once `load` has succeeded.
    pub fn is_loaded(&self) -> bool {
        matches!(*self.lock(), StoreState::Ready(_))
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Read the storage file into memory.
    ///
    /// A missing file yields an empty store.  A zero-length file yields an
    /// empty store and is immediately rewritten as `[]`.  On failure the
    /// previous state is left untouched.
    pub fn load(&self) -> Result<()> {
        let mut state = self.lock();

        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "storage file not found, starting empty");
                *state = StoreState::Ready(Vec::new());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        if data.is_empty() {
            warn!(path = %self.path.display(), "storage file is empty, rewriting");
            self.persist(&[])?;
            *state = StoreState::Ready(Vec::new());
            return Ok(());
        }

        let entries = format::decode_entries(&data)?;
        info!(path = %self.path.display(), entries = entries.len(), "password store loaded");
        *state = StoreState::Ready(entries);
        Ok(())
    }

    /// Write the full collection to disk.
    pub fn save(&self) -> Result<()> {
        let mut state = self.lock();
        let entries = ready(&mut state)?;
        self.persist(entries)
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Append an entry and persist.
    ///
    /// Fails with `DuplicateService` if the service is already present.
    /// If the write fails the entry is taken back out, so memory keeps
    /// matching the file.
    pub fn add(&self, entry: PasswordEntry) -> Result<()> {
        let mut state = self.lock();
        let entries = ready(&mut state)?;

        if entries.iter().any(|e| e.service == entry.service) {
            return Err(PwKeeperError::DuplicateService(entry.service));
        }

        let service = entry.service.clone();
        entries.push(entry);
        if let Err(e) = self.persist(entries) {
            entries.pop();
            return Err(e);
        }

        info!(service = %service, total = entries.len(), "entry added");
        Ok(())
    }

    /// Look up the entry for `service` (exact, case-sensitive match).
    pub fn get(&self, service: &str) -> Result<PasswordEntry> {
        let mut state = self.lock();
        let entries = ready(&mut state)?;

        entries
            .iter()
            .find(|e| e.service == service)
            .cloned()
            .ok_or_else(|| PwKeeperError::ServiceNotFound(service.to_string()))
    }

    /// Remove the entry for `service` and persist.
    ///
    /// An absent service fails with `ServiceNotFound` without touching
    /// the file.
    pub fn delete(&self, service: &str) -> Result<()> {
        let mut state = self.lock();
        let entries = ready(&mut state)?;

        let index = entries
            .iter()
            .position(|e| e.service == service)
            .ok_or_else(|| PwKeeperError::ServiceNotFound(service.to_string()))?;

        let removed = entries.remove(index);
        if let Err(e) = self.persist(entries) {
            entries.insert(index, removed);
            return Err(e);
        }

        info!(service = %service, total = entries.len(), "entry deleted");
        Ok(())
    }

    /// Snapshot of all entries in insertion order.
    pub fn list(&self) -> Result<Vec<PasswordEntry>> {
        let mut state = self.lock();
        Ok(ready(&mut state)?.clone())
    }

    /// Number of entries.
    pub fn len(&self) -> Result<usize> {
        let mut state = self.lock();
        Ok(ready(&mut state)?.len())
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Acquire the store lock.
    ///
    /// Mutations roll back on failure, so the state behind a poisoned
    /// lock is still consistent and is reused.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serialize and write `entries`.  Callers must hold the lock.
    fn persist(&self, entries: &[PasswordEntry]) -> Result<()> {
        let data = format::encode_entries(entries)?;
        format::write_atomic(&self.path, &data)?;
        debug!(path = %self.path.display(), entries = entries.len(), "password store saved");
        Ok(())
    }
}

fn ready(state: &mut StoreState) -> Result<&mut Vec<PasswordEntry>> {
    match state {
        StoreState::Ready(entries) => Ok(entries),
        StoreState::Unloaded => Err(PwKeeperError::StoreNotLoaded),
    }
}
