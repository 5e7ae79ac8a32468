//! High-level secret operations used by the CLI.
//!
//! `Vault` joins the envelope codec and the entry store: plaintext is
//! sealed before it reaches the store and opened after it leaves, so the
//! store only ever sees hex blobs.  Errors from either layer are passed
//! through unchanged; `PwKeeperError::layer` tells them apart.

use std::path::Path;

use zeroize::Zeroizing;

use crate::crypto::{Envelope, MasterPassword};
use crate::errors::{PwKeeperError, Result};

use super::entry::PasswordEntry;
use super::store::EntryStore;

/// The main vault handle.
#[derive(Debug)]
pub struct Vault {
    store: EntryStore,
    envelope: Envelope,
}

impl Vault {
    /// Build a vault over `store` using the default KDF params.
    pub fn new(store: EntryStore) -> Self {
        Self::with_envelope(store, Envelope::default())
    }

    pub fn with_envelope(store: EntryStore, envelope: Envelope) -> Self {
        Self { store, envelope }
    }

    /// Unloaded vault for the storage file at `path`.
    pub fn at_path(path: impl AsRef<Path>) -> Self {
        Self::new(EntryStore::new(path.as_ref()))
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Load the storage file.  Must succeed before any other operation.
    pub fn load(&self) -> Result<()> {
        self.store.load()
    }

    /// Encrypt `plaintext` and store it under `service`.
    pub fn add_secret(
        &self,
        service: &str,
        plaintext: &str,
        master_password: &MasterPassword,
    ) -> Result<()> {
        validate_service_name(service)?;

        // Checked again under the store lock; this one skips the KDF.
        if self.contains(service)? {
            return Err(PwKeeperError::DuplicateService(service.to_string()));
        }

        let blob = self
            .envelope
            .seal(plaintext.as_bytes(), master_password.as_bytes())?;

        self.store.add(PasswordEntry::new(service, blob))
    }

    /// Look up `service` and decrypt its password.
    pub fn get_secret(
        &self,
        service: &str,
        master_password: &MasterPassword,
    ) -> Result<Zeroizing<String>> {
        let entry = self.store.get(service)?;

        let bytes = self
            .envelope
            .open(&entry.password, master_password.as_bytes())?;

        String::from_utf8(bytes).map(Zeroizing::new).map_err(|e| {
            let _bad_bytes = Zeroizing::new(e.into_bytes());
            PwKeeperError::MalformedBlob("decrypted password is not valid UTF-8".into())
        })
    }

    /// Remove the entry for `service`.  No password needed.
    pub fn delete_entry(&self, service: &str) -> Result<()> {
        self.store.delete(service)
    }

    /// Service names in insertion order.
    pub fn list_services(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .map(|e| e.service)
            .collect())
    }

    /// Returns `true` if an entry exists for `service`.
    ///
    /// This is a metadata-only check; nothing is decrypted.
    pub fn contains(&self, service: &str) -> Result<bool> {
        match self.store.get(service) {
            Ok(_) => Ok(true),
            Err(PwKeeperError::ServiceNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Service names must be non-empty and free of whitespace and control
/// characters, since the interactive shell splits commands on whitespace.
pub fn validate_service_name(service: &str) -> Result<()> {
    if service.is_empty() {
        return Err(PwKeeperError::InvalidService(
            "service name cannot be empty".into(),
        ));
    }
    if service.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(PwKeeperError::InvalidService(format!(
            "service name '{}' must not contain whitespace or control characters",
            service.escape_debug()
        )));
    }
    Ok(())
}
