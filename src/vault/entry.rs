//! The record stored for each service.

use serde::{Deserialize, Serialize};

/// A single service → encrypted password record.
///
/// The store treats `password` as opaque text; it is the hex envelope
/// produced by `crypto::envelope`, never plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordEntry {
    /// Unique, case-sensitive service name (e.g. "github").
    pub service: String,

    /// Hex-encoded encrypted blob.
    pub password: String,
}

impl PasswordEntry {
    pub fn new(service: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            password: password.into(),
        }
    }
}
