//! Self-describing encrypted blobs.
//!
//! An envelope turns a plaintext secret plus the master password into a
//! single hex string that holds everything needed to reverse it except
//! the password:
//!
//! ```text
//! hex( salt: 16 bytes | nonce: 12 bytes | ciphertext | tag: 16 bytes )
//! ```
//!
//! A new salt is drawn for every seal, so every blob is encrypted under
//! its own derived key and nonces never repeat under one key.

use tracing::trace;

use super::encryption::{self, NONCE_LEN, TAG_LEN};
use super::kdf::{self, KdfParams, SALT_LEN};
use crate::errors::{PwKeeperError, Result};

/// Smallest possible decoded blob (empty plaintext).
pub const MIN_BLOB_LEN: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

/// Seals and opens envelopes with a fixed set of KDF params.
#[derive(Debug, Clone, Copy, Default)]
pub struct Envelope {
    params: KdfParams,
}

impl Envelope {
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &KdfParams {
        &self.params
    }

    /// Encrypt `plaintext` under a key derived from `master_password`.
    ///
    /// Returns the lowercase hex encoding of `salt || nonce || ciphertext+tag`.
    pub fn seal(&self, plaintext: &[u8], master_password: &[u8]) -> Result<String> {
        let salt = kdf::generate_salt()?;
        let key = kdf::derive_key(master_password, &salt, &self.params)?;

        let sealed = encryption::encrypt(key.as_slice(), plaintext)?;

        let mut combined = Vec::with_capacity(SALT_LEN + sealed.len());
        combined.extend_from_slice(&salt);
        combined.extend_from_slice(&sealed);

        trace!(bytes = combined.len(), "sealed envelope");
        Ok(hex::encode(combined))
    }

    /// Decrypt a blob produced by `seal`.
    ///
    /// A failed tag check is the only signal for a wrong master password;
    /// it cannot be told apart from tampered data.
    pub fn open(&self, blob: &str, master_password: &[u8]) -> Result<Vec<u8>> {
        let combined = hex::decode(blob)
            .map_err(|e| PwKeeperError::MalformedBlob(format!("invalid hex: {e}")))?;

        if combined.len() < SALT_LEN {
            return Err(PwKeeperError::MalformedBlob(format!(
                "blob is {} bytes, shorter than the {SALT_LEN}-byte salt",
                combined.len()
            )));
        }

        let (salt, sealed) = combined.split_at(SALT_LEN);
        if sealed.len() < NONCE_LEN {
            return Err(PwKeeperError::MalformedBlob(format!(
                "blob has no room for the {NONCE_LEN}-byte nonce"
            )));
        }

        let key = kdf::derive_key(master_password, salt, &self.params)?;
        let plaintext = encryption::decrypt(key.as_slice(), sealed)?;

        trace!(bytes = combined.len(), "opened envelope");
        Ok(plaintext)
    }
}

/// Seal with the default KDF params.
pub fn seal(plaintext: &[u8], master_password: &[u8]) -> Result<String> {
    Envelope::default().seal(plaintext, master_password)
}

/// Open with the default KDF params.
pub fn open(blob: &str, master_password: &[u8]) -> Result<Vec<u8>> {
    Envelope::default().open(blob, master_password)
}
