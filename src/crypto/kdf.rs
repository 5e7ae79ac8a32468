//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! Every encrypted blob carries its own random salt, so a fresh key is
//! derived for each encryption.  The iteration count is the work factor
//! against offline guessing of the master password.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::errors::{PwKeeperError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Lowest iteration count we accept.
const MIN_ITERATIONS: u32 = 1_000;

/// PBKDF2 parameters.
///
/// Blobs do not record the iteration count, so the same params must be
/// used to seal and to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Derive a 32-byte key from a password and salt.
///
/// The same password + salt + params always produce the same key.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    params: &KdfParams,
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    if params.iterations < MIN_ITERATIONS {
        return Err(PwKeeperError::Crypto(format!(
            "PBKDF2 iterations must be at least {MIN_ITERATIONS} (got {})",
            params.iterations
        )));
    }

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(password, salt, params.iterations, key.as_mut_slice());
    Ok(key)
}

/// Generate a cryptographically random salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| PwKeeperError::Crypto(format!("random salt generation failed: {e}")))?;
    Ok(salt)
}
