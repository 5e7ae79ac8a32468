//! Cryptographic primitives for pwkeeper.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Hex-encoded `salt || nonce || ciphertext` blobs (`envelope`)
//! - The zeroizing `MasterPassword` holder (`master`)

pub mod encryption;
pub mod envelope;
pub mod kdf;
pub mod master;

pub use envelope::{open, seal, Envelope};
pub use kdf::{derive_key, generate_salt, KdfParams};
pub use master::MasterPassword;
