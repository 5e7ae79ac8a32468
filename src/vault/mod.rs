//! Vault module: encrypted password storage.
//!
//! This module provides:
//! - The `PasswordEntry` record (`entry`)
//! - JSON file encoding and atomic writes (`format`)
//! - The locked, persisted `EntryStore` (`store`)
//! - The `Vault` facade that encrypts on the way in and decrypts on the way out (`facade`)

pub mod entry;
pub mod facade;
pub mod format;
pub mod store;

pub use entry::PasswordEntry;
pub use facade::{validate_service_name, Vault};
pub use store::{EntryStore, DEFAULT_STORAGE_FILE};
