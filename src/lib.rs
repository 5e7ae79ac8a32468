pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod vault;

pub use crypto::{Envelope, KdfParams, MasterPassword};
pub use errors::{PwKeeperError, Result};
pub use vault::{EntryStore, PasswordEntry, Vault};
