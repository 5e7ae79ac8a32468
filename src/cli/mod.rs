//! CLI module: Clap argument parser, output helpers, the interactive
//! shell, and command implementations.

pub mod commands;
pub mod output;
pub mod shell;

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::config::Settings;
use crate::crypto::MasterPassword;
use crate::errors::{PwKeeperError, Result};
use crate::vault::Vault;

/// Environment variable that supplies the master password non-interactively.
pub const PASSWORD_ENV: &str = "PWKEEPER_PASSWORD";

/// pwkeeper: local encrypted password keeper.
#[derive(Parser)]
#[command(
    name = "pwkeeper",
    about = "Local encrypted password keeper",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Storage file (default: passwords.json, or `storage_file` in .pwkeeper.toml)
    #[arg(short, long, global = true)]
    pub file: Option<String>,
}

/// All available subcommands.  Without one, the interactive shell starts.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a password for a new service
    Add {
        /// Service name (e.g. github)
        service: String,
        /// Password (omit for interactive prompt or piped stdin)
        value: Option<String>,
    },

    /// Print the password for a service
    Get {
        /// Service name
        service: String,
    },

    /// Delete the entry for a service
    Delete {
        /// Service name
        service: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// List all services
    List,

    /// Start the interactive shell (default)
    Shell,

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.pwkeeper.toml` from the working directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Resolve the storage file: `--file` wins over the config file.
pub fn storage_path(cli: &Cli, settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match &cli.file {
        Some(file) => cwd.join(file),
        None => settings.storage_path(&cwd),
    })
}

/// Build the vault and load its storage file.
///
/// A load failure is fatal for every command.
pub fn open_vault(cli: &Cli, settings: &Settings) -> Result<Vault> {
    let path = storage_path(cli, settings)?;
    debug!(path = %path.display(), "opening password store");
    let vault = Vault::at_path(&path);
    vault.load()?;
    Ok(vault)
}

/// Get the master password, trying in order:
/// 1. `PWKEEPER_PASSWORD` env var (scripts/CI)
/// 2. Interactive hidden prompt
pub fn prompt_master_password() -> Result<MasterPassword> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(MasterPassword::from(pw.as_str()));
        }
    }

    let pw = zeroize::Zeroizing::new(
        dialoguer::Password::new()
            .with_prompt("Enter master password")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| PwKeeperError::CommandFailed(format!("password prompt: {e}")))?,
    );
    Ok(MasterPassword::from(pw.as_str()))
}
