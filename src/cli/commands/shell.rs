//! `pwkeeper shell`: the interactive session (also the default command).

use std::io;

use tracing::info;

use crate::cli::shell::{SecretInput, Shell};
use crate::cli::{open_vault, prompt_master_password, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `shell` command.
///
/// The store is loaded before the password prompt, so a broken storage
/// file is reported without asking for anything.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let vault = open_vault(cli, settings)?;
    let master_password = prompt_master_password()?;

    info!(path = %vault.store().path().display(), "interactive session started");

    let shell = Shell::new(&vault, &master_password, SecretInput::detect());
    shell.run(io::stdin().lock(), io::stdout().lock())
}
