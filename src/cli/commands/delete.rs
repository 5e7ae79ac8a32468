//! `pwkeeper delete`: remove a service's entry.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::config::Settings;
use crate::errors::{PwKeeperError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, settings: &Settings, service: &str, force: bool) -> Result<()> {
    let vault = open_vault(cli, settings)?;

    if !vault.contains(service)? {
        return Err(PwKeeperError::ServiceNotFound(service.to_string()));
    }

    // Unless --force is set (or confirmation is disabled), ask first.
    if settings.confirm_delete && !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete the password for '{service}'?"))
            .default(false)
            .interact()
            .map_err(|e| PwKeeperError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    vault.delete_entry(service)?;
    output::success(&format!("Deleted entry '{service}'"));

    Ok(())
}
