//! `pwkeeper add`: store a password for a new service.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, prompt_master_password, Cli};
use crate::config::Settings;
use crate::errors::{PwKeeperError, Result};

/// Execute the `add` command.
pub fn execute(cli: &Cli, settings: &Settings, service: &str, value: Option<&str>) -> Result<()> {
    let vault = open_vault(cli, settings)?;

    if vault.contains(service)? {
        return Err(PwKeeperError::DuplicateService(service.to_string()));
    }

    let master_password = prompt_master_password()?;

    // Determine the password from one of three sources.
    let secret = if let Some(v) = value {
        // Source 1: Inline value on the command line.
        output::warning("Password provided on command line; it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed);
        buf
    } else {
        // Source 3: Interactive hidden prompt (default).
        Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt(format!("Enter password for {service}"))
                .with_confirmation("Confirm password", "Passwords do not match, try again")
                .interact()
                .map_err(|e| PwKeeperError::CommandFailed(format!("input prompt: {e}")))?,
        )
    };

    vault.add_secret(service, &secret, &master_password)?;

    output::success(&format!(
        "Password for '{service}' added to {}",
        vault.store().path().display()
    ));
    output::tip(&format!("Retrieve it with: pwkeeper get {service}"));

    Ok(())
}
