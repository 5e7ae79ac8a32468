//! `pwkeeper get`: decrypt and print one service's password.

use crate::cli::{open_vault, prompt_master_password, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, settings: &Settings, service: &str) -> Result<()> {
    let vault = open_vault(cli, settings)?;

    // Fail on an unknown service before asking for the password.
    let _ = vault.store().get(service)?;

    let master_password = prompt_master_password()?;
    let password = vault.get_secret(service, &master_password)?;
    println!("{}", password.as_str());

    Ok(())
}
