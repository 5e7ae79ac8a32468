//! `pwkeeper list`: show every stored service name.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `list` command.  No password is needed; names are stored
/// in the clear.
pub fn execute(cli: &Cli, settings: &Settings) -> Result<()> {
    let vault = open_vault(cli, settings)?;
    let services = vault.list_services()?;

    output::print_services_table(&services);

    Ok(())
}
