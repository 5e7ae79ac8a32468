//! Interactive `pwkeeper>` session.
//!
//! The shell reads one command per line, runs it against the vault with
//! the session's master password, prints the outcome, and keeps going.
//! Command failures are reported and never end the session; only `exit`,
//! `quit`, or end of input do.

use std::io::{self, BufRead, ErrorKind, Write};

use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::MasterPassword;
use crate::errors::{PwKeeperError, Result};
use crate::vault::Vault;

/// Prompt printed before each command.
pub const PROMPT: &str = "pwkeeper> ";

/// A parsed shell line.
#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand<'a> {
    Add(&'a str),
    Get(&'a str),
    Delete(&'a str),
    List,
    Help,
    Exit,
    /// Known command with a missing argument; carries the usage line.
    Usage(&'static str),
    Unknown(String),
    Empty,
}

/// Parse one input line.  Command words are case-insensitive; service
/// names are taken verbatim.
pub fn parse_line(line: &str) -> ShellCommand<'_> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return ShellCommand::Empty;
    };
    let arg = words.next();

    match (command.to_lowercase().as_str(), arg) {
        ("add", Some(service)) => ShellCommand::Add(service),
        ("add", None) => ShellCommand::Usage("Usage: add <service>"),
        ("get", Some(service)) => ShellCommand::Get(service),
        ("get", None) => ShellCommand::Usage("Usage: get <service>"),
        ("delete", Some(service)) => ShellCommand::Delete(service),
        ("delete", None) => ShellCommand::Usage("Usage: delete <service>"),
        ("list", _) => ShellCommand::List,
        ("help", _) => ShellCommand::Help,
        ("exit" | "quit", _) => ShellCommand::Exit,
        (other, _) => ShellCommand::Unknown(other.to_string()),
    }
}

/// Where `add` reads the new password from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretInput {
    /// Hidden terminal prompt.
    Terminal,
    /// The next line of the shell's own input (piped sessions).
    Inline,
}

impl SecretInput {
    /// `Terminal` when stdin is a terminal, `Inline` otherwise.
    pub fn detect() -> Self {
        use std::io::IsTerminal;
        if io::stdin().is_terminal() {
            SecretInput::Terminal
        } else {
            SecretInput::Inline
        }
    }
}

/// An interactive session bound to one vault and master password.
pub struct Shell<'a> {
    vault: &'a Vault,
    master_password: &'a MasterPassword,
    secret_input: SecretInput,
}

impl<'a> Shell<'a> {
    pub fn new(
        vault: &'a Vault,
        master_password: &'a MasterPassword,
        secret_input: SecretInput,
    ) -> Self {
        Self {
            vault,
            master_password,
            secret_input,
        }
    }

    /// Run until `exit`/`quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut out: W) -> Result<()> {
        let mut line = String::new();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            line.clear();
            match input.read_line(&mut line) {
                Ok(0) => {
                    writeln!(out)?;
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    writeln!(out, "Error reading input: {e}")?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }

            let command = parse_line(&line);
            if command == ShellCommand::Exit {
                writeln!(out, "Exiting...")?;
                return Ok(());
            }

            if let Err(e) = self.dispatch(command, &mut input, &mut out) {
                debug!(layer = %e.layer(), error = %e, "shell command failed");
                writeln!(out, "Error: {e}")?;
            }
        }
    }

    fn dispatch<R: BufRead, W: Write>(
        &self,
        command: ShellCommand<'_>,
        input: &mut R,
        out: &mut W,
    ) -> Result<()> {
        match command {
            ShellCommand::Add(service) => {
                let secret = self.read_secret(service, input, out)?;
                self.vault
                    .add_secret(service, &secret, self.master_password)?;
                writeln!(out, "Password added successfully.")?;
            }
            ShellCommand::Get(service) => {
                let secret = self.vault.get_secret(service, self.master_password)?;
                writeln!(out, "Password for {service}: {}", secret.as_str())?;
            }
            ShellCommand::Delete(service) => {
                self.vault.delete_entry(service)?;
                writeln!(out, "Entry deleted successfully.")?;
            }
            ShellCommand::List => {
                let services = self.vault.list_services()?;
                if services.is_empty() {
                    writeln!(out, "No entries found.")?;
                } else {
                    writeln!(out, "Services:")?;
                    for service in services {
                        writeln!(out, "- {service}")?;
                    }
                }
            }
            ShellCommand::Help => write_help(out)?,
            ShellCommand::Usage(usage) => writeln!(out, "{usage}")?,
            ShellCommand::Unknown(_) => {
                writeln!(out, "Unknown command. Type 'help' for available commands.")?
            }
            ShellCommand::Empty | ShellCommand::Exit => {}
        }
        Ok(())
    }

    fn read_secret<R: BufRead, W: Write>(
        &self,
        service: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<Zeroizing<String>> {
        match self.secret_input {
            SecretInput::Terminal => {
                let pw = dialoguer::Password::new()
                    .with_prompt(format!("Enter password for {service}"))
                    .allow_empty_password(true)
                    .interact()
                    .map_err(|e| PwKeeperError::CommandFailed(format!("password prompt: {e}")))?;
                Ok(Zeroizing::new(pw))
            }
            SecretInput::Inline => {
                write!(out, "Enter password for {service}: ")?;
                out.flush()?;
                let mut buf = Zeroizing::new(String::new());
                if input.read_line(&mut buf)? == 0 {
                    writeln!(out)?;
                    return Err(PwKeeperError::UserCancelled);
                }
                writeln!(out)?;
                let trimmed = buf.trim_end_matches(['\r', '\n']).len();
                buf.truncate(trimmed);
                Ok(buf)
            }
        }
    }
}

fn write_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Available commands:")?;
    writeln!(out, "  add <service>    - Add a new password for a service")?;
    writeln!(out, "  get <service>    - Retrieve the password for a service")?;
    writeln!(out, "  delete <service> - Delete the password entry for a service")?;
    writeln!(out, "  list             - List all services")?;
    writeln!(out, "  help             - Show this help message")?;
    writeln!(out, "  exit, quit       - Exit the shell")
}
