//! `pwkeeper completions <shell>`: print a completion script to stdout.
//!
//! ```text
//! pwkeeper completions bash > ~/.local/share/bash-completion/completions/pwkeeper
//! ```

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::errors::Result;

/// Binary name the generated script registers completions for.
const BIN_NAME: &str = "pwkeeper";

pub fn execute(shell: Shell) -> Result<()> {
    let stdout = io::stdout();
    write_completions(shell, &mut stdout.lock())?;
    Ok(())
}

/// Render the completion script for `shell` into `out`.
pub fn write_completions<W: Write>(shell: Shell, out: &mut W) -> io::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut out = Vec::new();
        write_completions(shell, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn bash_script_covers_subcommands() {
        let out = script(Shell::Bash);
        assert!(out.contains("pwkeeper"));
        for sub in ["add", "get", "delete", "list", "shell"] {
            assert!(out.contains(sub), "missing {sub}");
        }
    }

    #[test]
    fn every_shell_renders_something() {
        for shell in [Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            assert!(!script(shell).is_empty(), "{shell} produced no script");
        }
    }
}
