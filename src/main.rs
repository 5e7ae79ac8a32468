use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pwkeeper::cli::{load_settings, Cli, Commands};

/// Environment variable holding the log filter (e.g. `debug`, `pwkeeper=trace`).
const LOG_ENV: &str = "PWKEEPER_LOG";

fn main() {
    // Logs go to stderr; stdout carries passwords and tables.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = load_settings().and_then(|settings| match cli.command {
        Some(Commands::Add {
            ref service,
            ref value,
        }) => pwkeeper::cli::commands::add::execute(&cli, &settings, service, value.as_deref()),
        Some(Commands::Get { ref service }) => {
            pwkeeper::cli::commands::get::execute(&cli, &settings, service)
        }
        Some(Commands::Delete { ref service, force }) => {
            pwkeeper::cli::commands::delete::execute(&cli, &settings, service, force)
        }
        Some(Commands::List) => pwkeeper::cli::commands::list::execute(&cli, &settings),
        Some(Commands::Completions { shell }) => {
            pwkeeper::cli::commands::completions::execute(shell)
        }
        Some(Commands::Shell) | None => pwkeeper::cli::commands::shell::execute(&cli, &settings),
    });

    if let Err(e) = result {
        debug!(layer = %e.layer(), error = %e, "command failed");
        pwkeeper::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
