//! One module per subcommand; each exposes an `execute` function.

pub mod add;
pub mod completions;
pub mod delete;
pub mod get;
pub mod list;
pub mod shell;
