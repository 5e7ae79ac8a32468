//! Configuration loaded from `.pwkeeper.toml`.

pub mod settings;

pub use settings::Settings;
