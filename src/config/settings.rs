use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PwKeeperError, Result};
use crate::vault::DEFAULT_STORAGE_FILE;

/// Project-level configuration, loaded from `.pwkeeper.toml`.
///
/// Every field has a default so pwkeeper works without any config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Storage file path, relative to the working directory unless absolute.
    #[serde(default = "default_storage_file")]
    pub storage_file: String,

    /// Ask before deleting an entry from the command line.
    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_storage_file() -> String {
    DEFAULT_STORAGE_FILE.to_string()
}

fn default_confirm_delete() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_file: default_storage_file(),
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    pub const FILE_NAME: &'static str = ".pwkeeper.toml";

    /// Load settings from `<dir>/.pwkeeper.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        toml::from_str(&contents).map_err(|e| {
            PwKeeperError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })
    }

    /// Resolve the storage file against `dir`.
    pub fn storage_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.storage_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings() {
        let s = Settings::default();
        assert_eq!(s.storage_file, "passwords.json");
        assert!(s.confirm_delete);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.storage_file, "passwords.json");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
storage_file = "vault/keys.json"
confirm_delete = false
"#;
        fs::write(tmp.path().join(".pwkeeper.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.storage_file, "vault/keys.json");
        assert!(!settings.confirm_delete);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".pwkeeper.toml"), "confirm_delete = false\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.storage_file, "passwords.json");
        assert!(!settings.confirm_delete);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".pwkeeper.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(PwKeeperError::ConfigError(_))));
    }

    #[test]
    fn storage_path_resolves_relative_and_absolute() {
        let s = Settings::default();
        assert_eq!(
            s.storage_path(Path::new("/home/user")),
            PathBuf::from("/home/user/passwords.json")
        );

        let abs = Settings {
            storage_file: "/var/lib/pw.json".to_string(),
            ..Settings::default()
        };
        assert_eq!(
            abs.storage_path(Path::new("/home/user")),
            PathBuf::from("/var/lib/pw.json")
        );
    }
}
