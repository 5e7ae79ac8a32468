use thiserror::Error;

/// All errors that can occur in pwkeeper.
#[derive(Debug, Error)]
pub enum PwKeeperError {
    // --- Crypto errors ---
    #[error("Cryptographic failure: {0}")]
    Crypto(String),

    #[error("Authentication failed: wrong master password or tampered data")]
    AuthenticationFailed,

    #[error("Malformed encrypted blob: {0}")]
    MalformedBlob(String),

    // --- Store errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage file: {0}")]
    Decode(String),

    #[error("Failed to encode entries: {0}")]
    Encode(String),

    #[error("Service '{0}' already exists")]
    DuplicateService(String),

    #[error("Service '{0}' not found")]
    ServiceNotFound(String),

    #[error("Password store has not been loaded")]
    StoreNotLoaded,

    #[error("Invalid service name: {0}")]
    InvalidService(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Which subsystem an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLayer {
    Crypto,
    Store,
    Config,
    Cli,
}

impl ErrorLayer {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorLayer::Crypto => "crypto",
            ErrorLayer::Store => "store",
            ErrorLayer::Config => "config",
            ErrorLayer::Cli => "cli",
        }
    }
}

impl std::fmt::Display for ErrorLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PwKeeperError {
    /// The layer that produced this error.
    pub fn layer(&self) -> ErrorLayer {
        match self {
            PwKeeperError::Crypto(_)
            | PwKeeperError::AuthenticationFailed
            | PwKeeperError::MalformedBlob(_) => ErrorLayer::Crypto,
            PwKeeperError::Io(_)
            | PwKeeperError::Decode(_)
            | PwKeeperError::Encode(_)
            | PwKeeperError::DuplicateService(_)
            | PwKeeperError::ServiceNotFound(_)
            | PwKeeperError::StoreNotLoaded
            | PwKeeperError::InvalidService(_) => ErrorLayer::Store,
            PwKeeperError::ConfigError(_) => ErrorLayer::Config,
            PwKeeperError::CommandFailed(_) | PwKeeperError::UserCancelled => ErrorLayer::Cli,
        }
    }
}

/// Convenience type alias for pwkeeper results.
pub type Result<T> = std::result::Result<T, PwKeeperError>;
