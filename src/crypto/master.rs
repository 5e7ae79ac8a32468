//! The session's master password.

use zeroize::Zeroizing;

/// Master password bytes, held for the session and wiped on drop.
///
/// `Debug` never prints the bytes.
#[derive(Clone)]
pub struct MasterPassword {
    bytes: Zeroizing<Vec<u8>>,
}

impl MasterPassword {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.into()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for MasterPassword {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl std::fmt::Debug for MasterPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterPassword(***)")
    }
}
