//! On-disk encoding of the entry collection.
//!
//! The storage file is a pretty-printed JSON array:
//!
//! ```text
//! [
//!   {
//!     "service": "github",
//!     "password": "<hex blob>"
//!   }
//! ]
//! ```
//!
//! Writes go through a temp file in the same directory followed by a
//! rename, so readers never see a half-written file.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::entry::PasswordEntry;
use crate::errors::{PwKeeperError, Result};

/// Serialize entries to the file format (2-space indent, trailing newline).
pub fn encode_entries(entries: &[PasswordEntry]) -> Result<Vec<u8>> {
    let mut buf = serde_json::to_vec_pretty(entries)
        .map_err(|e| PwKeeperError::Encode(e.to_string()))?;
    buf.push(b'\n');
    Ok(buf)
}

/// Parse the file contents.  A literal `null` is read as an empty set.
///
/// A file naming the same service twice is rejected.
pub fn decode_entries(data: &[u8]) -> Result<Vec<PasswordEntry>> {
    let entries: Option<Vec<PasswordEntry>> =
        serde_json::from_slice(data).map_err(|e| PwKeeperError::Decode(e.to_string()))?;
    let entries = entries.unwrap_or_default();

    let mut seen = HashSet::with_capacity(entries.len());
    if let Some(dup) = entries.iter().find(|e| !seen.insert(e.service.as_str())) {
        return Err(PwKeeperError::Decode(format!(
            "service '{}' appears more than once",
            dup.service
        )));
    }
    Ok(entries)
}

/// Write `data` to `path` atomically with owner-only permissions.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let tmp_path = temp_path(path);

    let result = write_temp(&tmp_path, data).and_then(|()| Ok(fs::rename(&tmp_path, path)?));

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_temp(tmp_path: &Path, data: &[u8]) -> Result<()> {
    let mut file = open_private(tmp_path)?;
    restrict_permissions(&file)?;
    file.write_all(data)?;
    file.sync_all()?;
    Ok(())
}

#[cfg(unix)]
fn open_private(path: &Path) -> Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    Ok(OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> Result<File> {
    Ok(OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?)
}

/// Force 0600 on the temp file; `mode` only applies when it is created.
#[cfg(unix)]
fn restrict_permissions(file: &File) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_file: &File) -> Result<()> {
    Ok(())
}

/// `<dir>/.<file_name>.tmp`, next to the target so rename stays on one filesystem.
fn temp_path(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_set_encodes_as_brackets() {
        let data = encode_entries(&[]).unwrap();
        assert_eq!(data, b"[]\n");
    }

    #[test]
    fn fields_keep_service_then_password_order() {
        let data = encode_entries(&[PasswordEntry::new("github", "abcd")]).unwrap();
        let text = String::from_utf8(data).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"service\": \"github\",\n    \"password\": \"abcd\"\n  }\n]\n"
        );
    }

    #[test]
    fn decodes_compact_json() {
        let entries =
            decode_entries(br#"[{"service":"a","password":"00"},{"service":"b","password":"11"}]"#)
                .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].service, "b");
    }

    #[test]
    fn null_decodes_as_empty() {
        assert!(decode_entries(b"null").unwrap().is_empty());
    }

    #[test]
    fn garbage_is_decode_error() {
        assert!(matches!(
            decode_entries(b"{not json"),
            Err(PwKeeperError::Decode(_))
        ));
        assert!(matches!(
            decode_entries(br#"[{"service":"a"}]"#),
            Err(PwKeeperError::Decode(_))
        ));
    }

    #[test]
    fn repeated_service_is_decode_error() {
        let result = decode_entries(
            br#"[{"service":"github","password":"00"},{"service":"mail","password":"11"},{"service":"github","password":"22"}]"#,
        );
        match result {
            Err(PwKeeperError::Decode(msg)) => assert!(msg.contains("'github'")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn service_names_differing_in_case_are_distinct() {
        let entries = decode_entries(
            br#"[{"service":"GitHub","password":"00"},{"service":"github","password":"11"}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        assert_eq!(
            temp_path(Path::new("/data/passwords.json")),
            PathBuf::from("/data/.passwords.json.tmp")
        );
        assert_eq!(
            temp_path(Path::new("passwords.json")),
            PathBuf::from("./.passwords.json.tmp")
        );
    }

    #[test]
    fn write_atomic_replaces_contents_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");
        fs::write(&path, b"old").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert!(!temp_path(&path).exists());
    }

    #[cfg(unix)]
    #[test]
    fn write_atomic_sets_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");
        fs::write(&path, b"old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&path, b"[]").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn leftover_temp_file_is_narrowed_before_rename() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("passwords.json");
        let tmp = temp_path(&path);
        fs::write(&tmp, b"stale").unwrap();
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o644)).unwrap();

        write_atomic(&path, b"[]").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        assert_eq!(fs::read(&path).unwrap(), b"[]");
        assert!(!tmp.exists());
    }
}
