//! Durable medium backed by a directory of files.
//!
//! Each key maps to `<root>/<key>.json`. Writes land in a temp file inside
//! the same directory and are renamed over the target, so a reader never
//! observes a half-written value.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use webgen_core::storage::medium::KeyValueMedium;
use webgen_types::error::MediumError;

/// File-backed implementation of `KeyValueMedium`.
///
/// Keys must be non-empty, must not start with `.`, and may only contain
/// ASCII alphanumerics, `_`, `-` and `.`. Temp files created during writes
/// start with `.`, so they can never shadow a key.
#[derive(Debug, Clone)]
pub struct FileMedium {
    root: PathBuf,
}

impl FileMedium {
    /// Create a medium rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a medium rooted at `root`, creating the directory now.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, MediumError> {
        let medium = Self::new(root);
        std::fs::create_dir_all(&medium.root)?;
        Ok(medium)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, MediumError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

fn validate_key(key: &str) -> Result<(), MediumError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(MediumError::InvalidKey(key.to_string()))
    }
}

impl KeyValueMedium for FileMedium {
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.root)?;

        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| MediumError::Io(e.error))?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "wrote storage file");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), MediumError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
