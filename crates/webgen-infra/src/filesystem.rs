//! Data directory layout.
//!
//! ```text
//! ~/.webgen/
//! ├── config.toml
//! └── storage/
//!     └── generatedWebsites.json
//! ```

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `WEBGEN_DATA_DIR` environment variable
/// 2. `~/.webgen` under the user's home directory
/// 3. `.webgen` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WEBGEN_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".webgen");
    }

    PathBuf::from(".webgen")
}

/// Directory the file medium is rooted at: `{data_dir}/storage/`.
pub fn storage_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("storage")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_dir() {
        let data_dir = PathBuf::from("/home/user/.webgen");
        assert_eq!(
            storage_dir(&data_dir),
            PathBuf::from("/home/user/.webgen/storage")
        );
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var("WEBGEN_DATA_DIR", "/tmp/test-webgen");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-webgen"));
        unsafe {
            std::env::remove_var("WEBGEN_DATA_DIR");
        }
    }
}
