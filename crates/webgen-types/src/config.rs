//! Global configuration types for webgen.
//!
//! `WebgenConfig` represents the top-level `config.toml` that names the
//! storage key and the REST server defaults.

use serde::{Deserialize, Serialize};

/// Storage key the website table lives under when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "generatedWebsites";

/// Top-level configuration.
///
/// Loaded from `~/.webgen/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebgenConfig {
    /// Key the whole website table is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for WebgenConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            server: ServerConfig::default(),
        }
    }
}

/// Bind address for `webgen serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
