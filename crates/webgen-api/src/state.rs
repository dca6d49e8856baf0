//! Application state wiring the website store.
//!
//! `WebsiteStore` is generic over its medium and clock; AppState pins it to a
//! shared trait-object medium so the CLI and server use the file medium while
//! tests swap in an in-memory one.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use webgen_core::service::clock::SystemClock;
use webgen_core::service::website::WebsiteStore;
use webgen_core::storage::medium::KeyValueMedium;
use webgen_infra::config::load_config;
use webgen_infra::filesystem::{resolve_data_dir, storage_dir};
use webgen_infra::medium::FileMedium;
use webgen_types::config::WebgenConfig;

/// Medium handle shared by every store instance.
pub type SharedMedium = Arc<dyn KeyValueMedium>;

/// Website store pinned to the shared medium and the system clock.
pub type ConcreteWebsiteStore = WebsiteStore<SharedMedium, SystemClock>;

/// Shared application state used by both CLI commands and REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub website_store: Arc<ConcreteWebsiteStore>,
    pub config: WebgenConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load config, and open the file medium.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;

        let config = load_config(&data_dir).await;

        let storage = storage_dir(&data_dir);
        let medium = FileMedium::open(&storage)
            .with_context(|| format!("failed to open storage at {}", storage.display()))?;

        tracing::debug!(
            data_dir = %data_dir.display(),
            storage_key = %config.storage_key,
            "application state initialized"
        );

        Ok(Self::with_medium(Arc::new(medium), config, data_dir))
    }

    /// Run a store call on the blocking thread pool.
    ///
    /// Store calls hit the medium synchronously (the file medium fsyncs on
    /// every write), so async handlers go through here.
    pub async fn with_store<T, F>(&self, f: F) -> Result<T, tokio::task::JoinError>
    where
        F: FnOnce(&ConcreteWebsiteStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.website_store);
        tokio::task::spawn_blocking(move || f(&store)).await
    }

    /// Build state over an arbitrary medium.
    pub fn with_medium(medium: SharedMedium, config: WebgenConfig, data_dir: PathBuf) -> Self {
        let website_store =
            WebsiteStore::with_key(medium, SystemClock, config.storage_key.clone());

        Self {
            website_store: Arc::new(website_store),
            config,
            data_dir,
        }
    }
}
