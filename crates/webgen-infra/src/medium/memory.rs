//! Process-scoped in-memory medium.

use std::sync::Arc;

use dashmap::DashMap;
use webgen_core::storage::medium::KeyValueMedium;
use webgen_types::error::MediumError;

/// In-memory implementation of `KeyValueMedium`.
///
/// Clones share the same underlying map, so a handle kept by a test sees
/// everything written through a store that owns another handle.
#[derive(Debug, Clone, Default)]
pub struct MemoryMedium {
    items: Arc<DashMap<String, String>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueMedium for MemoryMedium {
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError> {
        Ok(self.items.get(key).map(|entry| entry.value().clone()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), MediumError> {
        self.items.remove(key);
        Ok(())
    }
}
