//! Key-value medium trait.
//!
//! The website store persists its whole table as one string value in a flat
//! key-value medium (in-memory map, directory of files, browser-style local
//! storage). `MemoryMedium` and `FileMedium` live in webgen-infra.

use std::sync::Arc;

use webgen_types::error::MediumError;

/// Synchronous string-keyed, string-valued storage.
///
/// Every call is a plain blocking access; there is no transaction or
/// compare-and-swap, so a read-modify-write by a caller is not atomic.
pub trait KeyValueMedium: Send + Sync {
    /// Read the value stored under `key`. Returns None if the key does not exist.
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), MediumError>;
}

impl<M: KeyValueMedium + ?Sized> KeyValueMedium for Arc<M> {
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), MediumError> {
        (**self).remove_item(key)
    }
}

impl<M: KeyValueMedium + ?Sized> KeyValueMedium for &M {
    fn get_item(&self, key: &str) -> Result<Option<String>, MediumError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), MediumError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), MediumError> {
        (**self).remove_item(key)
    }
}
