//! Infrastructure layer for webgen.
//!
//! Contains implementations of the storage-medium trait defined in
//! `webgen-core` (in-memory and file-backed), the `config.toml` loader, and
//! data directory resolution.

pub mod config;
pub mod filesystem;
pub mod medium;
