//! Shared domain types for webgen.
//!
//! This crate contains the generated-website record, the draft and generation
//! shapes that feed it, slug generation, configuration, and the error types
//! shared by the store and its storage media.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, chrono, thiserror.

pub mod config;
pub mod error;
pub mod generation;
pub mod page;
pub mod website;
