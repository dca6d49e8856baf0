//! Business logic and storage trait definitions for webgen.
//!
//! This crate defines the "ports" (storage-medium and clock traits) that the
//! infrastructure layer implements, plus the website store built on them. It
//! depends only on `webgen-types` -- never on `webgen-infra` or any IO crate.

pub mod service;
pub mod storage;
