//! Storage trait definitions (ports).
//!
//! Implementations live in webgen-infra.

pub mod medium;
