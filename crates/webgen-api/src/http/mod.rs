//! HTTP/REST API layer.
//!
//! Axum-based JSON API at `/api/v1/` using the envelope response format,
//! plus rendered pages under `/sites/`.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
