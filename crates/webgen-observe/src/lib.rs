//! Observability setup for webgen: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;
