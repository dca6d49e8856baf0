//! Logging for the `webgen` binary.
//!
//! Log lines go to stderr so `--json` command output on stdout stays
//! machine-readable. The format is human-readable text by default, or one
//! JSON object per line with `WEBGEN_LOG_FORMAT=json`. With `WEBGEN_OTEL=1`
//! spans are also exported through OpenTelemetry to stdout.
//!
//! ```no_run
//! use webgen_observe::tracing_setup::{TracingConfig, init_tracing};
//!
//! init_tracing(&TracingConfig::from_env("warn")).unwrap();
//! ```

use std::str::FromStr;
use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// Shape of each log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected text or json)")),
        }
    }
}

/// Subscriber settings resolved before anything is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Directive used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
    pub format: LogFormat,
    /// Export spans through OpenTelemetry.
    pub otel: bool,
}

impl TracingConfig {
    pub fn new(default_filter: impl Into<String>) -> Self {
        Self {
            default_filter: default_filter.into(),
            format: LogFormat::default(),
            otel: false,
        }
    }

    /// Read `WEBGEN_LOG_FORMAT` and `WEBGEN_OTEL` from the environment.
    ///
    /// An unrecognized format falls back to text.
    pub fn from_env(default_filter: impl Into<String>) -> Self {
        let format = std::env::var("WEBGEN_LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let otel = std::env::var("WEBGEN_OTEL").is_ok_and(|v| v == "1");

        Self {
            format,
            otel,
            ..Self::new(default_filter)
        }
    }
}

/// `RUST_LOG` when set and valid, else `default_filter`.
pub fn build_env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let text_layer = (config.format == LogFormat::Text).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });
    let json_layer = (config.format == LogFormat::Json).then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
    });
    let otel_layer = config.otel.then(|| {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("webgen");
        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);
        tracing_opentelemetry::layer().with_tracer(tracer)
    });

    tracing_subscriber::registry()
        .with(build_env_filter(&config.default_filter))
        .with(text_layer)
        .with(json_layer)
        .with(otel_layer)
        .try_init()?;

    tracing::debug!(format = ?config.format, otel = config.otel, "tracing initialized");
    Ok(())
}

/// Flush buffered spans. Does nothing unless OpenTelemetry was enabled.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}
