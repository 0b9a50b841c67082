//! Logging infrastructure for the ER pipeline
//!
//! Every stage emits `tracing` spans and events: `parse_erd`, `extract_blocks`,
//! `layout_erd`, `render_erd` and the orchestrator's `process_erd`. Lines the
//! lenient grammars drop are reported at `debug`, per-line decisions at
//! `trace`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use erdraft::core::logging::init_logging;
//!
//! // Level and format from the environment, falling back to info/compact
//! init_logging(None, None).unwrap();
//! ```
//!
//! # Environment Variables
//!
//! - `ERDRAFT_LOG_LEVEL`: log level or filter directive (trace|debug|info|warn|error|off)
//! - `RUST_LOG`: standard `tracing-subscriber` filter, used when the above is unset
//! - `ERDRAFT_LOG_FORMAT`: output format (compact|pretty|json)
//!
//! # Filtering Logs
//!
//! ```bash
//! # Show which field lines were dropped
//! RUST_LOG="erdraft::plugins::er::parser=debug" erdraft render -i schema.mmd
//! ```
//!
//! On `wasm32` the subscriber is `tracing-wasm`, which logs to the browser
//! console and ignores the format.

use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

#[cfg(target_arch = "wasm32")]
use tracing_wasm::WASMLayerConfig;

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV: &str = "ERDRAFT_LOG_LEVEL";

/// Environment variable holding the log format
pub const LOG_FORMAT_ENV: &str = "ERDRAFT_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Resolve the effective level: argument, `ERDRAFT_LOG_LEVEL`, `RUST_LOG`, then `info`
pub fn resolve_level(level: Option<&str>) -> String {
    level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string())
}

/// Resolve the effective format name: argument, `ERDRAFT_LOG_FORMAT`, then `compact`
pub fn resolve_format(format: Option<&str>) -> String {
    format
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
        .unwrap_or_else(|| "compact".to_string())
}

/// Install the global tracing subscriber
///
/// Returns an error for an unknown format or when a global subscriber is
/// already installed.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = (level, format);
        tracing_wasm::set_as_global_default_with_config(WASMLayerConfig::default());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let log_level = resolve_level(level);
        let format = LogFormat::from_str(&resolve_format(format))
            .map_err(|e| format!("Invalid log format: {}", e))?;

        let filter = if log_level == "off" {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let registry = Registry::default().with(filter);
        match format {
            LogFormat::Compact => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .with_span_events(FmtSpan::NONE)
                        .compact(),
                )
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?,
            LogFormat::Json => registry
                .with(
                    fmt::Layer::default()
                        .with_writer(std::io::stderr)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?,
        }

        Ok(())
    }
}

/// Initialize logging from the environment with compact output
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
