//! Tests for logging initialization
//!
//! Only one global subscriber can be installed per process, so every test
//! tolerates an earlier initialization.

use erdraft::core::logging::{init_logging, resolve_format, LogFormat};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_explicit_format_wins() {
    assert_eq!(resolve_format(Some("pretty")), "pretty");
}

#[test]
fn test_invalid_format_is_rejected() {
    assert!(init_logging(Some("info"), Some("yaml")).is_err());
}

#[test]
fn test_pipeline_runs_under_subscriber() {
    let _ = init_logging(Some("trace"), Some("compact"));

    // Dropped lines and dangling relations are logged, never fatal
    let input = "erDiagram\nA {\n  not a field !\n}\nA ||--o{ GHOST\n}\n";
    let svg = erdraft::render_svg(input).unwrap();
    assert!(svg.contains(">A</text>"));
}
