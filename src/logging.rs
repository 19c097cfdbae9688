//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout carries only the report. The level comes
//! from `NGRAM_DENSITY_LOG` when set, otherwise from the caller's default;
//! `RUST_LOG` directives still take precedence for fine-grained filtering.
//!
//! ```text
//! NGRAM_DENSITY_LOG=debug ngram-density https://example.com/
//! RUST_LOG=ngram_density::ranking=trace ngram-density https://example.com/
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Target prefix used by all spans and events of this crate.
pub const TARGET_PREFIX: &str = "ngram_density";

/// Environment variable holding the log level.
pub const LEVEL_ENV: &str = "NGRAM_DENSITY_LOG";

/// Span names used by the pipeline.
pub mod span_names {
    /// One pipeline stage; the `stage` field holds its name.
    pub const PIPELINE_STAGE: &str = "pipeline_stage";
}

/// Parse a log level string (case-insensitive).
///
/// Recognized values: `trace`, `debug`, `info`, `warn`, `error`.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Level from `NGRAM_DENSITY_LOG`, or `default` if unset or unrecognized.
#[must_use]
pub fn level_from_env(default: Level) -> Level {
    std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(default)
}

/// Install a stderr `fmt` subscriber.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(default: Level) -> bool {
    let level = level_from_env(default);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{TARGET_PREFIX}={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_prefix_matches_crate() {
        assert_eq!(TARGET_PREFIX, module_path!().split("::").next().unwrap());
    }

    #[test]
    fn test_parse_level_recognizes_valid_levels() {
        assert_eq!(parse_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("info"), Some(Level::INFO));
        assert_eq!(parse_level("warn"), Some(Level::WARN));
        assert_eq!(parse_level("warning"), Some(Level::WARN));
        assert_eq!(parse_level("error"), Some(Level::ERROR));
    }

    #[test]
    fn test_parse_level_case_and_whitespace() {
        assert_eq!(parse_level(" DEBUG "), Some(Level::DEBUG));
        assert_eq!(parse_level("Error"), Some(Level::ERROR));
    }

    #[test]
    fn test_parse_level_returns_none_for_invalid() {
        assert_eq!(parse_level("nonsense"), None);
        assert_eq!(parse_level(""), None);
        assert_eq!(parse_level("verbose"), None);
    }

    #[test]
    fn test_init_twice_reports_existing_subscriber() {
        let _ = init_tracing(Level::WARN);
        assert!(!init_tracing(Level::WARN));
    }
}
