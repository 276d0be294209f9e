//! Tracing setup for the command-line tool.
//!
//! Filtering comes from `DECOMMENT_LOG`, falling back to `RUST_LOG`; both use
//! the `RUST_LOG` directive syntax. `DECOMMENT_LOG_FORMAT=json` switches to
//! one JSON object per event. Output always goes to stderr so it never mixes
//! with stripped sources or extracted comments on stdout.

use tracing_subscriber::EnvFilter;

/// Tracing output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("DECOMMENT_LOG_FORMAT").unwrap_or_default())
    }
}

/// `DECOMMENT_LOG`, then `RUST_LOG`, then `info` when verbose or `warn` otherwise
fn build_filter(verbose: bool) -> EnvFilter {
    if let Ok(val) = std::env::var("DECOMMENT_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    }
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    let filter = build_filter(verbose);

    // a subscriber installed by the embedding program takes precedence
    let _ = match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse(""), LogFormat::Text);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(false);
        init_tracing(true);
    }
}
