//! Tracing subscriber setup

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Build the log filter.
///
/// `--verbose` forces debug output for this crate; otherwise `RUST_LOG`
/// takes precedence over the configured level.
pub fn env_filter(config: &LoggingConfig, verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("warn,campwatch=debug");
    }
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,campwatch={}", config.level)))
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for command output.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let json = config.format == "json";

    tracing_subscriber::registry()
        .with(env_filter(config, verbose))
        .with((!json).then(|| fmt::layer().pretty().with_writer(std::io::stderr)))
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .try_init()
        .context("Failed to initialise logging")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_filter_is_debug() {
        let filter = env_filter(&LoggingConfig::default(), true);
        assert!(filter.to_string().contains("campwatch=debug"));
    }

    #[test]
    fn test_init_json_format() {
        let config = LoggingConfig {
            format: "json".to_string(),
            ..LoggingConfig::default()
        };
        if let Err(e) = init(&config, false) {
            assert!(e.to_string().contains("Failed to initialise logging"));
        }
    }

    #[test]
    fn test_init_twice_reports_error() {
        let config = LoggingConfig::default();
        let first = init(&config, false);
        let second = init(&config, false);
        // another test may already have installed a subscriber
        assert!(first.is_err() || second.is_err());
    }
}
