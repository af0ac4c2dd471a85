//! Tracing subscriber setup

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};

/// Build the level filter; `RUST_LOG` wins over the configured level
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber
///
/// Returns false when a subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = build_filter(&config.level);

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init()
            .is_ok(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_target(true))
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::info!(level = %config.level, format = ?config.format, "Logging initialized");
    }

    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let config = LoggingConfig::default();

        init_logging(&config);
        assert!(!init_logging(&config));
    }
}
