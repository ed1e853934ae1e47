//! Diagnostic logging
//!
//! Trace output goes to stderr so it never interleaves with terminal lines
//! on stdout. `RUST_LOG` wins over the configured level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

fn filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| configured(config))
}

fn configured(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::new(&config.level)
}

/// Install the global subscriber. Call once, from `main`.
pub fn init(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(filter(config));
    if config.json {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_uses_config_level() {
        // init() is one-shot per process
        let config = LoggingConfig {
            level: "debug".to_string(),
            json: false,
        };
        assert_eq!(configured(&config).to_string(), "debug");

        let scoped = LoggingConfig {
            level: "niflheim=trace".to_string(),
            json: true,
        };
        assert_eq!(configured(&scoped).to_string(), "niflheim=trace");
    }
}
