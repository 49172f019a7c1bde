use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("unusable log filter '{value}'")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("tracing subscriber installation failed: {0}")]
    Install(Box<dyn std::error::Error + Send + Sync>),
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// configured level when set; an unparseable value in either place is
/// reported instead of being silently downgraded.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let directives = std::env::var("RUST_LOG").ok();
    let filter = build_filter(directives.as_deref(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Install)
}

fn build_filter(env_override: Option<&str>, configured: &str) -> Result<EnvFilter, TelemetryError> {
    let directives = env_override.unwrap_or(configured);
    EnvFilter::try_new(directives).map_err(|source| TelemetryError::Filter {
        value: directives.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_directives_win_over_configured_level() {
        let filter =
            build_filter(Some("cop_backoffice=debug"), "info").expect("valid directives");
        assert_eq!(filter.to_string(), "cop_backoffice=debug");
    }

    #[test]
    fn configured_level_applies_without_environment_override() {
        let filter = build_filter(None, "warn").expect("valid level");
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn unparseable_directives_are_reported_with_their_value() {
        let err = build_filter(None, "pas un filtre valable").expect_err("parse failure");
        assert!(err.to_string().contains("pas un filtre valable"));
    }
}
