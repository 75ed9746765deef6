use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;
use crate::error::AppError;

/// Install the global subscriber. Logs go to stderr so stdout carries only
/// action results.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), AppError> {
    let level = settings
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("base_compound_actions={},compound_actions={}", level, level).into());

    let registry = tracing_subscriber::registry().with(filter);
    let result = if settings.json {
        // Structured JSON logging
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| AppError::Logging(e.to_string()))?;
    tracing::debug!(level = %level, json = settings.json, "Logging initialized");
    Ok(())
}
