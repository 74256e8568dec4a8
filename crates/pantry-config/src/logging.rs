// Log subscriber setup
//
// Library code only emits `tracing` events; host programs call `init`
// once to install a subscriber. `RUST_LOG` wins over the configured level.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::ConfigError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// An `EnvFilter` directive, e.g. `info` or `pantry_api=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Text,
        }
    }
}

impl LogSettings {
    fn filter(&self) -> Result<EnvFilter, ConfigError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| ConfigError::Validation {
            field: "log.level".into(),
            reason: e.to_string(),
        })
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(settings: &LogSettings) -> Result<(), ConfigError> {
    let filter = settings.filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match settings.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| ConfigError::Logging(e.to_string()))
}
