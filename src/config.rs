//! Editor configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use tracing::Level;

pub const DEFAULT_SNAP_THRESHOLD: f64 = template_canvas::consts::SNAP_THRESHOLD;
pub const DEFAULT_IMAGE_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid { var: &'static str, value: String, reason: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Snap distance in page units; 0 disables snapping.
    pub snap_threshold: f64,
    /// Largest image file accepted for upload.
    pub image_max_bytes: u64,
    /// Maximum level emitted by the fmt subscriber.
    pub log_level: Level,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            image_max_bytes: DEFAULT_IMAGE_MAX_BYTES,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl EditorConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `TEMPLATE_SNAP_THRESHOLD`: default 5.0, must be finite and >= 0
    /// - `TEMPLATE_IMAGE_MAX_BYTES`: default 5 MiB
    /// - `TEMPLATE_LOG_LEVEL`: `trace|debug|info|warn|error`, default `info`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a variable is set but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EditorConfig::from_env`] with a caller-supplied variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a variable is set but unparseable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("TEMPLATE_SNAP_THRESHOLD") {
            config.snap_threshold = parse_threshold(&raw)?;
        }
        if let Some(raw) = lookup("TEMPLATE_IMAGE_MAX_BYTES") {
            config.image_max_bytes = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                var: "TEMPLATE_IMAGE_MAX_BYTES",
                value: raw.clone(),
                reason: "expected a byte count",
            })?;
        }
        if let Some(raw) = lookup("TEMPLATE_LOG_LEVEL") {
            config.log_level = Level::from_str(raw.trim()).map_err(|_| ConfigError::Invalid {
                var: "TEMPLATE_LOG_LEVEL",
                value: raw.clone(),
                reason: "expected trace, debug, info, warn or error",
            })?;
        }

        Ok(config)
    }
}

fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    let invalid = |reason| ConfigError::Invalid { var: "TEMPLATE_SNAP_THRESHOLD", value: raw.to_owned(), reason };
    let value = raw.trim().parse::<f64>().map_err(|_| invalid("expected a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid("must be finite and non-negative"));
    }
    Ok(value)
}
