//! Controller configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating a [`ControllerConfig`].
/// Upper bound for `marker_ttl_ms`: one day.
pub const MAX_MARKER_TTL_MS: u64 = 86_400_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tunables for the controller and its tick loop.
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use animator::ControllerConfig;
///
/// let config = ControllerConfig::from_json(r#"{ "tick_interval_ms": 50 }"#).unwrap();
/// assert_eq!(config.tick_interval_ms, 50);
/// assert_eq!(config.preferred_clip, "Idle");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Cadence of the runtime tick loop
    pub tick_interval_ms: u64,
    /// Blend used when a state is activated outside a transition
    pub default_blend_secs: f64,
    /// Duration given to a freshly connected transition
    pub transition_duration_secs: f64,
    /// How long a fired transition stays marked as recent
    pub marker_ttl_ms: u64,
    /// Clip seeded as the first state when clips are loaded into an empty graph
    pub preferred_clip: String,
    /// Range of a freshly added float parameter
    pub float_min: f64,
    pub float_max: f64,
    /// Comparison value of a freshly added condition
    pub condition_threshold: f64,
    /// Fired transitions kept in history
    pub history_limit: usize,
    /// Capacity of the runtime command channel
    pub command_buffer: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            default_blend_secs: 0.5,
            transition_duration_secs: 0.5,
            marker_ttl_ms: 1000,
            preferred_clip: "Idle".to_string(),
            float_min: 0.0,
            float_max: 10.0,
            condition_threshold: 0.1,
            history_limit: 256,
            command_buffer: 64,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be > 0".into()));
        }
        if self.command_buffer == 0 {
            return Err(ConfigError::Invalid("command_buffer must be > 0".into()));
        }
        let negative = |secs: f64| secs.is_nan() || secs < 0.0;
        if negative(self.default_blend_secs) || negative(self.transition_duration_secs) {
            return Err(ConfigError::Invalid(
                "blend and transition durations must be >= 0".into(),
            ));
        }
        if self.marker_ttl_ms > MAX_MARKER_TTL_MS {
            return Err(ConfigError::Invalid(format!(
                "marker_ttl_ms ({}) exceeds {MAX_MARKER_TTL_MS}",
                self.marker_ttl_ms
            )));
        }
        if self.float_min.is_nan() || self.float_max.is_nan() || self.float_min > self.float_max {
            return Err(ConfigError::Invalid(format!(
                "float_min ({}) exceeds float_max ({})",
                self.float_min, self.float_max
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Lifetime of the recent-transition marker. `None` when the TTL does
    /// not fit a `chrono::Duration`.
    pub fn marker_ttl(&self) -> Option<chrono::Duration> {
        i64::try_from(self.marker_ttl_ms)
            .ok()
            .and_then(chrono::Duration::try_milliseconds)
    }
}
