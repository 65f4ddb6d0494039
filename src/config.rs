//! Simulation parameters.

use std::time::Duration;

/// Environment variable overriding [`SimulationConfig::time_unit`], in milliseconds.
pub const TIME_UNIT_ENV: &str = "BANKER_TIME_UNIT_MS";

/// Execution parameters for the supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Wall-clock length of one unit of `run_duration`.
    pub time_unit: Duration,
    /// Prefix for execution thread names; the rank is appended.
    pub thread_name_prefix: String,
    /// Stack size for execution threads; the platform default when `None`.
    pub stack_size: Option<usize>,
}

impl SimulationConfig {
    /// Default configuration with `BANKER_TIME_UNIT_MS` applied when it parses.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(TIME_UNIT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.time_unit = Duration::from_millis(ms),
                Err(_) => tracing::warn!(value = %raw, "ignoring unparsable {}", TIME_UNIT_ENV),
            }
        }
        config
    }

    /// Same configuration with a different time unit.
    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    /// Same configuration with an explicit thread stack size in bytes.
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_unit: Duration::from_secs(1),
            thread_name_prefix: "banker-unit".to_string(),
            stack_size: None,
        }
    }
}
