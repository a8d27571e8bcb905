//! Engine configuration via `scribe.toml`
//!
//! A single flat file controls session lifetime and persistence formatting.
//! Missing keys fall back to their defaults, so an empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use scribe_core::{ScribeError, ScribeResult};

/// Config file name looked up next to the process working directory.
pub const CONFIG_FILE_NAME: &str = "scribe.toml";

fn default_idle_timeout_secs() -> u64 {
    30 * 60
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_max_sessions() -> usize {
    256
}

fn default_pretty_json() -> bool {
    true
}

/// Engine configuration loaded from `scribe.toml`.
///
/// # Example
///
/// ```toml
/// idle_timeout_secs = 1800
/// sweep_interval_secs = 60
/// max_sessions = 256
/// pretty_json = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScribeConfig {
    /// Close sessions untouched for this many seconds. `0` disables eviction.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// How often the background sweeper looks for idle sessions.
    /// `0` disables the sweeper thread; `evict_idle` can still be called.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Upper bound on concurrently open sessions.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Write documents as indented JSON.
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            max_sessions: default_max_sessions(),
            pretty_json: default_pretty_json(),
        }
    }
}

impl ScribeConfig {
    /// Idle timeout, or `None` when eviction is disabled.
    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_secs > 0).then(|| Duration::from_secs(self.idle_timeout_secs))
    }

    /// Sweep interval, or `None` when the sweeper is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_sessions` is zero.
    pub fn validate(&self) -> ScribeResult<()> {
        if self.max_sessions == 0 {
            return Err(ScribeError::invalid_input(
                "max_sessions in scribe.toml must be at least 1",
            ));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Scribe configuration
#
# Sessions untouched for this many seconds are closed (0 = never).
idle_timeout_secs = 1800

# How often the background sweeper checks for idle sessions (0 = no sweeper).
sweep_interval_secs = 60

# Maximum number of sessions open at once.
max_sessions = 256

# Write documents as indented JSON.
pretty_json = true
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> ScribeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScribeError::invalid_input(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: ScribeConfig = toml::from_str(&content).map_err(|e| {
            ScribeError::invalid_input(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> ScribeResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())
                .map_err(|e| ScribeError::io(path.display().to_string(), e))?;
        }
        Ok(())
    }
}
