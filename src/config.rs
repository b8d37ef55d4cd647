//! Configuration management for pollwatch
//!
//! Settings come from three layers: built-in defaults, an optional TOML file,
//! and `POLLWATCH_*` environment variables. Command-line flags override all
//! of them at the call site.

use std::path::Path;
use std::time::Duration;
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Global configuration for pollwatch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Polling configuration
    #[serde(default)]
    pub watcher: WatcherConfig,
    /// Console output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration for the poll loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Delay between poll cycles in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Regex patterns selecting which paths to watch (empty = watch all)
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Configuration for console output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Whether to colorize event lines
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            patterns: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl WatcherConfig {
    /// Get the poll interval as a duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl WatchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load from the given file if present, otherwise defaults; environment
    /// variables override either source.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Override settings from environment variables if present
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("POLLWATCH_POLL_INTERVAL_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                self.watcher.poll_interval_ms = ms;
            }
        }

        if let Ok(val) = std::env::var("POLLWATCH_PATTERNS") {
            let patterns: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            if !patterns.is_empty() {
                self.watcher.patterns = patterns;
            }
        }

        if std::env::var("POLLWATCH_NO_COLOR").is_ok() {
            self.output.color = false;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.watcher.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".to_string());
        }

        Ok(())
    }
}
