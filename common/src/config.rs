use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// Peer address to connect to; the port comes from the command line.
    #[serde(default = "default_host")]
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Minimum brightness delta over the base frame for a pixel to count.
    #[serde(default = "default_threshold")]
    pub threshold: i32,
    /// Per-strip bound on retained candidates.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Number of column strips scanned in parallel.
    #[serde(default = "default_workers")]
    pub workers: u32,
    /// Upper bound accepted for a frame payload's length prefix.
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            capacity: default_capacity(),
            workers: default_workers(),
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFile(path.display().to_string(), e))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    ReadFile(String, std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(String),
}

// Default value functions
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_threshold() -> i32 {
    50
}
fn default_capacity() -> usize {
    4
}
fn default_workers() -> u32 {
    4
}
fn default_max_payload_bytes() -> u32 {
    1_048_576
}
fn default_log_level() -> String {
    "info".into()
}
