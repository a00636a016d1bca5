//! Configuration system using TOML files.
//!
//! Config is read from the OS-standard config directory
//! (`~/.config/renderer-remote/config.toml` on Linux) or from the path given
//! with `--config`. Command-line flags override file values.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

/// Terminal remote for a networked media renderer
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (default: OS config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the device's control server
    #[arg(short, long, env = "RENDERER_REMOTE_URL")]
    pub url: Option<String>,

    /// Milliseconds between polls
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Fetch the queue on every N-th poll
    #[arg(long)]
    pub queue_every: Option<u64>,
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub device: DeviceConfig,
    pub sync: SyncConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Where the device's control server lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout_ms: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

/// Polling cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub poll_interval_ms: u64,
    /// The queue is fetched on every k-th poll; 0 is treated as 1
    pub queue_refresh_every: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            queue_refresh_every: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Volume change per key press
    pub volume_step: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { volume_step: 5 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(".logs"),
        }
    }
}

impl Config {
    /// Apply command-line overrides on top of file values.
    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.url {
            self.device.base_url = url.clone();
        }
        if let Some(interval) = cli.interval_ms {
            self.sync.poll_interval_ms = interval;
        }
        if let Some(every) = cli.queue_every {
            self.sync.queue_refresh_every = every;
        }
        self.sync.queue_refresh_every = self.sync.queue_refresh_every.max(1);
        self
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("renderer-remote"))
}

/// Get the full path to the default config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from `path`, or from the default location.
///
/// Returns defaults if the file doesn't exist or can't be parsed. This runs
/// before logging is set up, so problems are returned as a note for the
/// caller to log.
pub fn load(path: Option<&Path>) -> (Config, Option<String>) {
    let Some(path) = path.map(Path::to_path_buf).or_else(config_path) else {
        return (
            Config::default(),
            Some("Could not determine config directory, using defaults".to_string()),
        );
    };

    if !path.exists() {
        return (
            Config::default(),
            Some(format!("No config file found at {:?}, using defaults", path)),
        );
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match parse(&contents) {
            Ok(config) => (config, None),
            Err(e) => (
                Config::default(),
                Some(format!("Failed to parse config file {:?}: {}", path, e)),
            ),
        },
        Err(e) => (
            Config::default(),
            Some(format!("Failed to read config file {:?}: {}", path, e)),
        ),
    }
}

pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}
