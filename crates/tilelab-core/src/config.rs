//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `tilelab.yaml` next to the
//! binary. This module defines strongly-typed structs mirroring the
//! YAML structure with per-field defaults, and applies environment
//! overrides (`PORT`) so deployments can retune without editing the
//! file. A missing config file means defaults everywhere.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tilelab_builder::ScoreConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level backend configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Data file locations.
    #[serde(default)]
    pub data: DataConfig,

    /// Recommendation scoring weights and floor.
    #[serde(default)]
    pub scoring: ScoreConfig,

    /// Journal buffering and persistence cadence.
    #[serde(default)]
    pub journal: JournalConfig,

    /// Solver bounds.
    #[serde(default)]
    pub solver: SolverConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string. An empty document means
    /// defaults everywhere.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from `path` when it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::info!("config file not found, using defaults");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Override config values with environment variables when set.
    /// `PORT` overrides `server.port`.
    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("PORT")
            && let Ok(port) = value.parse::<u16>()
        {
            self.server.port = port;
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Data file locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataConfig {
    /// Word list, one lowercase word per line.
    #[serde(default = "default_words_path")]
    pub words_path: PathBuf,

    /// Zipf frequency map, `{ word: zipf }`.
    #[serde(default = "default_frequencies_path")]
    pub frequencies_path: PathBuf,

    /// Word definitions, `{ word: definition }`.
    #[serde(default = "default_definitions_path")]
    pub definitions_path: PathBuf,

    /// Append-only journal event log (JSON lines).
    #[serde(default = "default_event_log_path")]
    pub event_log_path: PathBuf,

    /// Vocabulary aggregate snapshot (JSON, rewritten atomically).
    #[serde(default = "default_aggregate_path")]
    pub aggregate_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            words_path: default_words_path(),
            frequencies_path: default_frequencies_path(),
            definitions_path: default_definitions_path(),
            event_log_path: default_event_log_path(),
            aggregate_path: default_aggregate_path(),
        }
    }
}

/// Journal buffering and persistence cadence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JournalConfig {
    /// Events buffered before an automatic log flush.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Seconds between aggregate saves (and log flushes).
    #[serde(default = "default_save_interval_secs")]
    pub save_interval_secs: u64,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            save_interval_secs: default_save_interval_secs(),
        }
    }
}

/// Solver bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SolverConfig {
    /// Unique player words beyond which the longest are kept.
    #[serde(default = "default_max_unique_words")]
    pub max_unique_words: usize,

    /// Per-request ceiling; exceeding it returns 500 to the client.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Depth of the ingress-to-solver queue.
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_unique_words: default_max_unique_words(),
            request_timeout_ms: default_request_timeout_ms(),
            queue_depth: default_queue_depth(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3000
}

fn default_words_path() -> PathBuf {
    PathBuf::from("data/words.txt")
}

fn default_frequencies_path() -> PathBuf {
    PathBuf::from("data/word_frequencies.json")
}

fn default_definitions_path() -> PathBuf {
    PathBuf::from("data/definitions.json")
}

fn default_event_log_path() -> PathBuf {
    PathBuf::from("logs/player_vocabulary.jsonl")
}

fn default_aggregate_path() -> PathBuf {
    PathBuf::from("logs/vocabulary_aggregate.json")
}

const fn default_batch_size() -> usize {
    10
}

const fn default_save_interval_secs() -> u64 {
    30
}

const fn default_max_unique_words() -> usize {
    16
}

const fn default_request_timeout_ms() -> u64 {
    5_000
}

const fn default_queue_depth() -> usize {
    64
}
