//! Error types for the engine binary.

use tilelab_core::ConfigError;
use tilelab_observer::startup::StartupError;

/// Errors that can abort engine startup.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP server could not be spawned.
    #[error("server error: {0}")]
    Server(#[from] StartupError),
}
