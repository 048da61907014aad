//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or validate a [`GameConfig`](crate::GameConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid JSON for the config schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config parsed but describes an unplayable game.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level error for the headless runner.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Input recording could not be read or written.
    #[error("input recording {path}: {source}")]
    Recording {
        /// Recording file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Input recording could not be encoded or decoded.
    #[error("input recording format: {0}")]
    RecordingFormat(#[from] serde_json::Error),

    /// A replay produced a different final state than the live run.
    #[error("replay diverged: live {live} != replay {replay}")]
    ReplayDiverged {
        /// Hex state hash of the live run
        live: String,
        /// Hex state hash of the replay
        replay: String,
    },
}
