//! Domain error types for githistory.
//!
//! Infrastructure adapters raise these; the orchestration layer carries them
//! upward inside `anyhow::Error` without catching them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while talking to the git CLI.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Failed to execute git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("git {args} failed: {stderr}")]
    CommandFailed { args: String, stderr: String },

    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    #[error("git executable not found")]
    NotInstalled,
}

/// Errors raised by the local history server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind history server on {host}: {source}")]
    Bind {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("History server has been shut down")]
    Stopped,
}

/// Errors raised while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
