//! Error types for driver runs.

use ordring::ChannelError;
use thiserror::Error;

/// Errors that can end a driver run.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The channel could not be created.
    #[error("failed to create channel: {0}")]
    Channel(#[from] ChannelError),

    /// A worker thread could not be spawned.
    #[error("failed to spawn {role} thread: {source}")]
    Spawn {
        /// `"producer"` or `"consumer"`.
        role: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked.
    #[error("{0} thread panicked")]
    Panicked(&'static str),

    /// The configuration cannot drive a run.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
