/// Error kinds for the server. These are the fatal, process-startup errors
/// that carry an exit code; per-client errors (invalid join, full game,
/// unknown keystroke) never propagate as a `Result` — the coordinator
/// replies to the offending client directly with the wire message and
/// keeps running, so there's no variant for them here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("usage: server map.txt [seed]")]
    ArgError,

    #[error("unable to load map '{path}': {reason}")]
    MapLoadFailed { path: String, reason: String },

    #[error("failed to initialize transport: {0}")]
    TransportInitFailed(String),
}

impl ServerError {
    /// Process exit code for fatal startup errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServerError::ArgError => 2,
            ServerError::MapLoadFailed { .. } => 3,
            ServerError::TransportInitFailed(_) => 1,
        }
    }
}

/// Seed argument was present but not a non-negative integer.
#[derive(Debug, Error)]
#[error("seed must be a non-negative integer")]
pub struct SeedParseError;
