// ABOUTME: Error types for tmux session location and keystroke delivery
// Defines error conditions that can occur when talking to the host tmux server

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TmuxError {
    #[error("tmux not installed on host")]
    NotInstalled,

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("tmux command failed: {0}")]
    CommandFailed(String),

    #[error("tmux command timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
