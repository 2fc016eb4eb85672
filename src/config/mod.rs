// ABOUTME: Runtime configuration for the relay core
// Resolves the session storage directory and the subprocess time bound

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Directory holding one JSON file per session record.
    pub storage_dir: PathBuf,
    /// Hard time bound on every tmux subprocess call. A timeout fails the
    /// single request, never the hosting process.
    pub tmux_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        let storage_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tmux-relay")
            .join("sessions");

        Self {
            storage_dir,
            tmux_timeout: Duration::from_secs(3),
        }
    }
}

impl RelayConfig {
    /// Config rooted at an explicit storage directory, keeping default timings.
    pub fn with_storage_dir(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            ..Self::default()
        }
    }
}
