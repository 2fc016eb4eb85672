// ABOUTME: SessionLocator trait and the tmux-backed implementation
// Resolves the ambient session of the calling process and injects literal keystrokes

use std::io::ErrorKind;
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::RelayConfig;
use crate::tmux::TmuxError;

/// Resolves and drives named terminal execution contexts.
///
/// Abstracted as a trait because the ambient-session query is a side-channel
/// lookup into the host environment; relay logic is exercised in tests with a
/// deterministic fake.
#[async_trait]
pub trait SessionLocator: Send + Sync {
    /// Name of the tmux session the calling process is attached to.
    /// Best-effort: `None` when the query fails or no tmux is active,
    /// never an error.
    async fn current_session(&self) -> Option<String>;

    /// Whether a named session is still live on the tmux server.
    async fn session_exists(&self, name: &str) -> Result<bool, TmuxError>;

    /// Deliver `text` into the named session as literal keystrokes,
    /// followed by an Enter key to execute it. The text is not interpreted
    /// or escaped beyond what literal delivery requires.
    async fn send_keys(&self, name: &str, text: &str) -> Result<(), TmuxError>;
}

pub struct TmuxLocator {
    timeout: Duration,
}

impl TmuxLocator {
    pub fn new(config: &RelayConfig) -> Self {
        Self {
            timeout: config.tmux_timeout,
        }
    }

    /// Run one tmux invocation under the configured hard time bound.
    async fn run_tmux(&self, args: &[&str]) -> Result<Output, TmuxError> {
        let mut command = Command::new("tmux");
        // A timed-out tmux call must not leak a hung child process
        command.args(args).kill_on_drop(true);

        match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(error)) if error.kind() == ErrorKind::NotFound => Err(TmuxError::NotInstalled),
            Ok(Err(error)) => Err(TmuxError::Io(error)),
            Err(_) => Err(TmuxError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl SessionLocator for TmuxLocator {
    async fn current_session(&self) -> Option<String> {
        // Only meaningful when the calling process runs inside tmux
        std::env::var_os("TMUX")?;

        let output = self
            .run_tmux(&["display-message", "-p", "#S"])
            .await
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    async fn session_exists(&self, name: &str) -> Result<bool, TmuxError> {
        // -t= forces an exact name match instead of tmux's prefix matching
        let output = self
            .run_tmux(&["has-session", "-t", &format!("={}", name)])
            .await?;

        Ok(output.status.success())
    }

    async fn send_keys(&self, name: &str, text: &str) -> Result<(), TmuxError> {
        let target = format!("={}", name);

        // -l sends the text literally; -- guards a leading dash in the command
        let send = self
            .run_tmux(&["send-keys", "-t", &target, "-l", "--", text])
            .await?;

        if !send.status.success() {
            let stderr = String::from_utf8_lossy(&send.stderr);
            if stderr.contains("can't find") {
                return Err(TmuxError::SessionNotFound(name.to_string()));
            }
            return Err(TmuxError::CommandFailed(stderr.trim().to_string()));
        }

        let enter = self.run_tmux(&["send-keys", "-t", &target, "Enter"]).await?;

        if !enter.status.success() {
            let stderr = String::from_utf8_lossy(&enter.stderr);
            return Err(TmuxError::CommandFailed(stderr.trim().to_string()));
        }

        tracing::debug!(session = %name, bytes = text.len(), "keystrokes delivered");
        Ok(())
    }
}
