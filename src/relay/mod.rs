// ABOUTME: Command relay core: validates a token and forwards a command to its tmux session
// Also owns the session-registration boundary that mints tokens for outbound notifications

pub mod token;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Notification, SessionRecord};
use crate::store::{SessionStore, StoreError};
use crate::tmux::{SessionLocator, TmuxError};

/// Collision-regeneration bound for token allocation. With 36^8 candidate
/// tokens and low live-session counts, hitting this means the store is
/// misbehaving, not that we were unlucky.
const MAX_TOKEN_ATTEMPTS: usize = 5;

const TOKEN_NOT_FOUND: &str = "token not found or expired";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("session store error: {0}")]
    Store(#[from] StoreError),

    #[error("tmux error: {0}")]
    Tmux(#[from] TmuxError),

    #[error("could not allocate a unique token after {0} attempts")]
    TokenExhausted(usize),
}

/// Structured result of one relay attempt. Expected failures (unknown or
/// expired token, dead target, delivery failure) land here; only
/// infrastructure failures surface as `RelayError`.
#[derive(Debug, Clone)]
pub struct RelayOutcome {
    pub success: bool,
    pub session: Option<SessionRecord>,
    pub message: Option<String>,
}

impl RelayOutcome {
    fn delivered(session: SessionRecord) -> Self {
        Self {
            success: true,
            session: Some(session),
            message: None,
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            session: None,
            message: Some(message.into()),
        }
    }
}

/// What the caller gets back after registering a session: the token and id
/// to display to the end user, plus the resolved target.
#[derive(Debug, Clone)]
pub struct RegisteredSession {
    pub token: String,
    pub id: Uuid,
    pub target_session: String,
}

/// Split a raw chat line into `(token, command_text)` per the inbound
/// pattern `^[A-Z0-9]{8}\s+.+$`. Returns `None` for malformed input so the
/// caller can reject it before invoking the relay.
pub fn parse_command_input(input: &str) -> Option<(&str, &str)> {
    let trimmed = input.trim();
    let (candidate, rest) = trimmed.split_once(char::is_whitespace)?;
    let command_text = rest.trim_start();

    if token::is_valid(candidate) && !command_text.is_empty() {
        Some((candidate, command_text))
    } else {
        None
    }
}

/// The command-relay core.
///
/// Stateless between calls: every invocation reads the store fresh, so
/// relays for different tokens can run concurrently. Concurrent relays for
/// the *same* token race at the keystroke-delivery step and may interleave
/// in the target pane; callers needing strict ordering must serialize per
/// token themselves.
pub struct CommandRelay<S, L> {
    store: S,
    locator: L,
}

impl<S, L> CommandRelay<S, L>
where
    S: SessionStore,
    L: SessionLocator,
{
    pub fn new(store: S, locator: L) -> Self {
        Self { store, locator }
    }

    /// Validate `token` and forward `command_text` verbatim into its bound
    /// tmux session. At-most-once: no retry on delivery failure.
    pub async fn relay_command(
        &self,
        token: &str,
        command_text: &str,
    ) -> Result<RelayOutcome, RelayError> {
        if command_text.is_empty() {
            return Ok(RelayOutcome::rejected("empty command"));
        }

        let Some(session) = self.store.find_by_token(token)? else {
            tracing::debug!(token, "relay rejected: no live session for token");
            return Ok(RelayOutcome::rejected(TOKEN_NOT_FOUND));
        };

        // The store already filters expired records; this re-check keeps the
        // relay correct against any store implementation and lets it clean
        // up the stale record when it does fire.
        if session.is_expired(Utc::now()) {
            if let Err(error) = self.store.remove(session.id) {
                tracing::warn!(id = %session.id, %error, "failed to remove expired session record");
            }
            return Ok(RelayOutcome::rejected(TOKEN_NOT_FOUND));
        }

        if !session.has_target() {
            return Ok(RelayOutcome::rejected("no target session"));
        }

        if !self.locator.session_exists(&session.target_session).await? {
            tracing::debug!(session = %session.target_session, "relay rejected: target session gone");
            return Ok(RelayOutcome::rejected("target session no longer active"));
        }

        match self
            .locator
            .send_keys(&session.target_session, command_text)
            .await
        {
            Ok(()) => {
                tracing::info!(session = %session.target_session, "command relayed");
                Ok(RelayOutcome::delivered(session))
            }
            // Target died between the liveness check and delivery. Same
            // surface as a dead target; the record is left for the sweep.
            Err(TmuxError::SessionNotFound(_)) => {
                Ok(RelayOutcome::rejected("target session no longer active"))
            }
            Err(error) => {
                tracing::warn!(session = %session.target_session, %error, "keystroke delivery failed");

                // Rollback: a session whose delivery failed is dead weight
                if let Err(remove_error) = self.store.remove(session.id) {
                    tracing::warn!(id = %session.id, error = %remove_error, "rollback removal failed");
                }

                Ok(RelayOutcome::rejected(format!("delivery failed: {}", error)))
            }
        }
    }

    /// Mint a token for an outbound notification, bind it to the tmux
    /// session the calling process is attached to, and persist the record.
    pub async fn register_session(
        &self,
        notification: &Notification,
    ) -> Result<RegisteredSession, RelayError> {
        let token = self.allocate_token()?;
        let target_session = self.locator.current_session().await;

        let record = SessionRecord::new(
            token,
            notification.channel.clone(),
            target_session,
            notification.project.clone(),
            notification.metadata.clone(),
        );

        let id = self.store.create(&record)?;
        tracing::info!(%id, session = %record.target_session, "session registered");

        Ok(RegisteredSession {
            token: record.token,
            id,
            target_session: record.target_session,
        })
    }

    /// Generate a token that no live session currently holds. Naive random
    /// generation cannot promise this on its own, so each candidate is
    /// checked against the store and regenerated on collision.
    fn allocate_token(&self) -> Result<String, RelayError> {
        for _ in 0..MAX_TOKEN_ATTEMPTS {
            let candidate = token::generate();

            if self.store.find_by_token(&candidate)?.is_none() {
                return Ok(candidate);
            }

            tracing::debug!("token collided with a live session, regenerating");
        }

        Err(RelayError::TokenExhausted(MAX_TOKEN_ATTEMPTS))
    }
}
