// ABOUTME: Session record data model mapping a relay token to a target tmux session
// Records are write-once: created at notification time, removed on expiry or rollback

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel stored in `target_session` when no tmux session could be
/// resolved at creation time.
pub const UNKNOWN_TARGET: &str = "unknown";

/// How long a session record stays live after creation. Expiry is final;
/// there is no renewal.
pub const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub token: String,
    pub channel: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
    pub target_session: String,
    pub project: Option<String>,
    pub payload: Option<serde_json::Value>,
}

impl SessionRecord {
    pub fn new(
        token: String,
        channel: String,
        target_session: Option<String>,
        project: Option<String>,
        payload: Option<serde_json::Value>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            token,
            channel,
            created: now,
            expires: now + Duration::hours(SESSION_TTL_HOURS),
            target_session: target_session.unwrap_or_else(|| UNKNOWN_TARGET.to_string()),
            project,
            payload,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires
    }

    /// Whether a real tmux session was resolved at creation time.
    pub fn has_target(&self) -> bool {
        self.target_session != UNKNOWN_TARGET
    }
}
