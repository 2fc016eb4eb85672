// ABOUTME: Core data models for relay sessions and the notification boundary

pub mod notification;
pub mod session;

pub use notification::Notification;
pub use session::{SessionRecord, SESSION_TTL_HOURS, UNKNOWN_TARGET};
