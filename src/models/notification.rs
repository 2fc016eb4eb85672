// ABOUTME: Notification payload consumed at session registration time
// Carries opaque display metadata from the originating channel; the relay never interprets it

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Origin channel tag, fixed per channel implementation (e.g. "telegram").
    pub channel: String,
    pub project: Option<String>,
    pub message: String,
    pub metadata: Option<serde_json::Value>,
}

impl Notification {
    pub fn new(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            project: None,
            message: message.into(),
            metadata: None,
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
