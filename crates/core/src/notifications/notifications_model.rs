//! Notification domain models.

use serde::{Deserialize, Serialize};

/// A formatted notification ready for channel delivery. The chat channel
/// uses only the body; the email channel uses subject and body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

/// Outcome of one dispatch: which channels were eligible and attempted,
/// and which confirmed delivery. Engine-level success means every eligible
/// channel was attempted, not that every channel confirmed delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub email_attempted: bool,
    pub email_delivered: bool,
    pub chat_attempted: bool,
    pub chat_delivered: bool,
}

impl DispatchReport {
    pub fn attempted_any(&self) -> bool {
        self.email_attempted || self.chat_attempted
    }
}
