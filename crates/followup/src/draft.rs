//! Message draft and delivery receipt records.

use serde::{Deserialize, Serialize};

use launchtrack_core::TaskId;

/// How the current draft text came to be.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftOrigin {
    /// Text as returned by the generation collaborator.
    Generated,
    /// Text modified by the reviewer. Never regenerated without an explicit
    /// new request.
    Edited,
}

/// A follow-up message awaiting review and dispatch.
///
/// Created only after a successful generation call; mutated only by an
/// explicit reviewer edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDraft {
    pub task_id: TaskId,
    pub text: String,
    pub origin: DraftOrigin,
    pub recipient_name: String,
    /// Contact address for the delivery channel.
    pub recipient_phone: String,
}

/// Acknowledgment from the dispatch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Provider-assigned message identifier.
    pub message_id: String,
}
