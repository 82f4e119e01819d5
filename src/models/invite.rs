//! Invitation request and acknowledgment. Nothing here is persisted.

use serde::{Deserialize, Serialize};

/// Request body for inviting collaborators to a topic.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteRequest {
    pub emails: Vec<String>,
}

/// Acknowledgment echoed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteResponse {
    pub message: String,
    pub invited_emails: Vec<String>,
    pub topic_id: String,
}
