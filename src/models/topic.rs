//! Topic model: a discussion subject that contributions and a summary attach to.

use serde::{Deserialize, Serialize};

/// A topic. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
}

/// Request body for creating a new topic.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTopicRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}
