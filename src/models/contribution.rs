//! Contribution model: one piece of submitted text belonging to a topic.

use serde::{Deserialize, Serialize};

/// A contribution. Never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub topic_id: String,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub contributor_email: Option<String>,
}

/// Request body for submitting a contribution.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContributionRequest {
    pub content: String,
    #[serde(default)]
    pub contributor_email: Option<String>,
}
