//! Summary model: the generated report for a topic.

use serde::{Deserialize, Serialize};

/// Generated summary. Only the latest one per topic is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub topic_id: String,
    pub content: String,
    pub generated_at: String,
}
