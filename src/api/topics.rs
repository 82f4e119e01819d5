//! Topic API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_topic, ApiResult};
use crate::errors::AppError;
use crate::models::{now_timestamp, CreateTopicRequest, Topic};
use crate::AppState;

/// GET /api/topics - List all topics.
pub async fn list_topics(State(state): State<AppState>) -> ApiResult<Vec<Topic>> {
    Ok(Json(state.repo.list_topics().await?))
}

/// GET /api/topics/:id - Get a single topic.
pub async fn get_topic(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Topic> {
    Ok(Json(require_topic(&state, &id).await?))
}

/// POST /api/topics - Create a new topic.
pub async fn create_topic(
    State(state): State<AppState>,
    Json(request): Json<CreateTopicRequest>,
) -> ApiResult<Topic> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let topic = Topic {
        id: uuid::Uuid::new_v4().to_string(),
        title: request.title,
        description: request.description,
        created_at: now_timestamp(),
    };

    state.repo.create_topic(&topic).await?;
    tracing::info!(topic_id = %topic.id, "Topic created");

    Ok(Json(topic))
}
