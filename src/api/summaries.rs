//! Summary API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use super::{require_topic, ApiResult};
use crate::errors::AppError;
use crate::models::Summary;
use crate::summary::generate_summary;
use crate::AppState;

/// POST /api/topics/:id/generate-summary - Generate and store a summary.
pub async fn create_summary(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> ApiResult<Summary> {
    let topic = require_topic(&state, &topic_id).await?;
    let contributions = state.repo.list_topic_contributions(&topic_id).await?;

    let summary = generate_summary(&topic, &contributions, Utc::now())?;
    state.repo.save_summary(&summary).await?;

    tracing::info!(
        topic_id = %topic_id,
        contributions = contributions.len(),
        "Summary generated"
    );

    Ok(Json(summary))
}

/// GET /api/topics/:id/summary - Latest generated summary.
pub async fn get_summary(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> ApiResult<Summary> {
    require_topic(&state, &topic_id).await?;

    state
        .repo
        .get_summary(&topic_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Summary not found".to_string()))
}
