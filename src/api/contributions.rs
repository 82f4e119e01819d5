//! Contribution API endpoints.

use std::cmp::Ordering;

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_topic, ApiResult};
use crate::errors::AppError;
use crate::models::{now_timestamp, parse_timestamp, Contribution, CreateContributionRequest};
use crate::AppState;

/// GET /api/topics/:id/contributions - Contributions of a topic, newest first.
pub async fn list_contributions(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
) -> ApiResult<Vec<Contribution>> {
    require_topic(&state, &topic_id).await?;

    let mut contributions = state.repo.list_topic_contributions(&topic_id).await?;
    sort_newest_first(&mut contributions);

    Ok(Json(contributions))
}

/// POST /api/topics/:id/contributions - Submit a contribution.
pub async fn create_contribution(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
    Json(request): Json<CreateContributionRequest>,
) -> ApiResult<Contribution> {
    require_topic(&state, &topic_id).await?;

    if request.content.trim().is_empty() {
        return Err(AppError::Validation("Content is required".to_string()));
    }

    let contribution = Contribution {
        id: uuid::Uuid::new_v4().to_string(),
        topic_id,
        content: request.content,
        created_at: now_timestamp(),
        contributor_email: request
            .contributor_email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty()),
    };

    state.repo.create_contribution(&contribution).await?;
    tracing::info!(
        topic_id = %contribution.topic_id,
        contribution_id = %contribution.id,
        "Contribution added"
    );

    Ok(Json(contribution))
}

/// Sort by `created_at` descending. Stable, so equal timestamps keep store order.
pub(crate) fn sort_newest_first(contributions: &mut [Contribution]) {
    contributions.sort_by(|a, b| {
        match (parse_timestamp(&a.created_at), parse_timestamp(&b.created_at)) {
            (Some(a_at), Some(b_at)) => b_at.cmp(&a_at),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => b.created_at.cmp(&a.created_at),
        }
    });
}
