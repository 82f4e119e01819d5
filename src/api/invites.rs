//! Invitation endpoint. Acknowledges only; nothing is stored or sent.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_topic, ApiResult};
use crate::errors::AppError;
use crate::models::{InviteRequest, InviteResponse};
use crate::AppState;

/// POST /api/topics/:id/invite - Acknowledge an invitation request.
pub async fn invite_users(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
    Json(request): Json<InviteRequest>,
) -> ApiResult<InviteResponse> {
    require_topic(&state, &topic_id).await?;
    validate_emails(&request.emails)?;

    tracing::info!(
        topic_id = %topic_id,
        count = request.emails.len(),
        "Invitation request acknowledged"
    );

    Ok(Json(InviteResponse {
        message: format!("Invitations sent to {} users", request.emails.len()),
        invited_emails: request.emails,
        topic_id,
    }))
}

fn validate_emails(emails: &[String]) -> Result<(), AppError> {
    if emails.is_empty() {
        return Err(AppError::Validation(
            "At least one email is required".to_string(),
        ));
    }

    if let Some(bad) = emails
        .iter()
        .find(|e| e.trim().is_empty() || !e.contains('@'))
    {
        return Err(AppError::Validation(format!(
            "Invalid email address: '{}'",
            bad
        )));
    }

    Ok(())
}
