//! REST API module.
//!
//! Handlers return bare records on success and the `AppError` envelope on failure.

mod accounts;
mod contributions;
mod invites;
mod summaries;
mod topics;

pub use accounts::*;
pub use contributions::*;
pub use invites::*;
pub use summaries::*;
pub use topics::*;

use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::Topic;
use crate::AppState;

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Liveness message body.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

/// GET / - Liveness message.
pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "UniNoter API is running",
    })
}

/// Load a topic or fail with `NotFound`.
pub(crate) async fn require_topic(state: &AppState, id: &str) -> Result<Topic, AppError> {
    state
        .repo
        .get_topic(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Topic not found".to_string()))
}
