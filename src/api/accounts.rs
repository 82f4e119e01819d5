//! Account endpoints: creation and credential check.
//!
//! No token or session is issued; sign-in only confirms the credentials.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::auth::{dummy_hash, hash_password, verify_password, MIN_PASSWORD_LEN};
use crate::errors::AppError;
use crate::models::{
    normalize_email, AuthResponse, CreateAccountRequest, PublicUser, SignInRequest, UserAccount,
};
use crate::AppState;

/// POST /auth/create-account - Register a user.
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> ApiResult<AuthResponse> {
    let email = normalize_email(&request.email);
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let account = UserAccount {
        email,
        password_hash: hash_password(&request.password)?,
        name: request.name.unwrap_or_default().trim().to_string(),
    };

    let stored = state.repo.create_user(&account).await?;
    tracing::info!(email = %stored.email, "Account created");

    Ok(Json(AuthResponse {
        user: PublicUser::from(&stored),
    }))
}

/// POST /auth/signin - Check credentials.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> ApiResult<AuthResponse> {
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let account = state.repo.get_user(&request.email).await?;

    // Unknown emails still pay for a full verification.
    let hash = match &account {
        Some(account) => account.password_hash.clone(),
        None => dummy_hash()?,
    };
    let valid = verify_password(&request.password, &hash)?;

    let account = match account {
        Some(account) if valid => account,
        Some(account) => {
            tracing::warn!(email = %account.email, "Sign-in rejected");
            return Err(invalid());
        }
        None => return Err(invalid()),
    };

    Ok(Json(AuthResponse {
        user: PublicUser::from(&account),
    }))
}
