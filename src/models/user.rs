//! User account models.

use serde::{Deserialize, Serialize};

/// A stored user account. The email is the identity.
///
/// Only the Argon2 PHC string is kept; the raw password never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub name: String,
}

/// The account as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub email: String,
    pub name: String,
}

impl From<&UserAccount> for PublicUser {
    fn from(account: &UserAccount) -> Self {
        Self {
            email: account.email.clone(),
            name: account.name.clone(),
        }
    }
}

/// Request body for account creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Request body for sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Response body for account creation and sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: PublicUser,
}

/// Canonical form of an email used as identity.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
