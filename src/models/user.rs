//! User identity and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Backend user id
    pub id: i64,
    /// Email address
    pub email: String,
    /// Unique username
    pub username: String,
    /// First name (may be omitted at registration)
    pub first_name: Option<String>,
    /// Last name (may be omitted at registration)
    pub last_name: Option<String>,
    /// Whether the account is active
    pub is_active: bool,
    /// Whether the email has been verified
    pub is_verified: bool,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Bearer credential proving an authenticated session.
///
/// Doubles as the login response body and the persisted token-slot
/// payload. Never mutated; re-login replaces it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    /// Always "bearer" with this backend
    pub token_type: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// Login request body. `login` may be an email or a username.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}
