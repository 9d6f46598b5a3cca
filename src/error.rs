// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error taxonomy for dashboard API calls.
//!
//! Every failure surfaces as a structured kind plus a human-readable
//! message, sourced from the backend's `detail` field when present.
//! `Authentication` is the only kind that triggers a session side effect
//! (fail-closed credential clearing in `SessionStore`).

use crate::models::user::UserIdentity;

/// Client error type covering the full API surface.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed input, recoverable by correcting it (400/422).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Missing, invalid, or expired credential (401).
    #[error("authentication required: {0}")]
    Authentication(String),

    /// The user or provider refused the OAuth grant. Terminal for the
    /// attempt; retry means restarting the whole flow.
    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),

    /// Provider redirect missing required parameters (broken link or
    /// bookmark). Terminal; retry by restarting the flow.
    #[error("malformed callback: {0}")]
    MalformedCallback(String),

    /// Duplicate registration (email or username already taken).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Account id not owned by the current user, or inactive (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Backend or provider unreachable, 5xx, or timeout. Safe to retry
    /// the same operation.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Registration succeeded but the follow-up login did not. The
    /// account exists; the caller should prompt for a manual login.
    #[error("account created but login failed: {source}")]
    RegisteredNotLoggedIn {
        user: UserIdentity,
        #[source]
        source: Box<ApiError>,
    },

    /// Token slot I/O failure.
    #[error("token store error: {0}")]
    Store(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// The human-readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(m)
            | ApiError::Authentication(m)
            | ApiError::AuthorizationDenied(m)
            | ApiError::MalformedCallback(m)
            | ApiError::Conflict(m)
            | ApiError::NotFound(m)
            | ApiError::Upstream(m)
            | ApiError::Store(m) => m,
            ApiError::RegisteredNotLoggedIn { .. } => "account created but login failed",
            ApiError::Internal(_) => "internal error",
        }
    }

    /// True for the kind that demotes the session when detected mid-use.
    pub fn is_authentication(&self) -> bool {
        matches!(self, ApiError::Authentication(_))
    }
}

/// Map an HTTP status plus extracted `detail` text to an error kind.
pub fn classify_status(status: reqwest::StatusCode, detail: String) -> ApiError {
    match status.as_u16() {
        400 | 422 => ApiError::Validation(detail),
        401 => ApiError::Authentication(detail),
        403 => ApiError::AuthorizationDenied(detail),
        404 => ApiError::NotFound(detail),
        409 => ApiError::Conflict(detail),
        // 408/429 and all 5xx are retryable upstream conditions
        _ => ApiError::Upstream(detail),
    }
}

/// Extract the `detail` field from an error body.
///
/// FastAPI-style backends return either `{"detail": "..."}` or, for
/// field-level validation, `{"detail": [{"loc": [...], "msg": "..."}]}`.
/// Anything unparseable falls back to the raw body or a status line.
pub fn extract_detail(status: reqwest::StatusCode, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    if let Some(detail) = parsed.as_ref().and_then(|v| v.get("detail")) {
        match detail {
            serde_json::Value::String(s) => return s.clone(),
            serde_json::Value::Array(items) => {
                let msgs: Vec<String> = items
                    .iter()
                    .map(|item| {
                        let field = item
                            .get("loc")
                            .and_then(|loc| loc.as_array())
                            .and_then(|loc| loc.last())
                            .and_then(|f| f.as_str())
                            .unwrap_or("input");
                        let msg = item
                            .get("msg")
                            .and_then(|m| m.as_str())
                            .unwrap_or("invalid");
                        format!("{}: {}", field, msg)
                    })
                    .collect();
                if !msgs.is_empty() {
                    return msgs.join("; ");
                }
            }
            other => return other.to_string(),
        }
    }
    if body.trim().is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body.trim())
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;
