// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Linked Instagram account and media models, plus the OAuth redirect
//! callback parameter contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A connected Instagram account owned by the current user.
///
/// Created by a successful callback exchange, refreshed by sync,
/// removed by disconnect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedAccount {
    /// Internal account id
    pub id: i64,
    /// Instagram's user id for the account
    pub instagram_user_id: String,
    /// Account handle
    pub username: String,
    /// Classification, e.g. "BUSINESS" or "PERSONAL"
    pub account_type: String,
    /// Cached media count; `None` means not yet synced, not zero
    pub media_count: Option<i64>,
    /// Cached follower count; `None` means not yet synced
    pub followers_count: Option<i64>,
    /// Cached following count; `None` means not yet synced
    pub follows_count: Option<i64>,
    /// Platform access token held by the backend
    pub access_token: String,
    /// When the platform token expires, if known
    pub token_expires_at: Option<DateTime<Utc>>,
    /// Inactive accounts cannot be synced or disconnected
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A media item belonging to a linked account. Read-only; fetched on
/// demand and never persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    /// Internal media id
    pub id: i64,
    /// Instagram's media id
    pub instagram_media_id: String,
    /// Media type tag, e.g. "IMAGE", "VIDEO", "CAROUSEL_ALBUM"
    pub media_type: String,
    pub media_url: Option<String>,
    pub permalink: Option<String>,
    pub caption: Option<String>,
    /// When the media was posted
    pub timestamp: DateTime<Utc>,
    pub like_count: Option<i64>,
    pub comments_count: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Authorization URL minted by the backend for the OAuth flow.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthorizationUrl {
    pub auth_url: String,
}

impl AuthorizationUrl {
    /// Extract the opaque CSRF `state` value embedded in the URL.
    ///
    /// The state is the sole correlation between this request and the
    /// provider's redirect, so callers may want to log or display it.
    pub fn state(&self) -> Option<String> {
        let query = self.auth_url.split_once('?')?.1;
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key == "state" {
                urlencoding::decode(value).ok().map(|v| v.into_owned())
            } else {
                None
            }
        })
    }
}

/// Request body for the callback code exchange.
#[derive(Debug, Clone, Serialize)]
pub struct CallbackExchange {
    pub code: String,
    pub state: String,
}

/// Result of a sync request. The counters on the corresponding
/// `LinkedAccount` are stale until the next account listing.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncOutcome {
    pub message: String,
    pub synced_media_count: u32,
}

/// Result of disconnecting an account.
#[derive(Debug, Clone, Deserialize)]
pub struct Disconnected {
    pub message: String,
}

/// Query parameters delivered by the provider's browser redirect.
///
/// The redirect carries either an error pair or a `(code, state)` pair.
/// This contract is fixed by the upstream OAuth provider.
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Parse a raw redirect query string (with or without a leading '?',
    /// or a full URL) into callback parameters.
    pub fn from_query(query: &str) -> Self {
        let query = query
            .rsplit_once('?')
            .map(|(_, q)| q)
            .unwrap_or(query)
            .trim_start_matches('?');

        let mut params = Self::default();
        for pair in query.split('&') {
            let (key, value) = match pair.split_once('=') {
                Some(kv) => kv,
                None => continue,
            };
            let value = match urlencoding::decode(value) {
                Ok(v) => v.into_owned(),
                Err(_) => continue,
            };
            match key {
                "code" => params.code = Some(value),
                "state" => params.state = Some(value),
                "error" => params.error = Some(value),
                "error_description" => params.error_description = Some(value),
                _ => {}
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_params_success_pair() {
        let params = CallbackParams::from_query("code=abc123&state=xyz789");
        assert_eq!(params.code.as_deref(), Some("abc123"));
        assert_eq!(params.state.as_deref(), Some("xyz789"));
        assert!(params.error.is_none());
    }

    #[test]
    fn test_callback_params_error_pair() {
        let params = CallbackParams::from_query(
            "error=access_denied&error_description=The%20user%20denied%20your%20request",
        );
        assert_eq!(params.error.as_deref(), Some("access_denied"));
        assert_eq!(
            params.error_description.as_deref(),
            Some("The user denied your request")
        );
        assert!(params.code.is_none());
    }

    #[test]
    fn test_callback_params_from_full_url() {
        let params = CallbackParams::from_query(
            "https://dashboard.example.com/instagram/callback?code=abc&state=st",
        );
        assert_eq!(params.code.as_deref(), Some("abc"));
        assert_eq!(params.state.as_deref(), Some("st"));
    }

    #[test]
    fn test_callback_params_ignores_unknown_keys() {
        let params = CallbackParams::from_query("?code=abc&state=st&utm_source=share");
        assert_eq!(params.code.as_deref(), Some("abc"));
        assert_eq!(params.state.as_deref(), Some("st"));
    }

    #[test]
    fn test_authorization_url_state_extraction() {
        let url = AuthorizationUrl {
            auth_url: "https://api.instagram.com/oauth/authorize?client_id=1&redirect_uri=https%3A%2F%2Fexample.com&state=opaque%2Dstate".to_string(),
        };
        assert_eq!(url.state().as_deref(), Some("opaque-state"));
    }

    #[test]
    fn test_authorization_url_without_state() {
        let url = AuthorizationUrl {
            auth_url: "https://api.instagram.com/oauth/authorize?client_id=1".to_string(),
        };
        assert_eq!(url.state(), None);
    }

    #[test]
    fn test_linked_account_absent_counters_stay_absent() {
        let json = r#"{
            "id": 7,
            "instagram_user_id": "17841400000000000",
            "username": "analytics_co",
            "account_type": "BUSINESS",
            "access_token": "IGQVJ...",
            "is_active": true,
            "created_at": "2025-06-30T23:26:00Z",
            "updated_at": "2025-06-30T23:26:00Z"
        }"#;
        let account: LinkedAccount = serde_json::from_str(json).unwrap();
        // Absent counters mean not-yet-synced, distinct from synced-to-zero
        assert_eq!(account.media_count, None);
        assert_eq!(account.followers_count, None);
        assert_eq!(account.follows_count, None);
        assert_eq!(account.token_expires_at, None);
    }

    #[test]
    fn test_linked_account_zero_counter_is_zero() {
        let json = r#"{
            "id": 7,
            "instagram_user_id": "17841400000000000",
            "username": "analytics_co",
            "account_type": "BUSINESS",
            "media_count": 0,
            "access_token": "IGQVJ...",
            "is_active": true,
            "created_at": "2025-06-30T23:26:00Z",
            "updated_at": "2025-06-30T23:26:00Z"
        }"#;
        let account: LinkedAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.media_count, Some(0));
    }
}
