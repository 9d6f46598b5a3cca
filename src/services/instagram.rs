// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Instagram account linking over the backend's OAuth flow.
//!
//! Linking is two-phase: the backend mints an authorization URL bound to
//! an opaque CSRF `state`, the user completes consent in the browser, and
//! the provider redirect delivers `(code, state)` back for exchange. An
//! arbitrary delay, or a process restart, may separate the phases; the
//! `state` value is the sole correlation across that gap and is single-use
//! on the backend, so a replayed exchange fails rather than re-returning
//! the original account.

use crate::error::{ApiError, Result};
use crate::models::instagram::{
    AuthorizationUrl, CallbackExchange, CallbackParams, Disconnected, LinkedAccount, MediaItem,
    SyncOutcome,
};
use crate::services::api::ApiClient;
use crate::services::session::SessionStore;
use std::sync::Arc;

/// Drives the OAuth linking flow and the per-account operations.
///
/// Holds the session by reference for authorization headers only; every
/// operation requires an authenticated session.
#[derive(Clone)]
pub struct AccountLinker {
    api: ApiClient,
    session: Arc<SessionStore>,
}

impl AccountLinker {
    pub fn new(api: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// Ask the backend to mint an authorization URL.
    ///
    /// The caller is expected to navigate the browser to the returned
    /// URL. Fails with `Authentication` before any network I/O when no
    /// session is held.
    pub async fn authorization_url(&self) -> Result<AuthorizationUrl> {
        let token = self.session.access_token().await?;

        let url: AuthorizationUrl = self
            .fail_closed(self.api.get_json("/instagram/auth/url", Some(token.as_str())).await)
            .await?;

        tracing::info!("Authorization URL issued");
        Ok(url)
    }

    /// Process the provider redirect and exchange the code for a linked
    /// account.
    ///
    /// Validation order, each step short-circuiting the next:
    /// 1. a provider `error` fails the attempt without contacting the
    ///    backend;
    /// 2. a missing `code` or `state` is a malformed callback;
    /// 3. otherwise the pair is exchanged; the backend re-validates the
    ///    `state` it issued and rejects replays.
    pub async fn handle_callback(&self, params: &CallbackParams) -> Result<LinkedAccount> {
        if let Some(error) = &params.error {
            let description = params
                .error_description
                .clone()
                .unwrap_or_else(|| error.clone());
            tracing::warn!(error = %error, "Provider returned an OAuth error");
            return Err(ApiError::AuthorizationDenied(description));
        }

        let (code, state) = match (&params.code, &params.state) {
            (Some(code), Some(state)) => (code.clone(), state.clone()),
            _ => {
                return Err(ApiError::MalformedCallback(
                    "redirect is missing the code or state parameter".to_string(),
                ))
            }
        };

        let token = self.session.access_token().await?;
        let exchange = CallbackExchange { code, state };

        let result: Result<LinkedAccount> = self
            .fail_closed(
                self.api
                    .post_json("/instagram/auth/callback", &exchange, Some(token.as_str()))
                    .await,
            )
            .await;

        match result {
            Ok(account) => {
                tracing::info!(
                    account_id = account.id,
                    username = %account.username,
                    "Instagram account linked"
                );
                Ok(account)
            }
            // A stale, mismatched, or replayed state comes back as a
            // client error from the backend; that is a denied grant, not
            // bad user input.
            Err(ApiError::Validation(detail)) => Err(ApiError::AuthorizationDenied(detail)),
            Err(e) => Err(e),
        }
    }

    /// All linked accounts for the current user, oldest first.
    pub async fn accounts(&self) -> Result<Vec<LinkedAccount>> {
        let token = self.session.access_token().await?;
        self.fail_closed(self.api.get_json("/instagram/accounts", Some(token.as_str())).await)
            .await
    }

    /// Refresh an account's metrics and media server-side.
    ///
    /// Counters on any locally held `LinkedAccount` are stale after this
    /// call; re-fetch the account list to observe them.
    pub async fn sync(&self, account_id: i64) -> Result<SyncOutcome> {
        let token = self.session.access_token().await?;
        let path = format!("/instagram/accounts/{}/sync", account_id);

        let outcome: SyncOutcome = self
            .fail_closed(
                self.api
                    .post_json(&path, &serde_json::json!({}), Some(token.as_str()))
                    .await,
            )
            .await?;

        tracing::info!(
            account_id,
            synced_media_count = outcome.synced_media_count,
            "Account synced"
        );
        Ok(outcome)
    }

    /// Media for an account. An empty list is a valid result, not an
    /// error.
    pub async fn media(&self, account_id: i64) -> Result<Vec<MediaItem>> {
        let token = self.session.access_token().await?;
        let path = format!("/instagram/accounts/{}/media", account_id);
        self.fail_closed(self.api.get_json(&path, Some(token.as_str())).await)
            .await
    }

    /// Disconnect an account. Irreversible; the account no longer appears
    /// in subsequent listings.
    pub async fn disconnect(&self, account_id: i64) -> Result<Disconnected> {
        let token = self.session.access_token().await?;
        let path = format!("/instagram/accounts/{}", account_id);

        let outcome: Disconnected = self
            .fail_closed(self.api.delete_json(&path, Some(token.as_str())).await)
            .await?;

        tracing::info!(account_id, "Account disconnected");
        Ok(outcome)
    }

    /// Apply the fail-closed rule: a credential rejection downgrades the
    /// session as a side effect. No other error kind touches it.
    async fn fail_closed<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_authentication() {
                tracing::warn!("Credential rejected mid-session, clearing it");
                self.session.invalidate().await;
            }
        }
        result
    }
}
