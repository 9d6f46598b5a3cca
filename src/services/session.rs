// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle: registration, login, identity cache, and the
//! persisted bearer credential.
//!
//! The credential is the only shared mutable resource in the client. All
//! access goes through a `RwLock`, so readers observe the value either
//! before or after a login/logout transition, never a torn one. Login
//! attempts are additionally serialized by a guard mutex so an in-flight
//! attempt cannot interleave credential replacement with another.

use crate::error::{ApiError, Result};
use crate::models::user::{Credential, LoginRequest, RegisterRequest, UserIdentity};
use crate::services::api::ApiClient;
use crate::store::TokenStore;
use tokio::sync::{Mutex, RwLock};

#[derive(Default)]
struct SessionState {
    credential: Option<Credential>,
    user: Option<UserIdentity>,
}

/// Owns the bearer credential and the current user identity.
pub struct SessionStore {
    api: ApiClient,
    store: TokenStore,
    state: RwLock<SessionState>,
    /// Serializes login/register-then-login so credential replacement
    /// cannot interleave across attempts.
    login_guard: Mutex<()>,
}

impl SessionStore {
    pub fn new(api: ApiClient, store: TokenStore) -> Self {
        Self {
            api,
            store,
            state: RwLock::new(SessionState::default()),
            login_guard: Mutex::new(()),
        }
    }

    /// Restore a persisted session on process start.
    ///
    /// If a credential is on disk the session is optimistically marked
    /// authenticated, then confirmed against `/auth/me`. A rejected
    /// credential is cleared (fail-closed) and `Ok(false)` is returned;
    /// an unreachable backend keeps the credential and surfaces the
    /// upstream error so the caller can retry.
    pub async fn restore(&self) -> Result<bool> {
        let credential = match self.store.load()? {
            Some(c) => c,
            None => return Ok(false),
        };

        {
            let mut state = self.state.write().await;
            state.credential = Some(credential.clone());
            state.user = None;
        }

        match self.fetch_me(&credential.access_token).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, username = %user.username, "Session restored");
                self.state.write().await.user = Some(user);
                Ok(true)
            }
            Err(e) if e.is_authentication() => {
                tracing::warn!("Persisted credential rejected, clearing session");
                self.invalidate().await;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Load the persisted credential into memory without confirming it.
    ///
    /// Unlike [`restore`](Self::restore) this makes no network call;
    /// validity is checked lazily by the next authenticated operation.
    pub async fn load_persisted(&self) -> Result<bool> {
        match self.store.load()? {
            Some(credential) => {
                let mut state = self.state.write().await;
                state.credential = Some(credential);
                state.user = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Create an account. Does not establish a session.
    ///
    /// Duplicate email/username registrations surface as `Conflict`;
    /// field-level problems stay `Validation`. Messages come from the
    /// backend verbatim.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserIdentity> {
        let result: Result<UserIdentity> = self.api.post_json("/auth/register", request, None).await;

        match result {
            // The backend reports duplicates as 400s; they are conflicts,
            // not input errors the user can fix by retyping.
            Err(ApiError::Validation(detail)) if detail.contains("already") => {
                Err(ApiError::Conflict(detail))
            }
            other => other,
        }
    }

    /// Log in with an email or username and store the credential.
    ///
    /// On success the credential is persisted and the identity fetched
    /// and cached. A failed login leaves no partial credential behind.
    pub async fn login(&self, login: &str, password: &str) -> Result<UserIdentity> {
        let _guard = self.login_guard.lock().await;

        let request = LoginRequest {
            login: login.to_string(),
            password: password.to_string(),
        };
        let credential: Credential = self.api.post_json("/auth/login", &request, None).await?;

        // Persist first, then publish: a crash between the two leaves a
        // valid token on disk for the next restore.
        self.store.save(&credential)?;
        {
            let mut state = self.state.write().await;
            state.credential = Some(credential.clone());
            state.user = None;
        }

        match self.fetch_me(&credential.access_token).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, username = %user.username, "Logged in");
                self.state.write().await.user = Some(user.clone());
                Ok(user)
            }
            Err(e) if e.is_authentication() => {
                // Freshly issued token rejected; nothing to keep.
                self.invalidate().await;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Register, then log in with the new email and the same password.
    ///
    /// If registration succeeds but the login does not, the failure is
    /// wrapped so callers can tell "account exists, prompt for manual
    /// login" apart from a registration failure.
    pub async fn register_then_login(&self, request: &RegisterRequest) -> Result<UserIdentity> {
        let user = self.register(request).await?;

        match self.login(&request.email, &request.password).await {
            Ok(user) => Ok(user),
            Err(e) => Err(ApiError::RegisteredNotLoggedIn {
                user,
                source: Box::new(e),
            }),
        }
    }

    /// Fetch the current user from the backend and refresh the cache.
    ///
    /// Fails with `Authentication` when no credential is held or the
    /// backend rejects it; rejection clears the credential (fail-closed).
    pub async fn current_user(&self) -> Result<UserIdentity> {
        let token = self.access_token().await?;

        match self.fetch_me(&token).await {
            Ok(user) => {
                self.state.write().await.user = Some(user.clone());
                Ok(user)
            }
            Err(e) if e.is_authentication() => {
                tracing::warn!("Credential rejected by backend, clearing session");
                self.invalidate().await;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// The identity cached at login/restore, without a network round trip.
    pub async fn cached_user(&self) -> Option<UserIdentity> {
        self.state.read().await.user.clone()
    }

    /// Clear the credential and cached identity. Idempotent, never fails.
    pub async fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to remove persisted credential");
        }
        let mut state = self.state.write().await;
        state.credential = None;
        state.user = None;
        tracing::info!("Logged out");
    }

    /// True iff a credential is currently held. Validity is only
    /// confirmed lazily on the next authenticated call.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.credential.is_some()
    }

    /// The bearer token for authenticated requests.
    pub async fn access_token(&self) -> Result<String> {
        self.state
            .read()
            .await
            .credential
            .as_ref()
            .map(|c| c.access_token.clone())
            .ok_or_else(|| ApiError::Authentication("no active session".to_string()))
    }

    /// Fail-closed clearing after a credential rejection.
    pub async fn invalidate(&self) {
        self.logout().await;
    }

    async fn fetch_me(&self, token: &str) -> Result<UserIdentity> {
        self.api.get_json("/auth/me", Some(token)).await
    }
}
