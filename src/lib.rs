// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Gramdash: client core for an Instagram analytics dashboard.
//!
//! This crate provides the session and account-linking layer the
//! dashboard UI sits on: authentication against the backend, the OAuth
//! flow for connecting Instagram accounts, and the cached-metric
//! operations (list, sync, media, disconnect) on linked accounts.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

use config::Config;
use services::{AccountLinker, ApiClient, SessionStore};
use std::sync::Arc;
use std::time::Duration;
use store::TokenStore;

/// The assembled client: a session plus a linker sharing it.
pub struct Dashboard {
    pub session: Arc<SessionStore>,
    pub linker: AccountLinker,
}

impl Dashboard {
    /// Wire up the services from configuration.
    pub fn from_config(config: &Config) -> error::Result<Self> {
        let api = ApiClient::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        let store = TokenStore::new(&config.token_path);
        let session = Arc::new(SessionStore::new(api.clone(), store));
        let linker = AccountLinker::new(api, session.clone());

        Ok(Self { session, linker })
    }
}
