// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the dashboard API.

pub mod instagram;
pub mod user;

pub use instagram::{
    AuthorizationUrl, CallbackParams, Disconnected, LinkedAccount, MediaItem, SyncOutcome,
};
pub use user::{Credential, UserIdentity};
