// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Service layer: HTTP plumbing, session lifecycle, account linking.

pub mod api;
pub mod instagram;
pub mod session;

pub use api::ApiClient;
pub use instagram::AccountLinker;
pub use session::SessionStore;
