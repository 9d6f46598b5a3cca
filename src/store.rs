// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Persistent credential slot.
//!
//! The bearer token lives in a single named file so the session survives
//! process restarts. All storage access is centralized here; `SessionStore`
//! acquires the slot on login and releases it on logout or fail-closed
//! invalidation.

use crate::error::{ApiError, Result};
use crate::models::user::Credential;
use std::path::{Path, PathBuf};

/// File-backed store for the session credential.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted credential, if any. A missing file means no
    /// session, not an error.
    pub fn load(&self) -> Result<Option<Credential>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ApiError::Store(format!("read {}: {}", self.path.display(), e))),
        };

        let credential = serde_json::from_str(&data).map_err(|e| {
            ApiError::Store(format!("corrupt token file {}: {}", self.path.display(), e))
        })?;
        Ok(Some(credential))
    }

    /// Persist a credential, replacing any previous one.
    pub fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ApiError::Store(format!("create {}: {}", parent.display(), e))
                })?;
            }
        }

        let data = serde_json::to_string(credential)
            .map_err(|e| ApiError::Store(format!("serialize credential: {}", e)))?;
        std::fs::write(&self.path, data)
            .map_err(|e| ApiError::Store(format!("write {}: {}", self.path.display(), e)))?;
        Ok(())
    }

    /// Remove the persisted credential. Idempotent; a missing file is
    /// already the desired state.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Store(format!(
                "remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
