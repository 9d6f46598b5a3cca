// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Low-level dashboard API client.
//!
//! Handles:
//! - Request plumbing with a bounded timeout on every call
//! - Explicit opt-in bearer authentication per request
//! - Error-body `detail` extraction and status classification

use crate::error::{classify_status, extract_detail, ApiError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client for the dashboard backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the given base URL (including the API prefix).
    ///
    /// The timeout bounds every request; no call blocks indefinitely.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON resource.
    pub async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T> {
        let mut request = self.http.get(self.url(path));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        self.check_response_json(response).await
    }

    /// POST a JSON body and parse a JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B, bearer: Option<&str>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: for<'de> Deserialize<'de>,
    {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        self.check_response_json(response).await
    }

    /// DELETE a resource and parse a JSON response.
    pub async fn delete_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T> {
        let mut request = self.http.delete(self.url(path));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(transport_error)?;
        self.check_response_json(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Classify non-success responses and parse success bodies.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_detail(status, &body);
            return Err(classify_status(status, detail));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("invalid response body: {}", e)))
    }
}

/// Map transport failures. Timeouts and connection errors are retryable
/// upstream conditions, never terminal authentication failures.
fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Upstream(format!("request timed out: {}", e))
    } else {
        ApiError::Upstream(format!("request failed: {}", e))
    }
}
