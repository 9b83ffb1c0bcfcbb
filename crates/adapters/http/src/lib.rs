//! # Baby Diary Admin HTTP Adapter
//!
//! `reqwest`-backed implementation of [`AdminApi`] talking to the Baby Diary
//! admin REST API:
//!
//! - `GET {base_url}/admin/dashboard` → `ApiResponse<DashboardSummary>`
//! - `GET {base_url}/admin/plans` → `ApiResponse<Vec<Plan>>`
//!
//! Requests carry the admin token as a bearer credential.

use std::time::Duration;

use async_trait::async_trait;
use babydiary_admin_core::error::{AdminError, AdminResult};
use babydiary_admin_core::traits::{AdminApi, SessionStore, ADMIN_TOKEN_KEY};
use babydiary_admin_core::types::{ApiResponse, DashboardSummary, Plan};
use reqwest::Client;
use serde::de::DeserializeOwned;

const DASHBOARD_PATH: &str = "/admin/dashboard";
const PLANS_PATH: &str = "/admin/plans";

/// Connection settings for [`HttpAdminApi`].
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    /// API root, e.g. `http://localhost:3000/api`.
    pub base_url: String,
    /// Admin bearer token.
    pub token: Option<String>,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl HttpApiConfig {
    /// Creates a config for the given API root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            timeout: None,
        }
    }

    /// Sets the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Reads the bearer token from session storage, if present.
    pub fn token_from_session(mut self, session: &dyn SessionStore) -> Self {
        if let Some(token) = session.get(ADMIN_TOKEN_KEY).filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Admin API client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    config: HttpApiConfig,
    http_client: Client,
}

impl HttpAdminApi {
    /// Creates a client from its configuration.
    pub fn new(config: HttpApiConfig) -> AdminResult<Self> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(AdminError::config(format!(
                "base_url must be an http(s) URL, got {:?}",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| AdminError::config(e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HttpApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AdminResult<ApiResponse<T>> {
        let token = self.config.token.as_deref().ok_or(AdminError::MissingToken)?;
        let url = self.url(path);

        tracing::debug!(url = %url, "Requesting admin API");
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(from_reqwest)?;
        decode_envelope(status, &body)
    }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn get_dashboard(&self) -> AdminResult<ApiResponse<DashboardSummary>> {
        self.get_json(DASHBOARD_PATH).await
    }

    async fn get_plans(&self) -> AdminResult<ApiResponse<Vec<Plan>>> {
        self.get_json(PLANS_PATH).await
    }
}

/// Decodes an admin API body received with the given status code.
///
/// Non-2xx statuses become [`AdminError::Status`], using the envelope's
/// `message` when the body is one.
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> AdminResult<ApiResponse<T>> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| truncate(body, 200));
        return Err(AdminError::status(status, message));
    }

    Ok(serde_json::from_str(body)?)
}

fn from_reqwest(err: reqwest::Error) -> AdminError {
    if err.is_timeout() {
        AdminError::Timeout
    } else if err.is_decode() {
        AdminError::decode(err.to_string())
    } else {
        AdminError::http(err.to_string())
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    body.chars().take(max_chars).collect()
}
