//! # Baby Diary Admin Memory Adapter
//!
//! An in-memory admin API and session store, primarily intended for testing
//! and development purposes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use babydiary_admin_memory::{MemoryAdminApi, MemorySessionStore};
//!
//! let api = MemoryAdminApi::new();
//! api.set_dashboard(ApiResponse::ok(summary)).await;
//! let view = DashboardView::new(Arc::new(api), Arc::new(MemorySessionStore::new()), auth);
//! ```

use async_trait::async_trait;
use babydiary_admin_core::error::{AdminError, AdminResult};
use babydiary_admin_core::traits::{AdminApi, SessionStore};
use babydiary_admin_core::types::{ApiResponse, DashboardSummary, Plan};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// A canned reply for one endpoint.
#[derive(Debug, Clone)]
pub enum MemoryReply<T> {
    /// Answer with this envelope.
    Respond(ApiResponse<T>),
    /// Fail the call with a transport error carrying this message.
    Fail(String),
}

impl<T: Clone> MemoryReply<T> {
    fn to_result(&self) -> AdminResult<ApiResponse<T>> {
        match self {
            Self::Respond(response) => Ok(response.clone()),
            Self::Fail(message) => Err(AdminError::http(message.clone())),
        }
    }
}

/// In-memory admin API.
///
/// Every call returns the currently configured reply and bumps a call
/// counter. Clones share replies and counters.
#[derive(Debug, Clone)]
pub struct MemoryAdminApi {
    dashboard: Arc<RwLock<MemoryReply<DashboardSummary>>>,
    plans: Arc<RwLock<MemoryReply<Vec<Plan>>>>,
    dashboard_calls: Arc<AtomicUsize>,
    plans_calls: Arc<AtomicUsize>,
    latency: Option<Duration>,
}

impl MemoryAdminApi {
    /// Creates an API answering with an empty successful dashboard and no plans.
    pub fn new() -> Self {
        Self {
            dashboard: Arc::new(RwLock::new(MemoryReply::Respond(ApiResponse::ok(
                DashboardSummary::default(),
            )))),
            plans: Arc::new(RwLock::new(MemoryReply::Respond(ApiResponse::ok(Vec::new())))),
            dashboard_calls: Arc::new(AtomicUsize::new(0)),
            plans_calls: Arc::new(AtomicUsize::new(0)),
            latency: None,
        }
    }

    /// Delays every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Sets the envelope returned by `get_dashboard`.
    pub async fn set_dashboard(&self, response: ApiResponse<DashboardSummary>) {
        *self.dashboard.write().await = MemoryReply::Respond(response);
    }

    /// Makes `get_dashboard` fail.
    pub async fn fail_dashboard(&self, message: impl Into<String>) {
        *self.dashboard.write().await = MemoryReply::Fail(message.into());
    }

    /// Sets the envelope returned by `get_plans`.
    pub async fn set_plans(&self, response: ApiResponse<Vec<Plan>>) {
        *self.plans.write().await = MemoryReply::Respond(response);
    }

    /// Makes `get_plans` fail.
    pub async fn fail_plans(&self, message: impl Into<String>) {
        *self.plans.write().await = MemoryReply::Fail(message.into());
    }

    /// Returns the number of `get_dashboard` calls so far.
    pub fn dashboard_calls(&self) -> usize {
        self.dashboard_calls.load(Ordering::SeqCst)
    }

    /// Returns the number of `get_plans` calls so far.
    pub fn plans_calls(&self) -> usize {
        self.plans_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for MemoryAdminApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdminApi for MemoryAdminApi {
    async fn get_dashboard(&self) -> AdminResult<ApiResponse<DashboardSummary>> {
        self.dashboard_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.dashboard.read().await.to_result()
    }

    async fn get_plans(&self) -> AdminResult<ApiResponse<Vec<Plan>>> {
        self.plans_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.plans.read().await.to_result()
    }
}

/// In-memory session storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: Arc<std::sync::RwLock<HashMap<String, String>>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, builder style.
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Stores a value.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), value.into());
    }

    /// Removes a value.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(key)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}
