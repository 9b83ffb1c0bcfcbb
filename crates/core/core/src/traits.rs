//! Core traits for the admin console.
//!
//! This module defines the seams between the dashboard and its external
//! collaborators: the admin HTTP API and the persisted session storage.

use async_trait::async_trait;

use crate::error::AdminResult;
use crate::types::{ApiResponse, DashboardSummary, Plan};

/// Session storage key holding the admin bearer token.
pub const ADMIN_TOKEN_KEY: &str = "admin_token";

/// Session storage key holding the serialized admin profile.
pub const ADMIN_DATA_KEY: &str = "admin_data";

/// Client for the Baby Diary admin API.
///
/// Adapters implement this trait to provide transport (HTTP, in-memory
/// fixtures, ...). An `Err` means the call itself failed; an envelope with
/// `success == false` is still an `Ok`.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Fetches the aggregate dashboard summary.
    async fn get_dashboard(&self) -> AdminResult<ApiResponse<DashboardSummary>>;

    /// Lists the subscription plans.
    async fn get_plans(&self) -> AdminResult<ApiResponse<Vec<Plan>>>;
}

/// Read-only view over persisted session storage.
pub trait SessionStore: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns true if a non-empty value is stored for `key`.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_empty())
    }
}
