//! Core data types for the admin console.
//!
//! Wire types mirror the JSON envelopes returned by the Baby Diary admin API
//! (camelCase on the wire). The `AnalyticsViewModel` is the shaped projection
//! held by the dashboard view.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Response envelope used by every admin API endpoint.
///
/// `data` is optional even when `success` is true; callers must handle both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the server considers the call successful.
    #[serde(default)]
    pub success: bool,

    /// Payload, when the server sent one. A missing key reads as `None`
    /// without requiring `T: Default`.
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Optional human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Creates a successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Creates a failed envelope with no payload.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Returns the payload only when the envelope reports success.
    pub fn into_success(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

/// Aggregate figures returned by `GET /admin/dashboard`.
///
/// Every field may be absent; consumers apply zero fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<UsersSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<RevenueSummary>,
}

/// User counters inside a dashboard summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_this_month: Option<f64>,
}

/// Revenue figures inside a dashboard summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<f64>,
}

/// A subscription plan as listed by `GET /admin/plans`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Display name of the plan, e.g. "Plano Básico".
    pub name: String,

    /// Remaining plan attributes (price, features, ...), kept opaque.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl Plan {
    /// Creates a plan with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: HashMap::new(),
        }
    }
}

/// Identity of the logged-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub name: String,
    pub email: String,
}

impl AdminProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Authentication state supplied by whoever validates the admin session.
///
/// The dashboard only reads this value and reacts to its transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    /// The logged-in admin, if known.
    pub admin: Option<AdminProfile>,
    /// Whether the session has been validated.
    pub is_authenticated: bool,
    /// Whether validation is still in progress.
    pub is_loading: bool,
}

impl AuthState {
    /// State while the session is still being validated.
    pub fn loading() -> Self {
        Self {
            admin: None,
            is_authenticated: false,
            is_loading: true,
        }
    }

    /// State after validation failed or no session exists.
    pub fn unauthenticated() -> Self {
        Self {
            admin: None,
            is_authenticated: false,
            is_loading: false,
        }
    }

    /// State after a successful validation.
    pub fn authenticated(admin: AdminProfile) -> Self {
        Self {
            admin: Some(admin),
            is_authenticated: true,
            is_loading: false,
        }
    }

    /// Returns true when dashboard data may be fetched.
    pub fn can_load(&self) -> bool {
        self.is_authenticated && !self.is_loading
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::loading()
    }
}

/// Subscriber counts per plan family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionStats {
    pub basic: u64,
    pub premium: u64,
    pub family: u64,
}

impl SubscriptionStats {
    /// Sum of all plan counts.
    pub fn total(&self) -> u64 {
        self.basic + self.premium + self.family
    }
}

/// Engagement counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementStats {
    pub daily_active: u64,
    pub weekly_active: u64,
    pub monthly_active: u64,
}

/// UI-ready projection of the dashboard summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsViewModel {
    pub total_users: u64,
    /// Mirrors `total_users`; the API exposes no separate activity signal.
    pub active_users: u64,
    pub new_users: u64,
    pub total_revenue: f64,
    pub monthly_revenue: f64,
    pub subscription_stats: SubscriptionStats,
    pub engagement_stats: EngagementStats,
}
