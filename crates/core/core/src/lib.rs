//! # Baby Diary Admin Core
//!
//! This crate provides the foundational types and traits for the Baby Diary
//! admin console. It defines the admin API wire types, the dashboard view
//! model, error types, and the trait interfaces that API adapters and session
//! stores must implement.

pub mod error;
pub mod observer;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{AdminError, AdminResult};
pub use observer::{
    DashboardEvent, DashboardObserver, ObserverChain, RecordingObserver, TracingObserver,
};
pub use traits::{AdminApi, SessionStore, ADMIN_DATA_KEY, ADMIN_TOKEN_KEY};
pub use types::{
    AdminProfile, AnalyticsViewModel, ApiResponse, AuthState, DashboardSummary,
    EngagementStats, Plan, RevenueSummary, SubscriptionStats, UsersSummary,
};
