//! Diagnostic hook for the dashboard load sequence.
//!
//! Every intermediate step of a dashboard load (auth state seen, raw response,
//! mapped values, plan lookup, commit or discard) is reported as a
//! `DashboardEvent`. Observers are injected into the view, so tests can assert
//! on events directly and production code forwards them to `tracing`.

use std::sync::{Arc, Mutex};

use crate::types::AnalyticsViewModel;

/// A diagnostic event emitted by the dashboard view.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// The view received a (possibly unchanged) auth state.
    AuthObserved {
        is_authenticated: bool,
        is_loading: bool,
        has_admin: bool,
        token_present: bool,
        data_present: bool,
    },
    /// A load was requested while the auth state forbids fetching.
    LoadSkipped {
        is_authenticated: bool,
        is_loading: bool,
    },
    /// A load was issued with the given generation.
    LoadStarted { generation: u64 },
    /// The dashboard endpoint answered.
    DashboardReceived {
        generation: u64,
        success: bool,
        has_data: bool,
    },
    /// The summary was mapped into a view model.
    AnalyticsMapped {
        generation: u64,
        analytics: AnalyticsViewModel,
    },
    /// The plans endpoint answered and plan records were located.
    PlansMatched {
        generation: u64,
        plans: usize,
        basic: bool,
        premium: bool,
        family: bool,
    },
    /// The plans lookup failed; the primary result is unaffected.
    PlansFailed { generation: u64, error: String },
    /// The dashboard endpoint reported failure or sent no data.
    LoadRejected {
        generation: u64,
        message: Option<String>,
    },
    /// The dashboard call itself failed.
    LoadFailed { generation: u64, error: String },
    /// A newer load was issued before this one settled; its result was dropped.
    StaleDiscarded { generation: u64, latest: u64 },
    /// The mapped view model replaced the view state.
    AnalyticsCommitted { generation: u64 },
}

impl DashboardEvent {
    /// Short stable name of the event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthObserved { .. } => "auth_observed",
            Self::LoadSkipped { .. } => "load_skipped",
            Self::LoadStarted { .. } => "load_started",
            Self::DashboardReceived { .. } => "dashboard_received",
            Self::AnalyticsMapped { .. } => "analytics_mapped",
            Self::PlansMatched { .. } => "plans_matched",
            Self::PlansFailed { .. } => "plans_failed",
            Self::LoadRejected { .. } => "load_rejected",
            Self::LoadFailed { .. } => "load_failed",
            Self::StaleDiscarded { .. } => "stale_discarded",
            Self::AnalyticsCommitted { .. } => "analytics_committed",
        }
    }
}

/// Receives diagnostic events from the dashboard view.
pub trait DashboardObserver: Send + Sync {
    fn observe(&self, event: &DashboardEvent);
}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl DashboardObserver for TracingObserver {
    fn observe(&self, event: &DashboardEvent) {
        match event {
            DashboardEvent::AuthObserved {
                is_authenticated,
                is_loading,
                has_admin,
                token_present,
                data_present,
            } => {
                tracing::debug!(
                    is_authenticated,
                    auth_loading = is_loading,
                    has_admin,
                    token_present,
                    data_present,
                    "Auth state observed"
                );
            }
            DashboardEvent::LoadSkipped {
                is_authenticated,
                is_loading,
            } => {
                tracing::debug!(
                    is_authenticated,
                    auth_loading = is_loading,
                    "Dashboard load skipped"
                );
            }
            DashboardEvent::LoadStarted { generation } => {
                tracing::info!(generation, "Loading dashboard data");
            }
            DashboardEvent::DashboardReceived {
                generation,
                success,
                has_data,
            } => {
                tracing::debug!(generation, success, has_data, "Dashboard response received");
            }
            DashboardEvent::AnalyticsMapped {
                generation,
                analytics,
            } => {
                tracing::debug!(
                    generation,
                    total_users = analytics.total_users,
                    new_users = analytics.new_users,
                    total_revenue = analytics.total_revenue,
                    monthly_revenue = analytics.monthly_revenue,
                    "Dashboard data mapped"
                );
            }
            DashboardEvent::PlansMatched {
                generation,
                plans,
                basic,
                premium,
                family,
            } => {
                tracing::debug!(generation, plans, basic, premium, family, "Plans located");
            }
            DashboardEvent::PlansFailed { generation, error } => {
                tracing::error!(generation, error = %error, "Failed to load plans");
            }
            DashboardEvent::LoadRejected {
                generation,
                message,
            } => {
                tracing::warn!(
                    generation,
                    message = message.as_deref().unwrap_or(""),
                    "Dashboard response carried no data"
                );
            }
            DashboardEvent::LoadFailed { generation, error } => {
                tracing::error!(generation, error = %error, "Failed to load dashboard data");
            }
            DashboardEvent::StaleDiscarded { generation, latest } => {
                tracing::debug!(generation, latest, "Discarding stale dashboard response");
            }
            DashboardEvent::AnalyticsCommitted { generation } => {
                tracing::info!(generation, "Dashboard data updated");
            }
        }
    }
}

/// Observer that records every event, for tests and the debug panel.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<DashboardEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded events.
    pub fn events(&self) -> Vec<DashboardEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Returns the kinds of the recorded events, in order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(DashboardEvent::kind)
            .collect()
    }

    /// Counts recorded events of the given kind.
    pub fn count(&self, kind: &str) -> usize {
        self.kinds().into_iter().filter(|k| *k == kind).count()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl DashboardObserver for RecordingObserver {
    fn observe(&self, event: &DashboardEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

/// Fans events out to several observers.
#[derive(Default)]
pub struct ObserverChain {
    observers: Vec<Arc<dyn DashboardObserver>>,
}

impl ObserverChain {
    /// Creates a new empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observer to the chain.
    pub fn with(mut self, observer: Arc<dyn DashboardObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Returns the number of observers in the chain.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Checks if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl DashboardObserver for ObserverChain {
    fn observe(&self, event: &DashboardEvent) {
        for observer in &self.observers {
            observer.observe(event);
        }
    }
}
