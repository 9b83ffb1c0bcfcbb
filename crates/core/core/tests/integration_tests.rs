//! Integration tests for Baby Diary Admin Core
//!
//! This test suite covers:
//! - Trait object usage of the API and session seams
//! - Observer fan-out
//! - Error messages
//! - Auth state transitions

use async_trait::async_trait;
use babydiary_admin_core::{
    AdminApi, AdminError, AdminProfile, AdminResult, ApiResponse, AuthState, DashboardEvent,
    DashboardObserver, DashboardSummary, ObserverChain, Plan, RecordingObserver, SessionStore,
    ADMIN_DATA_KEY, ADMIN_TOKEN_KEY,
};
use std::collections::HashMap;
use std::sync::Arc;

struct FixedApi;

#[async_trait]
impl AdminApi for FixedApi {
    async fn get_dashboard(&self) -> AdminResult<ApiResponse<DashboardSummary>> {
        Ok(ApiResponse::ok(DashboardSummary::default()))
    }

    async fn get_plans(&self) -> AdminResult<ApiResponse<Vec<Plan>>> {
        Err(AdminError::status(500, "boom"))
    }
}

struct MapStore(HashMap<String, String>);

impl SessionStore for MapStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

mod trait_tests {
    use super::*;

    #[tokio::test]
    async fn test_api_as_trait_object() {
        let api: Arc<dyn AdminApi> = Arc::new(FixedApi);

        let dashboard = api.get_dashboard().await.unwrap();
        assert!(dashboard.success);

        let err = api.get_plans().await.unwrap_err();
        assert!(matches!(err, AdminError::Status { status: 500, .. }));
    }

    #[test]
    fn test_session_contains_ignores_empty_values() {
        let store = MapStore(HashMap::from([
            (ADMIN_TOKEN_KEY.to_string(), String::new()),
            (ADMIN_DATA_KEY.to_string(), "{}".to_string()),
        ]));

        assert!(!store.contains(ADMIN_TOKEN_KEY));
        assert!(store.contains(ADMIN_DATA_KEY));
        assert!(!store.contains("missing"));
    }
}

mod observer_tests {
    use super::*;

    #[test]
    fn test_chain_fans_out_in_order() {
        let first = Arc::new(RecordingObserver::new());
        let second = Arc::new(RecordingObserver::new());
        let chain = ObserverChain::new()
            .with(first.clone())
            .with(second.clone());
        assert_eq!(chain.len(), 2);

        chain.observe(&DashboardEvent::LoadStarted { generation: 1 });
        chain.observe(&DashboardEvent::AnalyticsCommitted { generation: 1 });

        assert_eq!(first.kinds(), vec!["load_started", "analytics_committed"]);
        assert_eq!(first.events(), second.events());
    }

    #[test]
    fn test_empty_chain_is_noop() {
        let chain = ObserverChain::new();
        assert!(chain.is_empty());
        chain.observe(&DashboardEvent::LoadStarted { generation: 1 });
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(AdminError::Timeout.to_string(), "Request timeout");
        assert_eq!(AdminError::http("reset").to_string(), "HTTP error: reset");
        assert_eq!(
            AdminError::config("base_url is empty").to_string(),
            "Configuration error: base_url is empty"
        );
    }

    #[test]
    fn test_json_error_converts_to_decode() {
        let err: AdminError = serde_json::from_str::<DashboardSummary>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AdminError::Decode { .. }));
    }
}

mod auth_tests {
    use super::*;

    #[test]
    fn test_only_settled_authenticated_state_can_load() {
        assert!(!AuthState::default().can_load());
        assert!(!AuthState::unauthenticated().can_load());
        assert!(AuthState::authenticated(AdminProfile::new("Ana", "ana@example.com")).can_load());

        let mut racing = AuthState::authenticated(AdminProfile::new("Ana", "ana@example.com"));
        racing.is_loading = true;
        assert!(!racing.can_load());
    }
}
