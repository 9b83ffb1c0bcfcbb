//! # Baby Diary Admin Console
//!
//! Terminal front-end for the admin dashboard: reads the stored admin session
//! from configuration, drives the dashboard view against the admin API and
//! renders the page as text.

mod config;
mod render;

pub use config::{
    load_config, parse_config, ApiConfig, ConfigError, ConsoleConfig, DashboardSection,
    SessionConfig, ADMIN_DATA_ENV, TOKEN_ENV,
};
pub use render::render_page;

use babydiary_admin_core::error::AdminResult;
use babydiary_admin_core::observer::{DashboardObserver, ObserverChain, TracingObserver};
use babydiary_admin_core::traits::{AdminApi, SessionStore, ADMIN_DATA_KEY, ADMIN_TOKEN_KEY};
use babydiary_admin_core::types::{AdminProfile, AuthState};
use babydiary_admin_dashboard::{DashboardConfig, DashboardView, LoadOutcome};
use babydiary_admin_http::{HttpAdminApi, HttpApiConfig};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

/// Session storage backed by the configured session values.
#[derive(Debug, Clone, Default)]
pub struct ConfigSessionStore {
    session: SessionConfig,
}

impl ConfigSessionStore {
    pub fn new(session: SessionConfig) -> Self {
        Self { session }
    }
}

impl SessionStore for ConfigSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            ADMIN_TOKEN_KEY => self.session.admin_token.clone(),
            ADMIN_DATA_KEY => self.session.admin_data.clone(),
            _ => None,
        }
    }
}

/// Derives the auth state from stored session values.
///
/// Authenticated only when a token is stored and the admin data parses.
pub fn resolve_auth(session: &dyn SessionStore) -> AuthState {
    if !session.contains(ADMIN_TOKEN_KEY) {
        return AuthState::unauthenticated();
    }

    let Some(raw) = session.get(ADMIN_DATA_KEY) else {
        return AuthState::unauthenticated();
    };

    match serde_json::from_str::<AdminProfile>(&raw) {
        Ok(admin) => AuthState::authenticated(admin),
        Err(e) => {
            tracing::warn!(error = %e, "Stored admin data is invalid");
            AuthState::unauthenticated()
        }
    }
}

/// The console application.
pub struct ConsoleApp {
    config: ConsoleConfig,
    session: Arc<ConfigSessionStore>,
    view: DashboardView,
}

impl ConsoleApp {
    /// Creates the app with an HTTP client built from the configuration.
    pub fn new(config: ConsoleConfig) -> AdminResult<Self> {
        let session = ConfigSessionStore::new(config.session.clone());

        let mut api_config =
            HttpApiConfig::new(config.api.base_url.clone()).token_from_session(&session);
        if let Some(secs) = config.api.timeout_secs {
            api_config = api_config.timeout(Duration::from_secs(secs));
        }
        let api = HttpAdminApi::new(api_config)?;

        Ok(Self::with_api(config, Arc::new(api)))
    }

    /// Creates the app over an arbitrary admin API.
    pub fn with_api(config: ConsoleConfig, api: Arc<dyn AdminApi>) -> Self {
        let session = Arc::new(ConfigSessionStore::new(config.session.clone()));

        let mut dashboard_config =
            DashboardConfig::new().product_name(config.dashboard.product_name.clone());
        if !config.dashboard.show_debug_panel {
            dashboard_config = dashboard_config.hide_debug_panel();
        }

        let view = DashboardView::new(api, session.clone(), AuthState::loading())
            .with_config(dashboard_config);

        Self {
            config,
            session,
            view,
        }
    }

    /// Sends dashboard events to `observer` as well as to `tracing`.
    /// Replaces any observer set earlier.
    pub fn with_observer(mut self, observer: Arc<dyn DashboardObserver>) -> Self {
        let chain = ObserverChain::new()
            .with(Arc::new(TracingObserver::new()))
            .with(observer);
        self.view = self.view.with_observer(Arc::new(chain));
        self
    }

    /// Gets the configuration.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Gets the dashboard view.
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Resolves the stored session and hands it to the view.
    ///
    /// Returns the outcome of the load this triggered, if any.
    pub async fn start(&self) -> Option<LoadOutcome> {
        let auth = resolve_auth(self.session.as_ref());
        tracing::info!(authenticated = auth.is_authenticated, "Admin session resolved");
        self.view.set_auth(auth).await
    }

    /// Re-runs the dashboard load.
    pub async fn refresh(&self) -> LoadOutcome {
        self.view.refresh().await
    }

    /// Renders the current page.
    pub fn render(&self, today: NaiveDate) -> String {
        render_page(&self.view.page(today))
    }

    /// Resolves the session, loads once and renders.
    pub async fn run_once(&self, today: NaiveDate) -> String {
        self.start().await;
        self.render(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use babydiary_admin_core::observer::RecordingObserver;
    use babydiary_admin_core::types::{ApiResponse, DashboardSummary, UsersSummary};
    use babydiary_admin_memory::{MemoryAdminApi, MemorySessionStore};

    const ADMIN_JSON: &str = r#"{"name":"Ana","email":"ana@example.com"}"#;

    fn signed_in() -> ConsoleConfig {
        let mut config = ConsoleConfig::default();
        config.session.admin_token = Some("tok".to_string());
        config.session.admin_data = Some(ADMIN_JSON.to_string());
        config
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_resolve_auth() {
        let store = MemorySessionStore::new()
            .with(ADMIN_TOKEN_KEY, "tok")
            .with(ADMIN_DATA_KEY, ADMIN_JSON);
        assert_eq!(
            resolve_auth(&store),
            AuthState::authenticated(AdminProfile::new("Ana", "ana@example.com"))
        );

        let no_token = MemorySessionStore::new().with(ADMIN_DATA_KEY, ADMIN_JSON);
        assert_eq!(resolve_auth(&no_token), AuthState::unauthenticated());

        let bad_data = MemorySessionStore::new()
            .with(ADMIN_TOKEN_KEY, "tok")
            .with(ADMIN_DATA_KEY, "not json");
        assert_eq!(resolve_auth(&bad_data), AuthState::unauthenticated());
    }

    #[test]
    fn test_config_session_store() {
        let store = ConfigSessionStore::new(signed_in().session);
        assert_eq!(store.get(ADMIN_TOKEN_KEY).as_deref(), Some("tok"));
        assert!(store.contains(ADMIN_DATA_KEY));
        assert!(store.get("other").is_none());
    }

    #[test]
    fn test_new_builds_http_client() {
        let app = ConsoleApp::new(signed_in()).unwrap();
        assert_eq!(app.config().api.base_url, "http://localhost:3000/api");
    }

    #[tokio::test]
    async fn test_run_once_signed_in() {
        let api = MemoryAdminApi::new();
        api.set_dashboard(ApiResponse::ok(DashboardSummary {
            users: Some(UsersSummary {
                total: Some(42.0),
                new_this_month: Some(5.0),
            }),
            revenue: None,
        }))
        .await;

        let app = ConsoleApp::with_api(signed_in(), Arc::new(api.clone()));
        let output = app.run_once(today()).await;

        assert_eq!(api.dashboard_calls(), 1);
        assert!(output.contains("== Debug Info =="));
        assert!(output.contains("Visão geral do Baby Diary - 16/10/2026"));
        assert!(output.contains("Total de Usuários: 42 (+12% desde o mês passado)"));
        assert!(output.contains("Receita Total: R$ 0,00 (+23% desde o mês passado)"));
        assert!(output.contains("  - Gamificação"));

        assert_eq!(app.refresh().await, LoadOutcome::Committed);
        assert_eq!(api.dashboard_calls(), 2);
    }

    #[tokio::test]
    async fn test_events_reach_extra_observer() {
        let api = MemoryAdminApi::new();
        let events = Arc::new(RecordingObserver::new());
        let app = ConsoleApp::with_api(signed_in(), Arc::new(api.clone()))
            .with_observer(events.clone());

        assert_eq!(app.start().await, Some(LoadOutcome::Committed));
        assert_eq!(
            events.kinds(),
            vec![
                "auth_observed",
                "load_started",
                "dashboard_received",
                "analytics_mapped",
                "plans_matched",
                "analytics_committed",
            ]
        );
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let mut config = signed_in();
        config.api.base_url = "localhost:3000".to_string();
        assert!(ConsoleApp::new(config).is_err());
    }

    #[tokio::test]
    async fn test_run_once_signed_out() {
        let api = MemoryAdminApi::new();
        let mut config = ConsoleConfig::default();
        config.dashboard.show_debug_panel = false;

        let app = ConsoleApp::with_api(config, Arc::new(api.clone()));
        let output = app.run_once(today()).await;

        assert_eq!(output, "Não autenticado. Redirecionando...");
        assert_eq!(api.dashboard_calls(), 0);
    }
}
