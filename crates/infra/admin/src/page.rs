//! Render model of the dashboard page.

use babydiary_admin_core::types::{AdminProfile, AnalyticsViewModel, AuthState};
use serde::Serialize;

use crate::stats::{Icon, MonthlyPoint, QuickAction, StatCard, SubscriptionSlice};

/// Message shown while the admin session is being validated.
pub const CHECKING_AUTH_MESSAGE: &str = "Verificando autenticação...";

/// Message shown when no admin session exists.
pub const REDIRECTING_MESSAGE: &str = "Não autenticado. Redirecionando...";

/// What the dashboard shows for the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardPage {
    /// Auth is still loading.
    CheckingAuth { message: &'static str },
    /// No authenticated admin.
    Redirecting {
        message: &'static str,
        debug: Option<DebugPanel>,
    },
    /// The full dashboard.
    Dashboard(Box<DashboardContent>),
}

/// Body of the authenticated dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardContent {
    pub debug: Option<DebugPanel>,
    pub header: PageHeader,
    pub stats_cards: Vec<StatCard>,
    pub monthly_growth: Section<MonthlyPoint>,
    pub subscription_distribution: Section<SubscriptionSlice>,
    pub quick_actions: Section<QuickAction>,
}

/// Title block with the refresh action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageHeader {
    pub title: &'static str,
    pub subtitle: String,
    pub logged_in_as: String,
    pub refresh_label: &'static str,
    pub refresh_icon: Icon,
}

impl PageHeader {
    pub(crate) fn new(product_name: &str, date: &str, admin: Option<&AdminProfile>) -> Self {
        let (name, email) = admin
            .map(|a| (a.name.as_str(), a.email.as_str()))
            .unwrap_or_default();
        Self {
            title: "Dashboard",
            subtitle: format!("Visão geral do {product_name} - {date}"),
            logged_in_as: format!("Logado como: {name} ({email})"),
            refresh_label: "Atualizar",
            refresh_icon: Icon::TrendingUp,
        }
    }
}

/// A titled card holding a series of items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<T> {
    pub title: &'static str,
    pub description: &'static str,
    pub items: Vec<T>,
}

/// Presence of a session storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageStatus {
    Present,
    Missing,
}

impl StorageStatus {
    pub fn from_presence(present: bool) -> Self {
        if present { Self::Present } else { Self::Missing }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Missing => "missing",
        }
    }
}

/// Diagnostic snapshot of the view state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugPanel {
    pub auth_loading: bool,
    pub is_authenticated: bool,
    pub admin: Option<String>,
    pub token: StorageStatus,
    pub data: StorageStatus,
    pub analytics_loading: bool,
    pub analytics: Option<AnalyticsViewModel>,
}

impl DebugPanel {
    pub(crate) fn new(
        auth: &AuthState,
        token: StorageStatus,
        data: StorageStatus,
        analytics_loading: bool,
        analytics: Option<&AnalyticsViewModel>,
    ) -> Self {
        Self {
            auth_loading: auth.is_loading,
            is_authenticated: auth.is_authenticated,
            admin: auth
                .admin
                .as_ref()
                .map(|a| format!("{} ({})", a.name, a.email)),
            token,
            data,
            analytics_loading,
            analytics: analytics.cloned(),
        }
    }

    /// The panel as display lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Auth Loading: {}", self.auth_loading),
            format!("Is Authenticated: {}", self.is_authenticated),
            format!("Admin: {}", self.admin.as_deref().unwrap_or("null")),
            format!("LocalStorage Token: {}", self.token.as_str()),
            format!("LocalStorage Data: {}", self.data.as_str()),
            format!("Analytics Loading: {}", self.analytics_loading),
            format!(
                "Analytics Data: {}",
                if self.analytics.is_some() { "present" } else { "null" }
            ),
        ];
        if let Some(analytics) = &self.analytics {
            lines.push(format!("Total Users: {}", analytics.total_users));
            lines.push(format!("Active Users: {}", analytics.active_users));
            lines.push(format!("New Users: {}", analytics.new_users));
            lines.push(format!("Total Revenue: {}", analytics.total_revenue));
        }
        lines
    }
}
