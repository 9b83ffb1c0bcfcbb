//! The dashboard view controller.
//!
//! `DashboardView` owns the view state (`analytics`, `is_loading`), reacts to
//! auth state transitions, runs the dashboard load sequence and assembles the
//! page render model.
//!
//! Loads may overlap (manual refreshes are not debounced). Each load takes a
//! generation from a monotonically increasing counter and only the latest
//! issued generation may touch the view state; older results are dropped.

use std::sync::{Arc, RwLock};

use babydiary_admin_core::observer::{DashboardEvent, DashboardObserver, TracingObserver};
use babydiary_admin_core::traits::{AdminApi, SessionStore, ADMIN_DATA_KEY, ADMIN_TOKEN_KEY};
use babydiary_admin_core::types::{AnalyticsViewModel, AuthState};
use chrono::NaiveDate;

use crate::format::format_date;
use crate::mapping::{apply_plan_matches, locate_plans, map_dashboard};
use crate::page::{
    DashboardContent, DashboardPage, DebugPanel, PageHeader, Section, StorageStatus,
    CHECKING_AUTH_MESSAGE, REDIRECTING_MESSAGE,
};
use crate::stats::{monthly_data, quick_actions, stats_cards, subscription_data};
use crate::DashboardConfig;

/// Lifecycle phase of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPhase {
    /// The auth state is still loading; nothing is fetched.
    AwaitingAuth,
    /// No authenticated admin; nothing is fetched.
    Unauthenticated,
    /// A dashboard load is in flight.
    LoadingAnalytics,
    /// The latest load has settled.
    Ready,
}

/// How a call to [`DashboardView::load_dashboard_data`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The auth state does not allow fetching; no call was made.
    Skipped,
    /// The mapped analytics replaced the view state.
    Committed,
    /// The API reported failure or sent no data; analytics were kept.
    Rejected,
    /// The dashboard call failed; analytics were kept.
    Failed,
    /// A newer load was issued meanwhile; this result was dropped.
    Stale,
}

/// Snapshot of the view state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub analytics: Option<AnalyticsViewModel>,
    pub is_loading: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            analytics: None,
            is_loading: true,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    view: ViewState,
    latest_generation: u64,
}

/// The injected auth state and whether its ready edge has been handled.
#[derive(Debug)]
struct AuthSlot {
    state: AuthState,
    ready_seen: bool,
}

/// Dashboard controller.
pub struct DashboardView {
    api: Arc<dyn AdminApi>,
    session: Arc<dyn SessionStore>,
    observer: Arc<dyn DashboardObserver>,
    config: DashboardConfig,
    auth: RwLock<AuthSlot>,
    inner: RwLock<Inner>,
}

impl DashboardView {
    /// Creates a view over the given API, session storage and initial auth state.
    ///
    /// Nothing is fetched until [`mount`](Self::mount) or
    /// [`set_auth`](Self::set_auth) sees a state that allows loading.
    pub fn new(api: Arc<dyn AdminApi>, session: Arc<dyn SessionStore>, auth: AuthState) -> Self {
        Self {
            api,
            session,
            observer: Arc::new(TracingObserver::new()),
            config: DashboardConfig::default(),
            auth: RwLock::new(AuthSlot {
                state: auth,
                ready_seen: false,
            }),
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Replaces the diagnostic observer.
    pub fn with_observer(mut self, observer: Arc<dyn DashboardObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Gets the configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Returns the current auth state.
    pub fn auth(&self) -> AuthState {
        self.auth
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .state
            .clone()
    }

    /// Returns a snapshot of the view state.
    pub fn state(&self) -> ViewState {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .view
            .clone()
    }

    /// Returns the committed analytics, if any.
    pub fn analytics(&self) -> Option<AnalyticsViewModel> {
        self.state().analytics
    }

    /// Returns true while the latest load has not settled.
    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> DashboardPhase {
        let auth = self.auth();
        if auth.is_loading {
            DashboardPhase::AwaitingAuth
        } else if !auth.is_authenticated {
            DashboardPhase::Unauthenticated
        } else if self.is_loading() {
            DashboardPhase::LoadingAnalytics
        } else {
            DashboardPhase::Ready
        }
    }

    /// Checks the initial auth state once.
    ///
    /// Loads when the view was created with a state that already allows
    /// fetching. Same contract as [`set_auth`](Self::set_auth).
    pub async fn mount(&self) -> Option<LoadOutcome> {
        self.set_auth(self.auth()).await
    }

    /// Replaces the auth state.
    ///
    /// When fetching becomes possible (authenticated and not loading, where
    /// the last handled state was not), one dashboard load runs and its
    /// outcome is returned. Otherwise no load runs and `None` is returned.
    pub async fn set_auth(&self, auth: AuthState) -> Option<LoadOutcome> {
        self.observe_auth(&auth);

        let can_load = auth.can_load();
        let ready_seen = {
            let mut slot = self
                .auth
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            slot.state = auth;
            std::mem::replace(&mut slot.ready_seen, can_load)
        };

        if can_load && !ready_seen {
            Some(self.load_dashboard_data().await)
        } else {
            None
        }
    }

    /// Re-runs the load sequence on demand.
    ///
    /// No debouncing: overlapping refreshes each issue a request and only the
    /// last issued one may commit.
    pub async fn refresh(&self) -> LoadOutcome {
        self.load_dashboard_data().await
    }

    /// Fetches the dashboard summary and commits the mapped analytics.
    ///
    /// Failures never propagate: they are reported to the observer and the
    /// previous analytics stay in place.
    pub async fn load_dashboard_data(&self) -> LoadOutcome {
        let auth = self.auth();
        if !auth.can_load() {
            self.observer.observe(&DashboardEvent::LoadSkipped {
                is_authenticated: auth.is_authenticated,
                is_loading: auth.is_loading,
            });
            return LoadOutcome::Skipped;
        }

        let generation = self.begin_load();
        self.observer.observe(&DashboardEvent::LoadStarted { generation });

        let response = match self.api.get_dashboard().await {
            Ok(response) => response,
            Err(err) => {
                self.observer.observe(&DashboardEvent::LoadFailed {
                    generation,
                    error: err.to_string(),
                });
                return self.settle(generation, None, LoadOutcome::Failed);
            }
        };

        self.observer.observe(&DashboardEvent::DashboardReceived {
            generation,
            success: response.success,
            has_data: response.data.is_some(),
        });

        let message = response.message.clone();
        let Some(summary) = response.into_success() else {
            self.observer
                .observe(&DashboardEvent::LoadRejected { generation, message });
            return self.settle(generation, None, LoadOutcome::Rejected);
        };

        let mut analytics = map_dashboard(&summary);
        self.observer.observe(&DashboardEvent::AnalyticsMapped {
            generation,
            analytics: analytics.clone(),
        });

        self.load_plan_stats(generation, &mut analytics).await;

        self.settle(generation, Some(analytics), LoadOutcome::Committed)
    }

    /// Looks up subscription plans. Failures here never affect the load.
    async fn load_plan_stats(&self, generation: u64, analytics: &mut AnalyticsViewModel) {
        match self.api.get_plans().await {
            Ok(response) => {
                let Some(plans) = response.into_success() else {
                    return;
                };
                let matches = locate_plans(&plans);
                self.observer.observe(&DashboardEvent::PlansMatched {
                    generation,
                    plans: plans.len(),
                    basic: matches.basic.is_some(),
                    premium: matches.premium.is_some(),
                    family: matches.family.is_some(),
                });
                apply_plan_matches(&mut analytics.subscription_stats, &matches);
            }
            Err(err) => {
                self.observer.observe(&DashboardEvent::PlansFailed {
                    generation,
                    error: err.to_string(),
                });
            }
        }
    }

    fn begin_load(&self) -> u64 {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        inner.latest_generation += 1;
        inner.view.is_loading = true;
        inner.latest_generation
    }

    fn settle(
        &self,
        generation: u64,
        analytics: Option<AnalyticsViewModel>,
        outcome: LoadOutcome,
    ) -> LoadOutcome {
        let latest = {
            let mut inner = self
                .inner
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if inner.latest_generation == generation {
                if analytics.is_some() {
                    inner.view.analytics = analytics;
                }
                inner.view.is_loading = false;
                None
            } else {
                Some(inner.latest_generation)
            }
        };

        match latest {
            Some(latest) => {
                self.observer
                    .observe(&DashboardEvent::StaleDiscarded { generation, latest });
                LoadOutcome::Stale
            }
            None => {
                if outcome == LoadOutcome::Committed {
                    self.observer
                        .observe(&DashboardEvent::AnalyticsCommitted { generation });
                }
                outcome
            }
        }
    }

    fn observe_auth(&self, auth: &AuthState) {
        self.observer.observe(&DashboardEvent::AuthObserved {
            is_authenticated: auth.is_authenticated,
            is_loading: auth.is_loading,
            has_admin: auth.admin.is_some(),
            token_present: self.session.contains(ADMIN_TOKEN_KEY),
            data_present: self.session.contains(ADMIN_DATA_KEY),
        });
    }

    /// Builds the debug panel for the current state.
    pub fn debug_panel(&self) -> DebugPanel {
        let state = self.state();
        DebugPanel::new(
            &self.auth(),
            StorageStatus::from_presence(self.session.contains(ADMIN_TOKEN_KEY)),
            StorageStatus::from_presence(self.session.contains(ADMIN_DATA_KEY)),
            state.is_loading,
            state.analytics.as_ref(),
        )
    }

    /// Builds the page render model for the current state.
    ///
    /// `today` fills the header's date.
    pub fn page(&self, today: NaiveDate) -> DashboardPage {
        let debug = self
            .config
            .show_debug_panel
            .then(|| self.debug_panel());

        match self.phase() {
            DashboardPhase::AwaitingAuth => DashboardPage::CheckingAuth {
                message: CHECKING_AUTH_MESSAGE,
            },
            DashboardPhase::Unauthenticated => DashboardPage::Redirecting {
                message: REDIRECTING_MESSAGE,
                debug,
            },
            DashboardPhase::LoadingAnalytics | DashboardPhase::Ready => {
                let auth = self.auth();
                let analytics = self.analytics();
                let analytics = analytics.as_ref();

                DashboardPage::Dashboard(Box::new(DashboardContent {
                    debug,
                    header: PageHeader::new(
                        &self.config.product_name,
                        &format_date(today),
                        auth.admin.as_ref(),
                    ),
                    stats_cards: stats_cards(analytics),
                    monthly_growth: Section {
                        title: "Crescimento Mensal",
                        description: "Evolução de usuários e receita nos últimos 6 meses",
                        items: monthly_data(analytics),
                    },
                    subscription_distribution: Section {
                        title: "Distribuição de Planos",
                        description: "Proporção de usuários por tipo de plano",
                        items: subscription_data(analytics),
                    },
                    quick_actions: Section {
                        title: "Ações Rápidas",
                        description: "Acesse rapidamente as principais funcionalidades",
                        items: quick_actions(),
                    },
                }))
            }
        }
    }
}
