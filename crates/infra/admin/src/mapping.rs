//! Mapping from admin API payloads to the dashboard view model.

use babydiary_admin_core::types::{
    AnalyticsViewModel, DashboardSummary, EngagementStats, Plan, SubscriptionStats,
};

/// Name fragment identifying the basic plan.
pub const BASIC_PLAN_TOKEN: &str = "básico";
/// Name fragment identifying the premium plan.
pub const PREMIUM_PLAN_TOKEN: &str = "premium";
/// Name fragment identifying the family plan.
pub const FAMILY_PLAN_TOKEN: &str = "família";

/// Builds the view model from a dashboard summary.
///
/// Missing, negative or non-finite figures become zero. `active_users`
/// mirrors `total_users`. Subscription and engagement stats start zeroed.
pub fn map_dashboard(summary: &DashboardSummary) -> AnalyticsViewModel {
    let users = summary.users.as_ref();
    let revenue = summary.revenue.as_ref();

    let total_users = count_or_zero(users.and_then(|u| u.total));

    AnalyticsViewModel {
        total_users,
        active_users: total_users,
        new_users: count_or_zero(users.and_then(|u| u.new_this_month)),
        total_revenue: amount_or_zero(revenue.and_then(|r| r.total)),
        monthly_revenue: amount_or_zero(revenue.and_then(|r| r.monthly)),
        subscription_stats: SubscriptionStats::default(),
        engagement_stats: EngagementStats::default(),
    }
}

fn count_or_zero(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

fn amount_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Plan records located by name.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanMatches<'a> {
    pub basic: Option<&'a Plan>,
    pub premium: Option<&'a Plan>,
    pub family: Option<&'a Plan>,
}

/// Finds the first plan whose lowercased name contains each plan token.
pub fn locate_plans(plans: &[Plan]) -> PlanMatches<'_> {
    let find = |token: &str| {
        plans
            .iter()
            .find(|plan| plan.name.to_lowercase().contains(token))
    };

    PlanMatches {
        basic: find(BASIC_PLAN_TOKEN),
        premium: find(PREMIUM_PLAN_TOKEN),
        family: find(FAMILY_PLAN_TOKEN),
    }
}

/// Applies located plans to the subscription stats.
///
/// TODO: derive per-plan subscriber counts once the plans endpoint exposes
/// them; until then the located plans are ignored and every count stays zero.
pub fn apply_plan_matches(stats: &mut SubscriptionStats, _matches: &PlanMatches<'_>) {
    *stats = SubscriptionStats::default();
}

#[cfg(test)]
mod tests {
    use super::*;
    use babydiary_admin_core::types::{RevenueSummary, UsersSummary};

    fn summary(users: Option<UsersSummary>, revenue: Option<RevenueSummary>) -> DashboardSummary {
        DashboardSummary { users, revenue }
    }

    #[test]
    fn test_maps_full_summary() {
        let analytics = map_dashboard(&summary(
            Some(UsersSummary {
                total: Some(42.0),
                new_this_month: Some(5.0),
            }),
            Some(RevenueSummary {
                total: Some(1000.0),
                monthly: Some(200.0),
            }),
        ));

        assert_eq!(
            analytics,
            AnalyticsViewModel {
                total_users: 42,
                active_users: 42,
                new_users: 5,
                total_revenue: 1000.0,
                monthly_revenue: 200.0,
                subscription_stats: SubscriptionStats::default(),
                engagement_stats: EngagementStats::default(),
            }
        );
    }

    #[test]
    fn test_missing_sections_default_to_zero() {
        assert_eq!(map_dashboard(&summary(None, None)), AnalyticsViewModel::default());

        let partial = map_dashboard(&summary(
            Some(UsersSummary {
                total: None,
                new_this_month: Some(3.0),
            }),
            Some(RevenueSummary::default()),
        ));
        assert_eq!(partial.total_users, 0);
        assert_eq!(partial.active_users, 0);
        assert_eq!(partial.new_users, 3);
        assert_eq!(partial.total_revenue, 0.0);
    }

    #[test]
    fn test_invalid_figures_default_to_zero() {
        let analytics = map_dashboard(&summary(
            Some(UsersSummary {
                total: Some(f64::NAN),
                new_this_month: Some(-4.0),
            }),
            Some(RevenueSummary {
                total: Some(f64::INFINITY),
                monthly: Some(-10.0),
            }),
        ));
        assert_eq!(analytics, AnalyticsViewModel::default());
    }

    #[test]
    fn test_active_users_mirror_total() {
        for total in [0.0, 1.0, 17.9, 123_456.0] {
            let analytics = map_dashboard(&summary(
                Some(UsersSummary {
                    total: Some(total),
                    new_this_month: Some(1.0),
                }),
                None,
            ));
            assert_eq!(analytics.active_users, analytics.total_users);
        }
    }

    #[test]
    fn test_locate_plans_case_insensitive() {
        let plans = vec![
            Plan::new("Plano BÁSICO"),
            Plan::new("Premium Mensal"),
            Plan::new("Plano Família Anual"),
            Plan::new("Premium Anual"),
        ];
        let matches = locate_plans(&plans);

        assert_eq!(matches.basic.map(|p| p.name.as_str()), Some("Plano BÁSICO"));
        assert_eq!(matches.premium.map(|p| p.name.as_str()), Some("Premium Mensal"));
        assert_eq!(matches.family.map(|p| p.name.as_str()), Some("Plano Família Anual"));
    }

    #[test]
    fn test_locate_plans_ignores_unaccented_names() {
        let plans = vec![Plan::new("Plano Basico"), Plan::new("Familia")];
        assert_eq!(locate_plans(&plans), PlanMatches::default());
    }

    #[test]
    fn test_apply_plan_matches_keeps_counts_zero() {
        let plans = vec![Plan::new("Básico"), Plan::new("Premium"), Plan::new("Família")];
        let mut stats = SubscriptionStats {
            basic: 9,
            premium: 9,
            family: 9,
        };
        apply_plan_matches(&mut stats, &locate_plans(&plans));
        assert_eq!(stats, SubscriptionStats::default());
    }
}
