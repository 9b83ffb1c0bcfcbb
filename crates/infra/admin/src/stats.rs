//! Statistics cards and chart series derived from the view model.
//!
//! Everything here is a pure function of the current analytics and is
//! recomputed on every render.

use std::fmt;

use babydiary_admin_core::types::AnalyticsViewModel;
use serde::{Deserialize, Serialize};

use crate::format::format_currency;

/// Icon identifiers used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Users,
    UserCheck,
    UserPlus,
    DollarSign,
    TrendingUp,
    CreditCard,
    Trophy,
    BarChart3,
}

/// Value shown on a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum StatValue {
    Count(u64),
    Currency(f64),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(count) => write!(f, "{count}"),
            Self::Currency(amount) => f.write_str(&format_currency(*amount)),
        }
    }
}

/// A headline metric card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: StatValue,
    /// Change versus last month. Static until historical data is available.
    pub change: &'static str,
    pub icon: Icon,
    pub color: &'static str,
    pub bg_color: &'static str,
}

/// Builds the four headline cards.
pub fn stats_cards(analytics: Option<&AnalyticsViewModel>) -> Vec<StatCard> {
    let current = analytics.cloned().unwrap_or_default();

    vec![
        StatCard {
            title: "Total de Usuários",
            value: StatValue::Count(current.total_users),
            change: "+12%",
            icon: Icon::Users,
            color: "text-blue-600",
            bg_color: "bg-blue-100",
        },
        StatCard {
            title: "Usuários Ativos",
            value: StatValue::Count(current.active_users),
            change: "+8%",
            icon: Icon::UserCheck,
            color: "text-green-600",
            bg_color: "bg-green-100",
        },
        StatCard {
            title: "Novos Usuários",
            value: StatValue::Count(current.new_users),
            change: "+15%",
            icon: Icon::UserPlus,
            color: "text-purple-600",
            bg_color: "bg-purple-100",
        },
        StatCard {
            title: "Receita Total",
            value: StatValue::Currency(current.total_revenue),
            change: "+23%",
            icon: Icon::DollarSign,
            color: "text-orange-600",
            bg_color: "bg-orange-100",
        },
    ]
}

/// One slice of the subscription distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionSlice {
    pub name: &'static str,
    pub value: u64,
    pub color: &'static str,
    /// Fraction of all subscribers, in `0.0..=1.0`. Zero when there are none.
    pub share: f64,
}

impl SubscriptionSlice {
    /// Pie label, e.g. `Premium 40%`.
    pub fn label(&self) -> String {
        format!("{} {:.0}%", self.name, self.share * 100.0)
    }
}

/// Builds the plan distribution. Empty when no analytics are loaded.
pub fn subscription_data(analytics: Option<&AnalyticsViewModel>) -> Vec<SubscriptionSlice> {
    let Some(analytics) = analytics else {
        return Vec::new();
    };

    let stats = analytics.subscription_stats;
    let total = stats.total();
    let share = |value: u64| {
        if total == 0 {
            0.0
        } else {
            value as f64 / total as f64
        }
    };

    [
        ("Básico", stats.basic, "#3B82F6"),
        ("Premium", stats.premium, "#10B981"),
        ("Família", stats.family, "#F59E0B"),
    ]
    .into_iter()
    .map(|(name, value, color)| SubscriptionSlice {
        name,
        value,
        color,
        share: share(value),
    })
    .collect()
}

/// One month of the growth chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: &'static str,
    pub users: u64,
    pub revenue: f64,
}

const MONTHS: [&str; 6] = ["Jan", "Fev", "Mar", "Abr", "Mai", "Jun"];

/// Builds the six-month growth series.
///
/// The API has no history endpoint, so only the last bucket carries the
/// current totals and earlier buckets are zero.
pub fn monthly_data(analytics: Option<&AnalyticsViewModel>) -> Vec<MonthlyPoint> {
    let last = MONTHS.len() - 1;
    MONTHS
        .into_iter()
        .enumerate()
        .map(|(i, month)| match analytics {
            Some(current) if i == last => MonthlyPoint {
                month,
                users: current.total_users,
                revenue: current.total_revenue,
            },
            _ => MonthlyPoint {
                month,
                users: 0,
                revenue: 0.0,
            },
        })
        .collect()
}

/// A shortcut button on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub icon: Icon,
}

/// The fixed quick-action grid.
pub fn quick_actions() -> Vec<QuickAction> {
    vec![
        QuickAction {
            label: "Gerenciar Usuários",
            icon: Icon::Users,
        },
        QuickAction {
            label: "Planos",
            icon: Icon::CreditCard,
        },
        QuickAction {
            label: "Gamificação",
            icon: Icon::Trophy,
        },
        QuickAction {
            label: "Analytics",
            icon: Icon::BarChart3,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use babydiary_admin_core::types::SubscriptionStats;

    fn analytics() -> AnalyticsViewModel {
        AnalyticsViewModel {
            total_users: 42,
            active_users: 42,
            new_users: 5,
            total_revenue: 1000.0,
            monthly_revenue: 200.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_stats_cards_values() {
        let cards = stats_cards(Some(&analytics()));
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].value, StatValue::Count(42));
        assert_eq!(cards[1].value, StatValue::Count(42));
        assert_eq!(cards[2].value, StatValue::Count(5));
        assert_eq!(cards[3].value.to_string(), "R$ 1.000,00");
        assert_eq!(
            cards.iter().map(|c| c.change).collect::<Vec<_>>(),
            vec!["+12%", "+8%", "+15%", "+23%"]
        );
    }

    #[test]
    fn test_stats_cards_without_analytics() {
        let cards = stats_cards(None);
        assert_eq!(cards[0].value.to_string(), "0");
        assert_eq!(cards[3].value.to_string(), "R$ 0,00");
    }

    #[test]
    fn test_subscription_data() {
        assert!(subscription_data(None).is_empty());

        let slices = subscription_data(Some(&analytics()));
        assert_eq!(
            slices.iter().map(|s| s.name).collect::<Vec<_>>(),
            vec!["Básico", "Premium", "Família"]
        );
        assert!(slices.iter().all(|s| s.value == 0 && s.share == 0.0));
        assert_eq!(slices[1].label(), "Premium 0%");
    }

    #[test]
    fn test_subscription_shares() {
        let mut current = analytics();
        current.subscription_stats = SubscriptionStats {
            basic: 1,
            premium: 2,
            family: 1,
        };
        let slices = subscription_data(Some(&current));
        assert_eq!(slices[0].share, 0.25);
        assert_eq!(slices[1].label(), "Premium 50%");
    }

    #[test]
    fn test_monthly_data_only_last_bucket_is_live() {
        let points = monthly_data(Some(&analytics()));
        assert_eq!(points.len(), 6);
        assert_eq!(points[5].month, "Jun");
        assert_eq!(points[5].users, 42);
        assert_eq!(points[5].revenue, 1000.0);
        assert!(points[..5].iter().all(|p| p.users == 0 && p.revenue == 0.0));

        assert!(monthly_data(None).iter().all(|p| p.users == 0 && p.revenue == 0.0));
    }

    #[test]
    fn test_quick_actions() {
        let actions = quick_actions();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[1].icon, Icon::CreditCard);
    }
}
