//! Plain-text rendering of the dashboard page.

use babydiary_admin_dashboard::{format_currency, DashboardContent, DashboardPage, DebugPanel};

/// Renders a page as terminal text.
pub fn render_page(page: &DashboardPage) -> String {
    let mut lines = Vec::new();
    match page {
        DashboardPage::CheckingAuth { message } => lines.push(message.to_string()),
        DashboardPage::Redirecting { message, debug } => {
            lines.push(message.to_string());
            if let Some(debug) = debug {
                lines.push(String::new());
                render_debug(debug, &mut lines);
            }
        }
        DashboardPage::Dashboard(content) => render_content(content, &mut lines),
    }
    lines.join("\n")
}

fn render_debug(debug: &DebugPanel, lines: &mut Vec<String>) {
    lines.push("== Debug Info ==".to_string());
    lines.extend(debug.lines());
}

fn render_content(content: &DashboardContent, lines: &mut Vec<String>) {
    if let Some(debug) = &content.debug {
        render_debug(debug, lines);
        lines.push(String::new());
    }

    let header = &content.header;
    lines.push(header.title.to_string());
    lines.push(header.subtitle.clone());
    lines.push(header.logged_in_as.clone());
    lines.push(format!("[{}]", header.refresh_label));
    lines.push(String::new());

    for card in &content.stats_cards {
        lines.push(format!(
            "{}: {} ({} desde o mês passado)",
            card.title, card.value, card.change
        ));
    }
    lines.push(String::new());

    let growth = &content.monthly_growth;
    lines.push(growth.title.to_string());
    lines.push(growth.description.to_string());
    for point in &growth.items {
        lines.push(format!(
            "  {:<4} Usuários: {:>8}  Receita: {}",
            point.month,
            point.users,
            format_currency(point.revenue)
        ));
    }
    lines.push(String::new());

    let plans = &content.subscription_distribution;
    lines.push(plans.title.to_string());
    lines.push(plans.description.to_string());
    if plans.items.is_empty() {
        lines.push("  (sem dados)".to_string());
    }
    for slice in &plans.items {
        lines.push(format!("  {} ({})", slice.label(), slice.value));
    }
    lines.push(String::new());

    let actions = &content.quick_actions;
    lines.push(actions.title.to_string());
    lines.push(actions.description.to_string());
    for action in &actions.items {
        lines.push(format!("  - {}", action.label));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use babydiary_admin_dashboard::{CHECKING_AUTH_MESSAGE, REDIRECTING_MESSAGE};

    #[test]
    fn test_render_checking_auth() {
        let page = DashboardPage::CheckingAuth {
            message: CHECKING_AUTH_MESSAGE,
        };
        assert_eq!(render_page(&page), "Verificando autenticação...");
    }

    #[test]
    fn test_render_redirect_without_debug() {
        let page = DashboardPage::Redirecting {
            message: REDIRECTING_MESSAGE,
            debug: None,
        };
        assert_eq!(render_page(&page), "Não autenticado. Redirecionando...");
    }
}
