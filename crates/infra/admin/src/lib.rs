//! # Baby Diary Admin Dashboard
//!
//! Headless dashboard page of the Baby Diary admin console.
//! Fetches aggregate analytics from the admin API, maps them into a view
//! model and derives the page's stat cards, charts and quick actions.

mod format;
mod mapping;
mod page;
mod stats;
mod view;

pub use format::*;
pub use mapping::*;
pub use page::*;
pub use stats::*;
pub use view::*;

/// Admin dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Product name shown in the page header.
    pub product_name: String,
    /// Whether the diagnostic debug panel is rendered.
    pub show_debug_panel: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            product_name: "Baby Diary".to_string(),
            show_debug_panel: true,
        }
    }
}

impl DashboardConfig {
    /// Creates a new dashboard config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the product name.
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = name.into();
        self
    }

    /// Hides the debug panel.
    pub fn hide_debug_panel(mut self) -> Self {
        self.show_debug_panel = false;
        self
    }
}
