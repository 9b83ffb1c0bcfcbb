//! Console configuration.

use serde::{Deserialize, Serialize};

/// Environment variable overriding `session.admin_token`.
pub const TOKEN_ENV: &str = "BABYDIARY_ADMIN_TOKEN";

/// Environment variable overriding `session.admin_data`.
pub const ADMIN_DATA_ENV: &str = "BABYDIARY_ADMIN_DATA";

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Log level.
    pub log_level: String,
    /// Admin API connection.
    pub api: ApiConfig,
    /// Persisted admin session.
    pub session: SessionConfig,
    /// Dashboard display.
    pub dashboard: DashboardSection,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            dashboard: DashboardSection::default(),
        }
    }
}

impl ConsoleConfig {
    /// Overrides session values from the environment, using `lookup` to read
    /// variables. Empty values are ignored.
    pub fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(token) = lookup(TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.session.admin_token = Some(token);
        }
        if let Some(data) = lookup(ADMIN_DATA_ENV).filter(|v| !v.is_empty()) {
            self.session.admin_data = Some(data);
        }
        self
    }
}

/// Admin API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root URL.
    pub base_url: String,
    /// Request timeout in seconds. Absent means no timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: None,
        }
    }
}

/// Stored admin session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Admin bearer token.
    pub admin_token: Option<String>,
    /// Serialized admin profile (`{"name": ..., "email": ...}`).
    pub admin_data: Option<String>,
}

/// Dashboard display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    /// Product name in the page header.
    pub product_name: String,
    /// Render the debug panel.
    pub show_debug_panel: bool,
    /// Refresh and re-render every N seconds. Absent renders once.
    pub watch_interval_secs: Option<u64>,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            product_name: "Baby Diary".to_string(),
            show_debug_panel: true,
            watch_interval_secs: None,
        }
    }
}

/// Loads configuration from a TOML file.
pub fn load_config(path: &str) -> Result<ConsoleConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
    parse_config(&content)
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ConsoleConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConsoleConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert!(config.api.timeout_secs.is_none());
        assert!(config.dashboard.show_debug_panel);
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
            log_level = "debug"

            [api]
            base_url = "https://admin.babydiary.app/api"
            timeout_secs = 15

            [session]
            admin_token = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.session.admin_token.as_deref(), Some("abc"));
        assert!(config.session.admin_data.is_none());
        assert_eq!(config.dashboard.product_name, "Baby Diary");
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[api\nbase_url = 1").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config("/nonexistent/babydiary.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = ConsoleConfig::default().apply_env(|key| match key {
            TOKEN_ENV => Some("from-env".to_string()),
            ADMIN_DATA_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.session.admin_token.as_deref(), Some("from-env"));
        assert!(config.session.admin_data.is_none());
    }
}
