// In crates/app-config/src/types.rs

use analytics::{Dimension, ReportConfig};
use analytics::engine::DEFAULT_STARTING_CAPITAL;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the database connection.
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings {
    /// The connection URL for the PostgreSQL database.
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Defaults for performance reports.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyticsSettings {
    #[serde(default = "default_starting_capital")]
    pub starting_capital: Decimal,
    /// Range token used when a request does not name one. Empty means all time.
    #[serde(default = "default_time_range")]
    pub default_time_range: String,
    #[serde(default = "default_breakdowns")]
    pub breakdowns: Vec<Dimension>,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            starting_capital: default_starting_capital(),
            default_time_range: default_time_range(),
            breakdowns: default_breakdowns(),
        }
    }
}

impl AnalyticsSettings {
    pub fn report_config(&self) -> ReportConfig {
        ReportConfig {
            starting_capital: self.starting_capital,
            dimensions: self.breakdowns.clone(),
        }
    }
}

/// Helper functions for serde defaults
fn default_max_connections() -> u32 { 5 }
fn default_starting_capital() -> Decimal { DEFAULT_STARTING_CAPITAL }
fn default_time_range() -> String { "7days".to_string() }
fn default_breakdowns() -> Vec<Dimension> { Dimension::ALL.to_vec() }
