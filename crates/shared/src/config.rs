//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// ETL engine configuration.
    #[serde(default)]
    pub etl: EtlConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// ETL engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EtlConfig {
    /// Number of rows loaded per bulk upsert.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Label stored on each fact row naming the originating report.
    #[serde(default = "default_source_label")]
    pub source_label: String,
    /// Report classification used for run diagnostics.
    #[serde(default = "default_report_label")]
    pub report_label: String,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            source_label: default_source_label(),
            report_label: default_report_label(),
        }
    }
}

fn default_batch_size() -> usize {
    100
}

fn default_source_label() -> String {
    "GENERAL_LEDGER".to_string()
}

fn default_report_label() -> String {
    "INCOME_STATEMENT".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FINSTAR").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
