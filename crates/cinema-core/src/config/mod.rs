//! Application configuration schemas.
//!
//! Configuration is deserialized from TOML files via the `config` crate.
//! Each sub-module represents a logical configuration section.

pub mod app;
pub mod database;
pub mod logging;
pub mod notification;
pub mod pricing;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::logging::LoggingConfig;
pub use self::notification::NotificationConfig;
pub use self::pricing::PricingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration
/// (default.toml + environment overlay + `CINEMA__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Ticket prices.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Post-booking notification settings.
    #[serde(default)]
    pub notification: NotificationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml` with the environment-specific overlay
    /// `config/{env}.toml` and environment variables prefixed with
    /// `CINEMA__` (nested keys separated by `__`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CINEMA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_apply_to_empty_document() {
        let config = AppConfig::from_toml("").expect("empty config parses");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.provider, StoreProvider::Postgres);
        assert_eq!(config.pricing.adult, dec!(12.00));
        assert_eq!(config.pricing.child, dec!(8.00));
        assert_eq!(config.pricing.senior, dec!(10.00));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9000

            [database]
            provider = "memory"

            [pricing]
            adult = "13.50"
            "#,
        )
        .expect("config parses");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.database.provider, StoreProvider::Memory);
        assert_eq!(config.pricing.adult, dec!(13.50));
        assert_eq!(config.pricing.child, dec!(8.00));
    }
}
