//! Cinema Booking Server
//!
//! Main entry point that loads configuration, connects the stores, and
//! starts the HTTP API.

use tracing_subscriber::{EnvFilter, fmt};

use cinema_core::config::AppConfig;
use cinema_core::error::AppError;
use cinema_database::Stores;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and `CINEMA__*` variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("CINEMA_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect the stores and serve until shutdown.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        store = ?config.database.provider,
        "Starting cinema booking server"
    );

    let stores = Stores::connect(&config.database).await?;
    if !stores.health_check().await? {
        return Err(AppError::service_unavailable("Store is not reachable"));
    }
    tracing::info!(store = stores.provider_name(), "Stores ready");

    cinema_api::run_server(config, stores).await
}
