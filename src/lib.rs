pub mod app;
pub mod modules;
mod schema;
pub mod shared;

pub use app::{AppServices, Clients, Repositories};
pub use shared::errors::{AppError, AppResult};
pub use shared::AppConfig;

use shared::utils::init_logger;

/// Loads `.env`, initializes logging and wires the production services.
pub fn bootstrap() -> AppResult<AppServices> {
    init_logger();

    let config = AppConfig::from_env()?;
    match AppServices::from_config(&config) {
        Ok(services) => {
            log::info!("ShiKaraKa core ready");
            Ok(services)
        }
        Err(e) => {
            log::error!("Failed to initialize services: {}", e);
            Err(e)
        }
    }
}
