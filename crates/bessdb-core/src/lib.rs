pub mod app_config;
pub mod config;
pub mod debounce;
pub mod facility;
pub mod geo;
pub mod premise;
pub mod query;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_config, load_config_from_env};
pub use debounce::Debouncer;
pub use facility::FacilityRecord;
pub use geo::{LatLng, LatLngBounds};
pub use premise::PremiseRecord;
pub use query::{FacilityFilter, PremiseFilter, StatusFilter};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
