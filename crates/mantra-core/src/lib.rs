pub mod app_config;
pub mod browse;
pub mod cache;
pub mod config;
pub mod prefs;
pub mod shows;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use cache::TtlCache;
pub use config::{load_app_config, load_app_config_from_env};
pub use prefs::{FilePreferenceStore, PreferenceStore, Preferences, PrefsError};
pub use shows::{Show, ShowsResponse, SortOrder, DEFAULT_RADIUS_MILES};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
