//! Domain types and configuration shared by the trendboard crates.
//!
//! A [`Record`] is one row of the fashion-trend dataset; a
//! [`FilterSelection`] is the four dashboard filters for one rendering pass.

pub mod app_config;
pub mod config;
pub mod record;
pub mod selection;

use thiserror::Error;

pub use app_config::{AppConfig, OutputFormat, WindowAnchor};
pub use config::{load_app_config, load_app_config_from_env};
pub use record::{Hashtags, Record};
pub use selection::{Choice, FilterSelection};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid filter value '{value}': {reason}")]
    InvalidChoice { value: String, reason: String },

    #[error("unknown filter key '{0}'; expected location, category, year or platform")]
    UnknownFilterKey(String),
}
