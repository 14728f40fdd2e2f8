//! Infrastructure layer: storage, usecase implementations, config.

pub mod config;
pub mod store;
pub mod usecases;

pub use config::{AppConfig, ConfigError, Locale};
