//! Configuration management module
//!
//! This module handles all configuration concerns including layered loading,
//! environment overrides, validation, and read access to the resolved settings.

pub mod app_config;
pub mod environment;
pub mod store;
pub mod validation;

pub use app_config::{AppConfig, LogLevel};
pub use environment::{ConfigPatch, RuntimeEnv};
pub use store::{compose_api_url, ConfigStore, OverrideState};
pub use validation::ConfigValidator;
