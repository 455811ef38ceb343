//! Runtime configuration store
//!
//! Holds environment-specific settings (port, API host, feature flags, theme)
//! loaded from built-in defaults, an optional `runtime` file and `APP_CONFIG__*`
//! environment variables. The patch for the runtime environment is applied
//! once when the [`ConfigStore`] is built; afterwards the store is read-only.

pub mod config;
pub mod shared;

#[cfg(test)]
mod tests;

pub use config::{AppConfig, ConfigStore, ConfigValidator, LogLevel, RuntimeEnv};
pub use shared::error::{AppError, AppResult};

/// Application result type
pub type Result<T> = std::result::Result<T, shared::error::AppError>;
