//! Logging utilities module
//!
//! This module provides centralized logging set-up and the structured events
//! emitted while the configuration store is built.

use tracing::{info, warn};

use crate::config::app_config::LogLevel;
use crate::config::environment::RuntimeEnv;

/// Logging utilities for the application
pub struct LoggingUtils;

impl LoggingUtils {
    /// Initialize logging with the configured level
    ///
    /// `RUST_LOG` takes precedence over `level` when it is set. Debug mode adds
    /// source file and line numbers to every event.
    pub fn initialize(level: LogLevel, debug_mode: bool) -> crate::Result<()> {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(false)
            .with_file(debug_mode)
            .with_line_number(debug_mode)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| crate::shared::error::AppError::Internal(format!("Failed to initialize logging: {}", e)))?;

        Ok(())
    }

    /// Log that a store finished construction
    pub fn log_loaded(runtime_env: &str, overridden: bool) {
        info!(
            runtime_env = %runtime_env,
            overridden = overridden,
            "Runtime configuration loaded"
        );
    }

    /// Log an applied environment patch
    pub fn log_override(env: RuntimeEnv, fields: &[&str]) {
        info!(
            runtime_env = %env,
            fields = ?fields,
            "Applied environment overrides"
        );
    }

    /// Log a runtime environment tag that selects no patch
    pub fn log_unknown_env(tag: &str) {
        warn!(
            runtime_env = %tag,
            "Unrecognized runtime environment, no overrides applied"
        );
    }
}
