//! Configuration validation module
//!
//! This module provides semantic checks for configuration beyond the
//! field-level validation done by the validator crate. Problems that do not
//! prevent the store from working are only logged.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::config::app_config::AppConfig;
use crate::config::environment::RuntimeEnv;
use crate::shared::error::AppError;

const URL_PATH_PATTERN: &str = r"^(/[A-Za-z0-9._~!$&'()*+,;=:@%-]*)*$";
const HEX_COLOR_PATTERN: &str = r"^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$";

static URL_PATH_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(URL_PATH_PATTERN));
static HEX_COLOR_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(HEX_COLOR_PATTERN));

fn compiled(regex: &'static LazyLock<Result<Regex, regex::Error>>, pattern: &str) -> crate::Result<&'static Regex> {
    LazyLock::force(regex)
        .as_ref()
        .map_err(|e| AppError::Internal(format!("Invalid regex pattern '{}': {}", pattern, e)))
}

/// Configuration validator for additional validation logic
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the complete configuration
    pub fn validate_config(config: &AppConfig) -> crate::Result<()> {
        Self::validate_api_host(&config.api_host)?;
        Self::validate_url_path("base_path", &config.base_path)?;
        Self::validate_url_path("api_path_prefix", &config.api_path_prefix)?;

        Self::check_runtime_env(&config.runtime_env);
        Self::check_theme(config)?;

        Ok(())
    }

    fn validate_api_host(host: &str) -> crate::Result<()> {
        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(AppError::Validation(
                "API host must start with http:// or https://".to_string()
            ));
        }

        Ok(())
    }

    fn validate_url_path(field: &str, path: &str) -> crate::Result<()> {
        if !compiled(&URL_PATH_RE, URL_PATH_PATTERN)?.is_match(path) {
            return Err(AppError::Validation(format!(
                "{} must be empty or start with '/' and contain only URL path characters: {}",
                field, path
            )));
        }

        Ok(())
    }

    /// Unknown tags are tolerated: the store applies no patch for them
    fn check_runtime_env(tag: &str) {
        if RuntimeEnv::from_tag(tag).is_none() {
            warn!(
                runtime_env = %tag,
                "Runtime environment is not one of development, production, test"
            );
        }
    }

    fn check_theme(config: &AppConfig) -> crate::Result<()> {
        let color = config
            .theme
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("primary_color"))
            .and_then(|(_, value)| value.as_str());

        if let Some(color) = color {
            if !compiled(&HEX_COLOR_RE, HEX_COLOR_PATTERN)?.is_match(color) {
                warn!(primary_color = %color, "Theme primary color is not a hex color");
            }
        }

        Ok(())
    }
}
