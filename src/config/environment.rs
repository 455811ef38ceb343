//! Deployment environments and their override patches
//!
//! Each runtime environment maps to a fixed patch that is applied once when
//! the configuration store is built.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::app_config::{AppConfig, LogLevel};

/// API host used by the test environment
pub const TEST_API_HOST: &str = "http://localhost:8081";

/// Feature switched on in production
pub const PERFORMANCE_MONITORING_FEATURE: &str = "enable_performance_monitoring";

/// Known deployment environments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnv {
    Development,
    Production,
    Test,
}

impl RuntimeEnv {
    /// Resolve a runtime environment tag, `None` for unrecognized tags
    ///
    /// Tags are matched exactly: `"PRODUCTION"` or `" test "` select no patch.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "dev" | "development" => Some(RuntimeEnv::Development),
            "production" => Some(RuntimeEnv::Production),
            "test" => Some(RuntimeEnv::Test),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeEnv::Development => "development",
            RuntimeEnv::Production => "production",
            RuntimeEnv::Test => "test",
        }
    }

    /// The patch this environment applies
    pub fn overrides(&self) -> ConfigPatch {
        match self {
            RuntimeEnv::Development => ConfigPatch::default(),
            RuntimeEnv::Production => ConfigPatch {
                debug_mode: Some(false),
                log_level: Some(LogLevel::Error),
                features: vec![(PERFORMANCE_MONITORING_FEATURE.to_string(), true)],
                ..ConfigPatch::default()
            },
            RuntimeEnv::Test => ConfigPatch {
                mock_enabled: Some(true),
                api_host: Some(TEST_API_HOST.to_string()),
                ..ConfigPatch::default()
            },
        }
    }
}

impl fmt::Display for RuntimeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field mutations applied for a runtime environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub debug_mode: Option<bool>,
    pub log_level: Option<LogLevel>,
    pub mock_enabled: Option<bool>,
    pub api_host: Option<String>,
    pub features: Vec<(String, bool)>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        self.debug_mode.is_none()
            && self.log_level.is_none()
            && self.mock_enabled.is_none()
            && self.api_host.is_none()
            && self.features.is_empty()
    }

    /// Apply the patch, returning the names of the fields it touched
    pub fn apply(self, config: &mut AppConfig) -> Vec<&'static str> {
        let mut touched = Vec::new();

        if let Some(debug_mode) = self.debug_mode {
            config.debug_mode = debug_mode;
            touched.push("debug_mode");
        }
        if let Some(log_level) = self.log_level {
            config.log_level = log_level;
            touched.push("log_level");
        }
        if let Some(mock_enabled) = self.mock_enabled {
            config.mock_enabled = mock_enabled;
            touched.push("mock_enabled");
        }
        if let Some(api_host) = self.api_host {
            config.api_host = api_host;
            touched.push("api_host");
        }
        if !self.features.is_empty() {
            for (name, enabled) in self.features {
                config.features.insert(name, enabled);
            }
            touched.push("features");
        }

        touched
    }
}
