//! Application configuration structures
//!
//! This module contains the typed schema of the runtime configuration, its
//! built-in defaults and the layered loader.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use validator::Validate;

use crate::shared::error::AppError;

/// Name of the optional configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "runtime";

/// Prefix of environment variables that override configuration keys
pub const ENV_PREFIX: &str = "APP_CONFIG";

/// Separator between nested key segments in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(AppError::Validation(format!("Invalid log level: {}", other))),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// Environment name (e.g. "development")
    pub node_env: String,

    /// Project name
    #[validate(length(min = 1))]
    pub project_name: String,

    /// Project version
    #[validate(length(min = 1))]
    pub project_version: String,

    /// Runtime environment tag, selects the override patch
    pub runtime_env: String,

    /// Server port
    #[validate(range(min = 1))]
    pub port: u16,

    /// Project base path
    pub base_path: String,

    /// Serve mock data instead of calling the backend
    pub mock_enabled: bool,

    /// Debug mode
    pub debug_mode: bool,

    /// Log level
    pub log_level: LogLevel,

    /// Backend API host
    #[validate(url)]
    pub api_host: String,

    /// Backend API path prefix
    pub api_path_prefix: String,

    /// Feature switches, extensible by any configuration layer
    pub features: BTreeMap<String, bool>,

    /// Presentation settings
    pub theme: BTreeMap<String, serde_json::Value>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let features = BTreeMap::from([
            ("enable_analytics".to_string(), true),
            ("enable_error_reporting".to_string(), true),
            ("enable_performance_monitoring".to_string(), false),
        ]);

        let theme = BTreeMap::from([
            ("primary_color".to_string(), serde_json::json!("#1890ff")),
            ("dark_mode".to_string(), serde_json::json!(false)),
        ]);

        Self {
            node_env: "development".to_string(),
            project_name: "mcp-market".to_string(),
            project_version: "1.0.0".to_string(),
            runtime_env: "dev".to_string(),
            port: 3000,
            base_path: "/".to_string(),
            mock_enabled: false,
            debug_mode: true,
            log_level: LogLevel::Info,
            api_host: "http://134.175.7.229".to_string(),
            api_path_prefix: "/api".to_string(),
            features,
            theme,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the optional `runtime` file and `APP_CONFIG__*` variables
    pub fn load() -> crate::Result<Self> {
        let builder = Self::builder_with_defaults()?
            .add_source(Self::folded_source(
                config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
            )?)
            .add_source(Self::environment_source(None));

        Self::finish(builder)
    }

    /// Load configuration from an explicit file and an explicit environment map
    ///
    /// A file passed here is required. With `env` set to `None` the process
    /// environment is used.
    pub fn load_from(file: Option<&Path>, env: Option<HashMap<String, String>>) -> crate::Result<Self> {
        let mut builder = Self::builder_with_defaults()?;

        if let Some(path) = file {
            builder = builder.add_source(Self::folded_source(config::File::from(path).required(true))?);
        }

        let builder = builder.add_source(Self::environment_source(env));

        Self::finish(builder)
    }

    fn builder_with_defaults() -> crate::Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = config::Config::try_from(&AppConfig::default())
            .map_err(|e| AppError::Config(format!("Failed to serialize defaults: {}", e)))?;

        Ok(config::Config::builder().add_source(defaults))
    }

    /// Read a file layer on its own and lowercase its keys before it is merged
    ///
    /// Top-level keys and the entries of `features` / `theme` are folded;
    /// values nested deeper are kept as written.
    fn folded_source<S>(source: S) -> crate::Result<config::Config>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let raw: serde_json::Map<String, serde_json::Value> = config::Config::builder()
            .add_source(source)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to read configuration file: {}", e)))?
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to parse configuration file: {}", e)))?;

        let folded = fold_file_keys(raw)?;

        config::Config::try_from(&folded)
            .map_err(|e| AppError::Config(format!("Failed to merge configuration file: {}", e)))
    }

    fn environment_source(env: Option<HashMap<String, String>>) -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(env.map(|vars| vars.into_iter().collect()))
    }

    fn finish(builder: config::ConfigBuilder<config::builder::DefaultState>) -> crate::Result<Self> {
        let config = builder
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build configuration: {}", e)))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Failed to deserialize configuration: {}", e)))?;

        config.validate_config()?;

        Ok(config)
    }

    /// Validate field-level constraints
    pub fn validate_config(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }

    /// Set a feature switch, adding it when unknown
    pub fn with_feature(mut self, name: &str, enabled: bool) -> Self {
        self.features.insert(name.to_ascii_lowercase(), enabled);
        self
    }

    /// Set the runtime environment tag
    pub fn with_runtime_env(mut self, tag: impl Into<String>) -> Self {
        self.runtime_env = tag.into();
        self
    }
}

/// Sections whose entries are folded to lowercase names
const FOLDED_SECTIONS: [&str; 2] = ["features", "theme"];

fn fold_file_keys(
    raw: serde_json::Map<String, serde_json::Value>,
) -> crate::Result<BTreeMap<String, serde_json::Value>> {
    let mut folded = BTreeMap::new();
    let mut sections: BTreeMap<String, BTreeMap<String, serde_json::Value>> = BTreeMap::new();

    for (key, value) in raw {
        let lowered = key.to_ascii_lowercase();
        match value {
            // `[FEATURES]` and `[features]` in one file merge entry by entry
            serde_json::Value::Object(entries) if FOLDED_SECTIONS.contains(&lowered.as_str()) => {
                let section = sections.entry(lowered.clone()).or_default();
                for (name, value) in entries {
                    insert_folded(&lowered, section, name, value)?;
                }
            }
            value => insert_folded("configuration", &mut folded, key, value)?,
        }
    }

    for (name, entries) in sections {
        let entries = serde_json::Value::Object(entries.into_iter().collect());
        insert_folded("configuration", &mut folded, name, entries)?;
    }

    Ok(folded)
}

/// Lowercase every key; two keys that differ only by case are an error
pub(crate) fn fold_keys<V>(
    section: &str,
    entries: impl IntoIterator<Item = (String, V)>,
) -> crate::Result<BTreeMap<String, V>> {
    let mut folded = BTreeMap::new();
    for (key, value) in entries {
        insert_folded(section, &mut folded, key, value)?;
    }
    Ok(folded)
}

fn insert_folded<V>(
    section: &str,
    target: &mut BTreeMap<String, V>,
    key: String,
    value: V,
) -> crate::Result<()> {
    let lowered = key.to_ascii_lowercase();
    if target.contains_key(&lowered) {
        return Err(AppError::Validation(format!(
            "Duplicate key '{}' in {}: keys are case-insensitive",
            key, section
        )));
    }
    target.insert(lowered, value);
    Ok(())
}
