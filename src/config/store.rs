//! Runtime configuration store
//!
//! A [`ConfigStore`] is built once from an [`AppConfig`]: the environment
//! patch selected by `runtime_env` is applied during construction and the
//! store is read-only afterwards. Path segments are matched
//! case-insensitively, so `FEATURES.ENABLE_ANALYTICS` and
//! `features.enable_analytics` address the same value; stored keys keep
//! the case they were configured with, apart from feature and theme names,
//! which are lowercased.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::config::app_config::{fold_keys, AppConfig};
use crate::config::environment::RuntimeEnv;
use crate::shared::error::{AppError, AppResult};
use crate::shared::logging::LoggingUtils;

static GLOBAL_STORE: OnceLock<ConfigStore> = OnceLock::new();

/// Whether an environment patch was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideState {
    /// Built-in or loaded values, no patch applied
    Default,
    /// The patch of the given environment was applied
    Overridden(RuntimeEnv),
}

/// Immutable, post-override runtime configuration
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config: AppConfig,
    snapshot: Value,
    state: OverrideState,
}

impl ConfigStore {
    /// Build the store, applying the runtime environment patch exactly once
    ///
    /// Fails when two feature or theme names differ only by case.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let mut config = fold_section_keys(config)?;

        let state = match RuntimeEnv::from_tag(&config.runtime_env) {
            Some(env) => {
                let patch = env.overrides();
                if patch.is_empty() {
                    OverrideState::Default
                } else {
                    let touched = patch.apply(&mut config);
                    LoggingUtils::log_override(env, &touched);
                    OverrideState::Overridden(env)
                }
            }
            None => {
                LoggingUtils::log_unknown_env(&config.runtime_env);
                OverrideState::Default
            }
        };

        let snapshot = serde_json::to_value(&config)?;

        LoggingUtils::log_loaded(
            &config.runtime_env,
            matches!(state, OverrideState::Overridden(_)),
        );

        Ok(Self { config, snapshot, state })
    }

    /// Load the layered configuration and build a store from it
    pub fn load() -> AppResult<Self> {
        Self::new(AppConfig::load()?)
    }

    /// Install the process-wide store; fails when one is already installed
    pub fn install(store: ConfigStore) -> AppResult<&'static ConfigStore> {
        GLOBAL_STORE
            .set(store)
            .map_err(|_| AppError::AlreadyInitialized)?;

        GLOBAL_STORE
            .get()
            .ok_or_else(|| AppError::Internal("Global configuration store missing after install".to_string()))
    }

    /// The process-wide store, if installed
    pub fn global() -> Option<&'static ConfigStore> {
        GLOBAL_STORE.get()
    }

    /// Typed view of the resolved configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn override_state(&self) -> OverrideState {
        self.state
    }

    /// Resolved configuration as a JSON object
    pub fn snapshot(&self) -> &Value {
        &self.snapshot
    }

    /// Walk a dotted path, `None` as soon as a segment is missing or the
    /// current value is a scalar
    ///
    /// Object keys match exactly first, then ignoring ASCII case. A segment
    /// written as a plain decimal index selects an array element.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let mut current = &self.snapshot;

        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment).or_else(|| {
                    map.iter()
                        .find(|(key, _)| key.eq_ignore_ascii_case(segment))
                        .map(|(_, value)| value)
                })?,
                Value::Array(items) => items.get(array_index(segment)?)?,
                _ => return None,
            };
        }

        Some(current)
    }

    /// Value at a dotted path, or `default` when the path does not resolve
    pub fn get(&self, path: &str, default: impl Into<Value>) -> Value {
        match self.lookup(path) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    /// Typed value at a dotted path, or `default` when missing or of another type
    pub fn get_as<T: DeserializeOwned>(&self, path: &str, default: T) -> T {
        self.lookup(path)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or(default)
    }

    /// Feature switch value, `None` when the feature is unknown or not a boolean
    pub fn feature(&self, name: &str) -> Option<bool> {
        self.lookup(&format!("features.{}", name))
            .and_then(Value::as_bool)
    }

    /// Whether a feature is switched on; unknown features are off
    pub fn is_feature_enabled(&self, name: &str) -> bool {
        self.feature(name).unwrap_or(false)
    }

    pub fn features(&self) -> &BTreeMap<String, bool> {
        &self.config.features
    }

    pub fn theme_value(&self, key: &str) -> Option<&Value> {
        self.lookup(&format!("theme.{}", key))
    }

    pub fn theme(&self) -> &BTreeMap<String, Value> {
        &self.config.theme
    }

    /// Full backend URL for `path`
    pub fn api_url(&self, path: &str) -> String {
        compose_api_url(&self.config.api_host, &self.config.api_path_prefix, path)
    }

    /// Backend URL without a trailing segment
    pub fn api_base_url(&self) -> String {
        self.api_url("")
    }

    /// Pretty-printed JSON of the resolved configuration
    pub fn to_json_pretty(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot)?)
    }
}

/// Join host, path prefix and path into a URL
///
/// Strips one trailing slash from the host, forces exactly one leading slash
/// and no trailing slash on the prefix, and strips one leading slash from the
/// path, which is appended only when non-empty. No encoding or validation.
pub fn compose_api_url(host: &str, prefix: &str, path: &str) -> String {
    let host = host.strip_suffix('/').unwrap_or(host);

    let leading = format!("/{}", prefix.strip_prefix('/').unwrap_or(prefix));
    let prefix = leading.strip_suffix('/').unwrap_or(&leading);

    let path = path.strip_prefix('/').unwrap_or(path);

    if path.is_empty() {
        format!("{}{}", host, prefix)
    } else {
        format!("{}{}/{}", host, prefix, path)
    }
}

fn fold_section_keys(mut config: AppConfig) -> AppResult<AppConfig> {
    config.features = fold_keys("features", config.features)?;
    config.theme = fold_keys("theme", config.theme)?;
    Ok(config)
}

/// `"0"`, `"12"`; rejects signs, leading zeros and empty segments
fn array_index(segment: &str) -> Option<usize> {
    let index: usize = segment.parse().ok()?;
    (index.to_string() == segment).then_some(index)
}
