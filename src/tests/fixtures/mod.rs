//! Test fixtures for configuration stores
//!
//! Configuration files and environment maps shared by the integration tests.

use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

/// TOML file overriding a handful of keys, including an extra feature and theme entry
pub const STAGING_TOML: &str = r##"
node_env = "production"
runtime_env = "staging"
port = 8443
base_path = "/market/"
api_host = "https://api.example.com/"
api_path_prefix = "v2/"

[features]
enable_chat = true

[theme]
primary_color = "#222"
font_size = 14
"##;

/// TOML file written with the upper-case key names of the browser config
pub const UPPERCASE_TOML: &str = r##"
API_HOST = "http://other.example.com"
LOG_LEVEL = "warn"

[FEATURES]
ENABLE_ANALYTICS = false

[features]
ENABLE_ERROR_REPORTING = false

[THEME]
FONT = { fontFamily = "Inter" }
"##;

/// YAML file selecting the production patch
pub const PRODUCTION_YAML: &str = r##"
runtime_env: production
debug_mode: true
log_level: debug
"##;

/// Write `contents` to a temporary file with the given extension
pub fn config_file(contents: &str, extension: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("runtime")
        .suffix(&format!(".{}", extension))
        .tempfile()
        .expect("create temporary config file");
    file.write_all(contents.as_bytes())
        .expect("write temporary config file");
    file
}

/// Environment map built from `APP_CONFIG__` prefixed pairs
pub fn env_vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (format!("APP_CONFIG__{}", key), value.to_string()))
        .collect()
}

/// Dotted paths present in the default configuration, with their leaf values
pub fn default_leaves() -> Vec<(&'static str, serde_json::Value)> {
    use serde_json::json;

    vec![
        ("NODE_ENV", json!("development")),
        ("PROJECT_NAME", json!("mcp-market")),
        ("PROJECT_VERSION", json!("1.0.0")),
        ("RUNTIME_ENV", json!("dev")),
        ("PORT", json!(3000)),
        ("BASE_PATH", json!("/")),
        ("MOCK_ENABLED", json!(false)),
        ("DEBUG_MODE", json!(true)),
        ("LOG_LEVEL", json!("info")),
        ("API_HOST", json!("http://134.175.7.229")),
        ("API_PATH_PREFIX", json!("/api")),
        ("FEATURES.ENABLE_ANALYTICS", json!(true)),
        ("FEATURES.ENABLE_ERROR_REPORTING", json!(true)),
        ("FEATURES.ENABLE_PERFORMANCE_MONITORING", json!(false)),
        ("THEME.PRIMARY_COLOR", json!("#1890ff")),
        ("THEME.DARK_MODE", json!(false)),
    ]
}
