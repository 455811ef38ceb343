use anyhow::Context;
use runtime_config::{shared::LoggingUtils, AppConfig, ConfigStore, ConfigValidator};
use tracing::info;

fn main() {
    if let Err(e) = run() {
        eprintln!("Failed to load runtime configuration: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;

    // set up before validation and the store so their warnings and load events are recorded
    LoggingUtils::initialize(config.log_level, config.debug_mode)?;

    ConfigValidator::validate_config(&config).context("validating configuration")?;

    let store = ConfigStore::install(ConfigStore::new(config)?)?;
    info!(
        runtime_env = %store.config().runtime_env,
        api_base_url = %store.api_base_url(),
        "Runtime configuration ready"
    );

    println!("{}", store.to_json_pretty()?);

    Ok(())
}
