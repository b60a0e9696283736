use std::time::Duration;

use congress_api::DEFAULT_BASE_URL;
use serde::Deserialize;
use serde_with::serde_as;

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub min_interval_ms: u64,
}

impl Settings {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

/// Reads settings from an optional `export.{toml,yaml,json}` file and `CONGRESS_*` env vars.
pub fn read_config() -> Result<Settings, config::ConfigError> {
    load_settings(config::Environment::with_prefix("CONGRESS").prefix_separator("_"))
}

fn load_settings(environment: config::Environment) -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("api_key", "")?
        .set_default("base_url", DEFAULT_BASE_URL)?
        .set_default("min_interval_ms", "1000")?
        .add_source(config::File::with_name("export").required(false))
        .add_source(environment)
        .build()?
        .try_deserialize::<Settings>()?;

    if settings.api_key.trim().is_empty() {
        return Err(config::ConfigError::Message(
            "CONGRESS_API_KEY not set. Create a .env file or export it in the environment."
                .to_string(),
        ));
    }

    Ok(settings)
}
