use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{
    types::{Config, ScraperOverrides},
    ConfigError,
};

/// Load configuration from defaults, an optional file, environment variables
/// and command line overrides, in increasing order of precedence.
///
/// Environment variables use the `YIFI_` prefix with `__` between sections,
/// e.g. `YIFI_SCRAPER__QUALITY=720p` or `YIFI_API__TIMEOUT_SECS=10`.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ScraperOverrides,
) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: Config = figment
        .merge(Env::prefixed("YIFI_").split("__"))
        .merge(Serialized::default("scraper", overrides))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
