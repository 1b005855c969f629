use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, FileFormat};
use serde::Deserialize;

use crate::types::ErrorPolicy;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub reader: ReaderSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReaderSettings {
    pub error_policy: ErrorPolicy,
    /// IANA name used for zone-naive and date-only values.
    pub default_timezone: String,
    /// Zone used instead of failing when a TZID parameter cannot be resolved.
    pub unknown_timezone_fallback: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `calstat.toml`.
    /// Environment variables are prefixed with `CALSTAT_` and nested with `__`,
    /// e.g. `CALSTAT_READER__ERROR_POLICY=fatal`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::with_name("calstat").required(false))
            .add_source(
                config::Environment::with_prefix("CALSTAT")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Builds settings from an in-memory TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the TOML is invalid or does not deserialize.
    pub fn from_toml(toml: &str) -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("reader.error_policy", ErrorPolicy::default().as_str())?
            .set_default("reader.default_timezone", "UTC")?
            .set_default("logging.level", "info")?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    Settings::load()
}
