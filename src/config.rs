//! Configuration management for the `pogoda-bot` application
//!
//! Handles loading configuration from an optional `config.toml`, environment
//! variables with the `POGODA` prefix, and provides validation for all
//! settings before the bot starts polling.

use crate::PogodaError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure for the bot process
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Telegram session configuration
    pub telegram: TelegramConfig,
    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,
}

/// Telegram session settings
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token. Required: the bot cannot poll without it.
    pub token: String,
}

/// Weather provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key. Absence is surfaced per request as a chat
    /// sentence, not as a startup failure.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the current-weather endpoint
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

fn default_weather_base_url() -> String {
    "http://api.openweathermap.org/data/2.5/weather".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
        }
    }
}

impl BotConfig {
    /// Load configuration from `config.toml` (if present) and `POGODA_*`
    /// environment variables.
    ///
    /// Recognized variables: `POGODA_TELEGRAM__TOKEN`,
    /// `POGODA_WEATHER__API_KEY`, `POGODA_WEATHER__BASE_URL`.
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with POGODA_ prefix
        builder = builder.add_source(
            Environment::with_prefix("POGODA")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: BotConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.telegram.token.trim().is_empty() {
            return Err(PogodaError::config(
                "Telegram bot token cannot be empty. Set POGODA_TELEGRAM__TOKEN.",
            )
            .into());
        }

        if let Some(api_key) = &self.weather.api_key {
            if api_key.is_empty() {
                return Err(PogodaError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(
                PogodaError::config("Weather base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_token(token: &str) -> BotConfig {
        BotConfig {
            telegram: TelegramConfig {
                token: token.to_string(),
            },
            weather: WeatherConfig::default(),
        }
    }

    #[test]
    fn test_default_weather_config() {
        let weather = WeatherConfig::default();
        assert_eq!(
            weather.base_url,
            "http://api.openweathermap.org/data/2.5/weather"
        );
        assert!(weather.api_key.is_none());
    }

    #[test]
    fn test_missing_weather_api_key_is_valid() {
        // A missing key is a per-request condition, not a startup failure.
        let config = config_with_token("123456:valid-token");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_telegram_token_is_rejected() {
        let config = config_with_token("   ");
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("token"));
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let mut config = config_with_token("123456:valid-token");
        config.weather.api_key = Some(String::new());
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key"));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut config = config_with_token("123456:valid-token");
        config.weather.base_url = "ftp://example.org".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("base URL"));
    }
}
