//! Weather retrieval against the OpenWeatherMap current-weather endpoint.
//!
//! Retrieval returns a discriminated [`Result`]; only [`render_summary`] and
//! the dispatcher's error rendering collapse it into display text, so callers
//! can branch on the error kind instead of matching substrings.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::config::WeatherConfig;
use crate::error::PogodaError;

/// Unit system sent to the provider. Fixed: temperatures are Celsius.
const UNITS: &str = "metric";
/// Response language sent to the provider. Fixed: descriptions are Russian.
const LANG: &str = "ru";

/// One observation extracted from a provider response. Lives only for the
/// duration of a single retrieval; never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// Human-readable description of current conditions
    pub description: String,
    /// Temperature in Celsius
    pub temp_celsius: f64,
}

/// Seam between the dispatcher and the actual HTTP lookup.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch the current weather for a canonical city name.
    async fn current(&self, city: &str) -> Result<WeatherReport, PogodaError>;
}

/// OpenWeatherMap client. One synchronous-in-order attempt per lookup:
/// no retries, default transport timeouts.
pub struct WeatherClient {
    http: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherClient {
    #[must_use]
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn request_url(&self, city: &str, api_key: &str) -> String {
        format!(
            "{}?q={}&appid={}&units={}&lang={}",
            self.config.base_url,
            urlencoding::encode(city),
            api_key,
            UNITS,
            LANG,
        )
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current(&self, city: &str) -> Result<WeatherReport, PogodaError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            warn!("OpenWeatherMap API key is not configured, skipping lookup");
            return Err(PogodaError::MissingApiKey);
        };

        let url = self.request_url(city, api_key);
        debug!(city, "requesting current weather");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(city, status = %status, bytes = body.len(), "weather response received");

        extract_report(&body)
    }
}

/// Parse a provider response body and extract the fields the bot needs.
///
/// The schema is not trusted. A non-2xx response carries a JSON error
/// document without a `main` section, so it falls out as
/// [`PogodaError::MissingConditions`], the same as a 200 with a gutted
/// payload.
fn extract_report(body: &str) -> Result<WeatherReport, PogodaError> {
    let response: ProviderResponse = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "weather response is not valid JSON");
        PogodaError::from(e)
    })?;

    let Some(temp_celsius) = response.main.and_then(|main| main.temp) else {
        warn!(body, "weather response is missing temperature data");
        return Err(PogodaError::MissingConditions);
    };

    let description = response
        .weather
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|condition| condition.description);
    let Some(description) = description else {
        warn!(body, "weather response is missing a description");
        return Err(PogodaError::MissingDescription);
    };

    Ok(WeatherReport {
        description,
        temp_celsius,
    })
}

/// Render a report as the chat-facing sentence, temperature to one decimal.
#[must_use]
pub fn render_summary(city: &str, report: &WeatherReport) -> String {
    format!(
        "Погода в городе {}: {}, {:.1}°C",
        city, report.description, report.temp_celsius
    )
}

/// Deserialize a field leniently: a type mismatch becomes `None` instead of
/// failing the whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Current-weather response from OpenWeatherMap. Every field the bot reads
/// is optional; absence and mismatch are folded into the error taxonomy by
/// [`extract_report`].
#[derive(Debug, Deserialize)]
struct ProviderResponse {
    #[serde(default, deserialize_with = "lenient")]
    main: Option<MainSection>,
    #[serde(default, deserialize_with = "lenient")]
    weather: Option<Vec<ConditionEntry>>,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    #[serde(default, deserialize_with = "lenient")]
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
}
