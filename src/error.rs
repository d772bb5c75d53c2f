//! Error types and handling for the `pogoda-bot` application

use thiserror::Error;

/// Main error type for the `pogoda-bot` application.
///
/// The retrieval variants form a closed taxonomy: configuration missing,
/// transport failure, malformed response document, missing expected field.
/// All of them are non-fatal and render to a fixed chat sentence via
/// [`PogodaError::user_message`].
#[derive(Error, Debug)]
pub enum PogodaError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The OpenWeatherMap API key is not configured
    #[error("weather API key is not configured")]
    MissingApiKey,

    /// Transport-level failure: DNS, connection refused, timeout
    #[error("weather request failed: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// Provider response body is not a valid JSON document
    #[error("weather response is not valid JSON: {source}")]
    MalformedPayload {
        #[from]
        source: serde_json::Error,
    },

    /// Provider response has no usable `main` section or temperature
    #[error("weather response has no usable temperature")]
    MissingConditions,

    /// Provider response has no usable `weather` description
    #[error("weather response has no usable description")]
    MissingDescription,
}

impl PogodaError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get the user-facing sentence shown in chat in place of a forecast.
    ///
    /// Operators get the full error through logs; end users only ever see
    /// these fixed sentences.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            PogodaError::Config { .. } => "Ошибка конфигурации бота.",
            PogodaError::MissingApiKey => "Ошибка: API-ключ для OpenWeatherMap отсутствует.",
            PogodaError::Transport { .. } => "Не удалось получить данные о погоде.",
            PogodaError::MalformedPayload { .. } => "Ошибка обработки данных о погоде.",
            PogodaError::MissingConditions => "Не удалось найти информацию о погоде.",
            PogodaError::MissingDescription => "Не удалось найти описание погоды.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = PogodaError::config("missing token");
        assert!(matches!(config_err, PogodaError::Config { .. }));

        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let parse_err: PogodaError = json_err.into();
        assert!(matches!(parse_err, PogodaError::MalformedPayload { .. }));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            PogodaError::MissingApiKey.user_message(),
            "Ошибка: API-ключ для OpenWeatherMap отсутствует."
        );
        assert_eq!(
            PogodaError::MissingConditions.user_message(),
            "Не удалось найти информацию о погоде."
        );
        assert_eq!(
            PogodaError::MissingDescription.user_message(),
            "Не удалось найти описание погоды."
        );

        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let parse_err: PogodaError = json_err.into();
        assert_eq!(parse_err.user_message(), "Ошибка обработки данных о погоде.");
    }
}
