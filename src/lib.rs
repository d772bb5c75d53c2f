//! `pogoda-bot` - Telegram weather bot for a fixed set of cities.
//!
//! This library provides the message dispatch loop and the weather-retrieval
//! pipeline: deciding what (if anything) an inbound message triggers, fetching
//! current weather from OpenWeatherMap, and composing the chat reply,
//! including the degradation path when the provider call or its payload is
//! malformed.

pub mod bot;
pub mod cities;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod weather;

// Re-export core types for public API
pub use cities::City;
pub use config::{BotConfig, WeatherConfig};
pub use dispatch::{Action, Dispatcher, Inbound, Reply};
pub use error::PogodaError;
pub use weather::{WeatherClient, WeatherProvider, WeatherReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PogodaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
