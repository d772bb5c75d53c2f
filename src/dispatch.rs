//! Message-to-action dispatch.
//!
//! Turns one inbound message into zero or one replies. Unrecognized text is
//! ignored without a reply; a failed weather lookup still produces a reply
//! whose body is the failure sentence. There is intentionally no user-visible
//! distinction between a typo (silence) and a lookup failure (sentence).

use tracing::{debug, warn};

use crate::cities::{self, City};
use crate::weather::{self, WeatherProvider};

/// Reserved command that produces the greeting and the city menu.
pub const START_COMMAND: &str = "/start";

/// Greeting sent in response to the start command.
pub const GREETING: &str = "Выберите город для получения погоды:";

/// Core-side view of a platform message. Read-only.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub chat_id: i64,
    pub sender: Option<String>,
    pub text: Option<String>,
}

/// Outbound reply handed to the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub chat_id: i64,
    pub text: String,
    /// Attach the city-selection keyboard to this reply.
    pub offer_city_menu: bool,
}

/// Decision for one message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// `/start`: greet and show the city menu
    Greet,
    /// Exact match on a configured city: fetch its weather
    Forecast(&'a City),
    /// Anything else: no reply
    Ignore,
}

/// Classify message text. Exact match only: case differences, stray
/// whitespace, and partial names all fall through to [`Action::Ignore`].
#[must_use]
pub fn classify(text: &str) -> Action<'static> {
    if text == START_COMMAND {
        return Action::Greet;
    }
    match cities::find(text) {
        Some(city) => Action::Forecast(city),
        None => Action::Ignore,
    }
}

/// Sequential message handler: one inbound message in, zero or one replies
/// out. Processing of one message finishes before the next is considered.
pub struct Dispatcher<P> {
    provider: P,
}

impl<P: WeatherProvider> Dispatcher<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Handle one message. Returns `None` when the message should be
    /// silently ignored.
    pub async fn handle(&self, inbound: &Inbound) -> Option<Reply> {
        let text = inbound.text.as_deref()?;

        debug!(
            chat_id = inbound.chat_id,
            sender = inbound.sender.as_deref().unwrap_or("-"),
            text,
            "inbound message"
        );

        match classify(text) {
            Action::Greet => Some(Reply {
                chat_id: inbound.chat_id,
                text: GREETING.to_string(),
                offer_city_menu: true,
            }),
            Action::Forecast(city) => {
                let summary = match self.provider.current(city.query_name).await {
                    Ok(report) => weather::render_summary(city.query_name, &report),
                    Err(e) => {
                        // The failure sentence is the reply body; a bad
                        // lookup never suppresses the reply.
                        warn!(city = city.query_name, error = %e, "weather lookup failed");
                        e.user_message().to_string()
                    }
                };
                Some(Reply {
                    chat_id: inbound.chat_id,
                    text: format!("{}\n\n{}", summary, city.remark),
                    offer_city_menu: false,
                })
            }
            Action::Ignore => {
                debug!(chat_id = inbound.chat_id, "no matching action, ignoring");
                None
            }
        }
    }
}
