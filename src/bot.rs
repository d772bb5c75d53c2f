//! Telegram platform layer: long polling, the city keyboard, outbound send.
//!
//! Thin setup code around [`Dispatcher`]. Updates are processed strictly in
//! arrival order, one at a time; the weather lookup blocks the loop for its
//! duration.

use std::time::Duration;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{AllowedUpdate, ChatId, KeyboardButton, KeyboardMarkup, Message, UpdateKind};
use tracing::{debug, info, warn};

use crate::cities::CITIES;
use crate::config::BotConfig;
use crate::dispatch::{Dispatcher, Inbound, Reply};
use crate::weather::WeatherClient;

/// Long-poll timeout in seconds.
const POLL_TIMEOUT_SECS: u32 = 30;
/// Back-off after a failed getUpdates call.
const POLL_RETRY: Duration = Duration::from_secs(5);

/// Run the bot until the process is terminated.
pub async fn run(config: BotConfig) -> Result<()> {
    let bot = Bot::new(config.telegram.token.clone());

    // Verify credentials before entering the polling loop.
    let me = bot.get_me().await?;
    info!(username = ?me.username, "telegram bot connected");

    let dispatcher = Dispatcher::new(WeatherClient::new(config.weather));

    let mut offset: i32 = 0;
    loop {
        let updates = match bot
            .get_updates()
            .offset(offset)
            .timeout(POLL_TIMEOUT_SECS)
            .allowed_updates(vec![AllowedUpdate::Message])
            .await
        {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "telegram getUpdates failed");
                tokio::time::sleep(POLL_RETRY).await;
                continue;
            }
        };

        for update in updates {
            offset = update.id.as_offset();
            let UpdateKind::Message(msg) = update.kind else {
                continue;
            };
            if let Some(reply) = dispatcher.handle(&to_inbound(&msg)).await {
                send_reply(&bot, &reply).await;
            }
        }
    }
}

fn to_inbound(msg: &Message) -> Inbound {
    Inbound {
        chat_id: msg.chat.id.0,
        sender: msg.from.as_ref().and_then(|user| user.username.clone()),
        text: msg.text().map(str::to_owned),
    }
}

/// One button per city, in table order.
fn city_keyboard() -> KeyboardMarkup {
    let row: Vec<KeyboardButton> = CITIES
        .iter()
        .map(|city| KeyboardButton::new(city.display_name))
        .collect();
    KeyboardMarkup::new(vec![row]).resize_keyboard()
}

/// Fire-and-forget send: delivery failures are logged, never fatal to the
/// polling loop.
async fn send_reply(bot: &Bot, reply: &Reply) {
    let chat_id = ChatId(reply.chat_id);
    let request = bot.send_message(chat_id, reply.text.as_str());
    let result = if reply.offer_city_menu {
        request.reply_markup(city_keyboard()).await
    } else {
        request.await
    };
    match result {
        Ok(_) => debug!(chat_id = reply.chat_id, "reply sent"),
        Err(e) => warn!(chat_id = reply.chat_id, error = %e, "failed to send reply"),
    }
}
