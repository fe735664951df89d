use std::sync::Arc;

use soiree_core::MessageRouter;
use soiree_schema::{ChatId, InboundMessage, OutboundMessage};
use teloxide::prelude::*;
use teloxide::types::{ChatAction, Message};

pub struct TelegramAdapter {
    connector_id: String,
}

impl TelegramAdapter {
    pub fn new(connector_id: impl Into<String>) -> Self {
        Self {
            connector_id: connector_id.into(),
        }
    }

    pub fn to_inbound(&self, chat_id: i64, text: &str) -> InboundMessage {
        InboundMessage::new(self.connector_id.clone(), ChatId(chat_id), text)
    }

    pub fn render_outbound(&self, outbound: &OutboundMessage) -> String {
        format!("[telegram:{}] {}", outbound.chat_id, outbound.text)
    }
}

pub struct TelegramBot {
    token: String,
    connector_id: String,
    router: Arc<MessageRouter>,
}

impl TelegramBot {
    pub fn new(token: String, connector_id: String, router: Arc<MessageRouter>) -> Self {
        Self {
            token,
            connector_id,
            router,
        }
    }

    pub async fn run_impl(self) -> anyhow::Result<()> {
        let bot = Bot::new(&self.token);
        let adapter = Arc::new(TelegramAdapter::new(&self.connector_id));
        let router = self.router;

        let handler = Update::filter_message().endpoint(move |bot: Bot, msg: Message| {
            let adapter = adapter.clone();
            let router = router.clone();

            async move {
                let text = match msg.text() {
                    Some(text) => text.to_string(),
                    None => return Ok::<(), teloxide::RequestError>(()),
                };

                let chat_id = msg.chat.id;
                let inbound = adapter.to_inbound(chat_id.0, &text);
                tracing::info!(
                    trace_id = %inbound.trace_id,
                    chat = %inbound.chat_id,
                    "received message"
                );

                let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;

                let bot_typing = bot.clone();
                tokio::spawn(async move {
                    // Keep the typing indicator alive while the completion
                    // is in flight.
                    let typing_handle = tokio::spawn({
                        let bot = bot_typing.clone();
                        async move {
                            loop {
                                tokio::time::sleep(std::time::Duration::from_secs(4)).await;
                                if bot
                                    .send_chat_action(chat_id, ChatAction::Typing)
                                    .await
                                    .is_err()
                                {
                                    break;
                                }
                            }
                        }
                    });

                    let result = router.handle_message(inbound.chat_id, &inbound.text).await;

                    typing_handle.abort();

                    match result {
                        Ok(reply) => {
                            let outbound = OutboundMessage::reply_to(&inbound, reply);
                            if let Err(err) = bot.send_message(chat_id, outbound.text).await {
                                tracing::error!("failed to send reply: {err}");
                            }
                        }
                        Err(err) => {
                            tracing::error!("router error: {err}");
                            if let Err(send_err) = bot
                                .send_message(chat_id, "Internal error, please try again later.")
                                .await
                            {
                                tracing::error!("failed to send error message: {send_err}");
                            }
                        }
                    }
                });

                Ok::<(), teloxide::RequestError>(())
            }
        });

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

#[async_trait::async_trait]
impl crate::ChannelBot for TelegramBot {
    fn channel_type(&self) -> &str {
        "telegram"
    }

    fn connector_id(&self) -> &str {
        &self.connector_id
    }

    async fn run(self: Box<Self>) -> anyhow::Result<()> {
        (*self).run_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_to_inbound_sets_fields() {
        let adapter = TelegramAdapter::new("tg_main");
        let msg = adapter.to_inbound(123, "hello");
        assert_eq!(msg.connector_id, "tg_main");
        assert_eq!(msg.chat_id, ChatId(123));
        assert_eq!(msg.text, "hello");
    }

    #[test]
    fn adapter_to_inbound_negative_chat_id() {
        let adapter = TelegramAdapter::new("tg");
        let msg = adapter.to_inbound(-100123, "group msg");
        assert_eq!(msg.chat_id, ChatId(-100123));
    }

    #[test]
    fn render_outbound_formats_correctly() {
        let adapter = TelegramAdapter::new("tg_main");
        let inbound = adapter.to_inbound(123, "hello");
        let outbound = OutboundMessage::reply_to(&inbound, "hello world");
        let rendered = adapter.render_outbound(&outbound);
        assert_eq!(rendered, "[telegram:chat:123] hello world");
    }
}
