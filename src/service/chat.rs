//! Wrapper around chat clients.

use crate::base::{config::Config, types::Void};
use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;

use std::{ops::Deref, sync::Arc};

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// The core treats replies as fire-and-forget: a failed send is an error for
/// the calling task to log, never something it retries.
#[async_trait]
pub trait GenericChatClient {
    /// Send a message to a chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient + Send + Sync + 'static>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient + Send + Sync + 'static;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    /// Creates a chat client from any trait implementation (used by tests).
    pub fn new(inner: Arc<dyn GenericChatClient + Send + Sync + 'static>) -> Self {
        Self { inner }
    }

    /// Creates a new Telegram chat client.
    pub fn telegram(config: &Config) -> Self {
        let client = TelegramChatClient::new(config);
        Self { inner: Arc::new(client) }
    }
}

// Specific implementations.

/// Telegram Bot API client implementation.
///
/// Speaks the plain HTTP Bot API (`/bot<token>/sendMessage`) rather than a
/// long-polling framework, since the bot receives updates over a webhook.
#[derive(Clone)]
pub struct TelegramChatClient {
    client: reqwest::Client,
    send_message_url: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

impl TelegramChatClient {
    pub fn new(config: &Config) -> Self {
        let send_message_url = format!("{}/bot{}/sendMessage", config.telegram_api_base, config.telegram_bot_token);

        Self {
            client: reqwest::Client::new(),
            send_message_url,
        }
    }
}

#[async_trait]
impl GenericChatClient for TelegramChatClient {
    #[instrument(skip(self, text))]
    async fn send_message(&self, chat_id: i64, text: &str) -> Void {
        let response = self.client.post(&self.send_message_url).json(&SendMessageRequest { chat_id, text }).send().await?;

        response.error_for_status().map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }
}
