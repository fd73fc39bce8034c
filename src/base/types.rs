//! Common types and result handling for the timeat-bot.

use serde::{Deserialize, Serialize};

/// The error type used throughout the application.
pub type Err = anyhow::Error;
/// The result type used throughout the application.
pub type Res<T> = Result<T, Err>;
/// A result carrying no value.
pub type Void = Res<()>;

/// An inbound chat message, as delivered by the webhook.
///
/// Telegram makes both `text` and `from` optional (e.g. photo messages,
/// channel posts), so the core has to tolerate their absence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The message text, absent for non-text messages.
    pub text: Option<String>,
    /// The chat the message arrived in.
    pub chat: Chat,
    /// The sender, absent for e.g. channel posts.
    pub from: Option<User>,
}

/// The chat a message arrived in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    /// The chat identifier replies are addressed to.
    pub id: i64,
}

/// The sender of a message.  `username` is optional on Telegram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// The sender's public username, if they have one.
    pub username: Option<String>,
}

/// Result of a remote time lookup for a single timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeLookupResult {
    /// The canonical timezone name (e.g. `America/Bogota`).
    pub timezone: String,
    /// The short timezone code (e.g. `GMT`).
    pub abbreviation: String,
    /// The current wall-clock time there, as an ISO-8601 string.
    pub datetime: String,
}

impl Message {
    /// The sender's username, or a placeholder when Telegram omits it.
    pub fn sender_username(&self) -> &str {
        self.from.as_ref().and_then(|u| u.username.as_deref()).unwrap_or("unknown")
    }
}
