//! Parsing and dispatch of slash-commands from inbound messages.

use std::collections::HashMap;

use tracing::Instrument;

use crate::{base::types::Message, prelude::*, runtime::Runtime};

use super::handler;

/// The closed set of commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TimeAt,
    TimePopularity,
}

/// Mapping from slash-command triggers to commands.
///
/// The registry is constructed once and read-only thereafter.  It is a
/// `Runtime` field rather than a constant so tests can inject alternate
/// command sets.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    entries: HashMap<String, Command>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new([("/timeat", Command::TimeAt), ("/timepopularity", Command::TimePopularity)])
    }
}

impl CommandRegistry {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, Command)>) -> Self {
        Self {
            entries: entries.into_iter().map(|(trigger, command)| (trigger.to_string(), command)).collect(),
        }
    }

    pub fn get(&self, trigger: &str) -> Option<Command> {
        self.entries.get(trigger).copied()
    }
}

/// Handles an inbound message on its own task.
///
/// Errors from the dispatch are logged here; nothing propagates back to the
/// webhook transport, which has already acknowledged the delivery.
#[instrument(skip_all)]
pub fn dispatch_message(message: Message, runtime: Runtime) {
    tokio::spawn(async move {
        // Process the message.
        let result = handle_message(message, &runtime).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling: {}", err);
        }
    });
}

/// Parse a message into (trigger, argument) and dispatch to its handler.
///
/// Sends exactly zero or one reply per inbound message.  Non-command text,
/// absent text, and unrecognized triggers are ignored silently; the timezone
/// catalog is only consulted once a registered command with an argument has
/// been recognized.
#[instrument(skip_all)]
pub async fn handle_message(message: Message, runtime: &Runtime) -> Void {
    let Some(text) = message.text.as_deref() else {
        return Ok(());
    };

    if !text.starts_with('/') {
        return Ok(());
    }

    // Split on the first whitespace run: trigger, then the trimmed remainder.
    let (trigger, argument) = match text.split_once(char::is_whitespace) {
        Some((trigger, rest)) => (trigger, rest.trim()),
        None => (text, ""),
    };

    let Some(command) = runtime.commands.get(trigger) else {
        return Ok(());
    };

    let chat_id = message.chat.id;
    let username = message.sender_username();

    if argument.is_empty() {
        runtime.chat.send_message(chat_id, &format!("@{username}: you need to specify a timezone")).await?;

        return Ok(());
    }

    let timezones = match runtime.catalog.get(&runtime.tz).await {
        Ok(timezones) => timezones,
        Err(err) => {
            warn!("Failed to fetch the timezone catalog: {}", err);

            runtime
                .chat
                .send_message(chat_id, &format!("@{username}: timezones service is currently unavailable, please try again later"))
                .await?;

            return Ok(());
        }
    };

    match command {
        Command::TimeAt => handler::time_at(runtime, argument, chat_id, username, timezones).await,
        Command::TimePopularity => handler::time_popularity(runtime, argument, chat_id, username, timezones).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_exactly_the_two_commands() {
        let registry = CommandRegistry::default();

        assert_eq!(registry.get("/timeat"), Some(Command::TimeAt));
        assert_eq!(registry.get("/timepopularity"), Some(Command::TimePopularity));
        assert_eq!(registry.get("/unknown"), None);
        assert_eq!(registry.entries.len(), 2);
    }
}
