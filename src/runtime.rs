//! Runtime services and shared state for the timeat-bot.

use tracing::instrument;

use crate::{
    base::config::Config,
    interaction::command::CommandRegistry,
    service::{catalog::TimezoneCatalog, chat::ChatClient, store::CounterStore, timezone::TimezoneApi},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the chat client, counter store, timezone service, the
/// timezone catalog cache, and the command registry.  It is designed to be
/// trivially cloneable, allowing one clone per webhook dispatch without the
/// need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The chat client instance.
    pub chat: ChatClient,
    /// The counter store instance.
    pub store: CounterStore,
    /// The timezone service instance.
    pub tz: TimezoneApi,
    /// The process-wide timezone catalog cache.
    pub catalog: TimezoneCatalog,
    /// The slash-command registry.
    pub commands: CommandRegistry,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Self {
        // Initialize the chat client.
        let chat = ChatClient::telegram(&config);

        // Initialize the counter store.
        let store = CounterStore::kvdb(&config);

        // Initialize the timezone service client and its catalog cache.
        let tz = TimezoneApi::http(&config);
        let catalog = TimezoneCatalog::new();

        // The default command set.
        let commands = CommandRegistry::default();

        Self { config, chat, store, tz, catalog, commands }
    }
}
