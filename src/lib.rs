//! Library root for `timeat-bot`.
//!
//! Timeat-bot is a Telegram bot for timezone lookups, designed to:
//! - Answer `/timeat <timezone>` with the current wall-clock time there
//! - Answer `/timepopularity <timezone>` with how often it has been looked up
//! - Resolve free-text timezone arguments fuzzily against the canonical list
//!
//! The bot integrates with Telegram for chat, a kvdb.io-style bucket for
//! usage counters, and a WorldTimeAPI-compatible service for timezone data.
//! The architecture is built around extensible traits that allow for
//! different implementations of each service.

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod server;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the timeat-bot runtime:
/// - Creates the runtime context with chat, counter-store, and timezone clients
/// - Serves the webhook endpoint for inbound messages
pub async fn start(config: Config) -> Void {
    info!("Starting timeat-bot ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config);

    // Serve the webhook.
    server::serve(runtime).await
}
