//! Webhook transport for inbound Telegram updates.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{
    base::types::{Message, Void},
    interaction::command,
    runtime::Runtime,
};

/// A Telegram-style update delivered to the webhook.
///
/// Only the `message` payload is of interest; everything else (edited
/// messages, channel posts, ...) is acknowledged and dropped.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub message: Option<Message>,
}

/// Serve the webhook endpoint until shutdown.
pub async fn serve(runtime: Runtime) -> Void {
    let addr: std::net::SocketAddr = runtime.config.listen_addr.parse()?;

    let app = Router::new().route("/webhook", post(webhook)).with_state(runtime);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Webhook server listening on {}.", addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Accepts a webhook delivery.
///
/// The provider is always acknowledged with `OK`, even when processing fails:
/// the dispatch runs on its own task and logs its own errors.  Deliveries
/// without a `message` payload are acknowledged without invoking the core.
#[instrument(skip_all)]
async fn webhook(State(runtime): State<Runtime>, Json(update): Json<Update>) -> &'static str {
    if let Some(message) = update.message {
        command::dispatch_message(message, runtime);
    }

    "OK"
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;

    info!("Shutdown signal received.");
}
