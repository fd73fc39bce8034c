//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for various services used by the timeat-bot:
//! - Chat services (e.g., Telegram)
//! - Counter stores (e.g., kvdb.io buckets)
//! - Timezone services (e.g., WorldTimeAPI)
//!
//! Each service module defines both generic traits and concrete implementations,
//! allowing for extensibility and easy testing.

pub mod catalog;
pub mod chat;
pub mod store;
pub mod timezone;
