//! Command handling and user interactions for timeat-bot.
//!
//! This module provides functionality for handling inbound chat messages:
//! - Parsing message text into commands and dispatching them
//! - Resolving free-text timezone arguments against the catalog
//! - Coordinating responses between services (timezone API, counter store, chat)

pub mod command;
pub mod handler;
pub mod resolve;
