//! Core components, types, and utilities for the timeat-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Common types and result handling.

pub mod config;
pub mod types;
