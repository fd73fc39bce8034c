//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default Telegram Bot API base URL.
fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

/// Default timezone service base URL (WorldTimeAPI-compatible).
fn default_timezone_api_base() -> String {
    "https://worldtimeapi.org/api".to_string()
}

/// Default kvdb.io-compatible counter bucket base URL.
fn default_kvdb_api_base() -> String {
    "https://kvdb.io".to_string()
}

/// Default webhook listen address.
fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

/// Configuration for the timeat-bot application.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// The shared configuration values.
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// The configuration values, overridable from the environment.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Telegram bot token (`TELEGRAM_BOT_TOKEN`).
    pub telegram_bot_token: String,
    /// Telegram Bot API base URL (`TELEGRAM_API_BASE`).
    #[serde(default = "default_telegram_api_base")]
    pub telegram_api_base: String,
    /// Timezone service base URL (`TIMEZONE_API_BASE`).
    #[serde(default = "default_timezone_api_base")]
    pub timezone_api_base: String,
    /// Counter bucket base URL (`KVDB_API_BASE`).
    #[serde(default = "default_kvdb_api_base")]
    pub kvdb_api_base: String,
    /// Counter bucket ID (`KVDB_BUCKET_ID`).
    pub kvdb_bucket_id: String,
    /// Socket address the webhook server binds to (`LISTEN_ADDR`).
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Config {
    /// Load configuration from the environment and an optional TOML file.
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("TIMEAT_BOT"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.telegram_bot_token.is_empty() {
            return Err(anyhow::anyhow!("Telegram bot token must be provided."));
        }

        if result.kvdb_bucket_id.is_empty() {
            return Err(anyhow::anyhow!("Counter bucket ID must be provided."));
        }

        if result.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(anyhow::anyhow!("Listen address `{}` is not a valid socket address.", result.listen_addr));
        }

        Ok(result)
    }
}
