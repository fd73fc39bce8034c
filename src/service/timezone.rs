//! Wrapper around the remote timezone service.

use crate::base::{
    config::Config,
    types::{Res, TimeLookupResult},
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use std::{ops::Deref, sync::Arc};

// Traits.

/// Generic timezone-service trait that clients must implement.
///
/// All timezone arithmetic (DST, offsets) lives behind this seam; the core
/// only ever sees canonical names and fully-formed lookup results.
#[async_trait]
pub trait GenericTimezoneApi {
    /// Fetch the canonical list of timezone names.
    async fn list_timezones(&self) -> Res<Vec<String>>;
    /// Look up the current time in a single timezone.
    async fn time_at(&self, timezone: &str) -> Res<TimeLookupResult>;
}

// Structs.

/// Timezone service client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct TimezoneApi {
    inner: Arc<dyn GenericTimezoneApi + Send + Sync + 'static>,
}

impl Deref for TimezoneApi {
    type Target = dyn GenericTimezoneApi + Send + Sync + 'static;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl TimezoneApi {
    /// Creates a timezone API from any trait implementation (used by tests).
    pub fn new(inner: Arc<dyn GenericTimezoneApi + Send + Sync + 'static>) -> Self {
        Self { inner }
    }

    /// Creates a new HTTP timezone service client.
    pub fn http(config: &Config) -> Self {
        let client = HttpTimezoneApi::new(config);
        Self { inner: Arc::new(client) }
    }
}

// Specific implementations.

/// WorldTimeAPI-compatible HTTP client implementation.
#[derive(Clone)]
pub struct HttpTimezoneApi {
    client: reqwest::Client,
    base_url: String,
}

/// Error body some upstream failures carry instead of a payload.
#[derive(Deserialize)]
struct ApiError {
    error: String,
}

impl HttpTimezoneApi {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.timezone_api_base.clone(),
        }
    }

    /// Issue a GET and deserialize the JSON body, folding non-2xx responses
    /// (including upstream `{"error": ...}` bodies) into a single failure.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Res<T> {
        let response = self.client.get(format!("{}/{}", self.base_url, path)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = match response.json::<ApiError>().await {
                Ok(body) => body.error,
                Err(_) => format!("HTTP status code: {}", status.as_u16()),
            };

            return Err(anyhow::anyhow!("Timezone service request failed: {}", message));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl GenericTimezoneApi for HttpTimezoneApi {
    #[instrument(skip(self))]
    async fn list_timezones(&self) -> Res<Vec<String>> {
        self.get_json("timezone").await
    }

    #[instrument(skip(self))]
    async fn time_at(&self, timezone: &str) -> Res<TimeLookupResult> {
        self.get_json(&format!("timezone/{}", timezone)).await
    }
}
