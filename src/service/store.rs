//! Wrapper around the hosted key-value bucket used for usage counters.

use crate::base::{
    config::Config,
    types::{Res, Void},
};
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, instrument};

use std::{ops::Deref, sync::Arc};

// Types.

/// Outcome of a counter-store read.
///
/// A missing key is a normal outcome, not an error; the distinction matters so
/// that callers can *choose* to collapse both into "zero" (which the counter
/// aggregator does) without losing it at the seam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRead {
    Value(String),
    NotFound,
}

// Traits.

/// Generic counter-store trait that clients must implement.
///
/// Keys and values are opaque strings; the store does no interpretation.
#[async_trait]
pub trait GenericCounterStore {
    /// Get the value for a key.
    async fn get(&self, key: &str) -> Res<StoreRead>;
    /// Set the value for a key.
    async fn set(&self, key: &str, value: &str) -> Void;
    /// List all key/value pairs whose key starts with `prefix`.
    async fn list(&self, prefix: &str) -> Res<Vec<(String, String)>>;
}

// Structs.

/// Counter store for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct CounterStore {
    inner: Arc<dyn GenericCounterStore + Send + Sync + 'static>,
}

impl Deref for CounterStore {
    type Target = dyn GenericCounterStore + Send + Sync + 'static;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl CounterStore {
    /// Creates a counter store from any trait implementation (used by tests).
    pub fn new(inner: Arc<dyn GenericCounterStore + Send + Sync + 'static>) -> Self {
        Self { inner }
    }

    /// Creates a new kvdb.io-backed counter store.
    pub fn kvdb(config: &Config) -> Self {
        let client = KvdbCounterStore::new(config);
        Self { inner: Arc::new(client) }
    }

    /// Increment the counter for a key.
    ///
    /// A missing key, a malformed value, and a failed read all count as zero.
    /// The read-modify-write is not atomic; concurrent increments on the same
    /// key can lose updates under the store's isolation model.
    #[instrument(skip(self))]
    pub async fn increment(&self, key: &str) -> Void {
        let current = match self.get(key).await {
            Ok(StoreRead::Value(value)) => value.trim().parse::<u64>().unwrap_or(0),
            Ok(StoreRead::NotFound) => 0,
            Err(err) => {
                debug!("Treating failed counter read for `{}` as zero: {}", key, err);
                0
            }
        };

        self.set(key, &(current + 1).to_string()).await
    }

    /// Sum all counters whose key starts with `prefix`.
    ///
    /// Non-numeric values contribute zero; an empty or non-matching listing
    /// sums to zero rather than erroring.
    #[instrument(skip(self))]
    pub async fn sum_by_prefix(&self, prefix: &str) -> Res<u64> {
        let pairs = self.list(prefix).await?;

        Ok(pairs.iter().map(|(_, value)| value.trim().parse::<u64>().unwrap_or(0)).sum())
    }
}

// Specific implementations.

/// kvdb.io bucket implementation.
///
/// The bucket API is plain HTTP: `GET`/`PUT` on `<base>/<bucket>/<key>`, and a
/// prefix listing on the bucket root with `values=true`.
#[derive(Clone)]
pub struct KvdbCounterStore {
    client: reqwest::Client,
    bucket_url: String,
}

impl KvdbCounterStore {
    pub fn new(config: &Config) -> Self {
        let bucket_url = format!("{}/{}", config.kvdb_api_base, config.kvdb_bucket_id);

        Self {
            client: reqwest::Client::new(),
            bucket_url,
        }
    }

    fn key_url(&self, key: &str) -> String {
        format!("{}/{}", self.bucket_url, key)
    }
}

#[async_trait]
impl GenericCounterStore for KvdbCounterStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Res<StoreRead> {
        let response = self.client.get(self.key_url(key)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(StoreRead::NotFound);
        }

        let value = response.error_for_status()?.text().await?;

        Ok(StoreRead::Value(value))
    }

    #[instrument(skip(self))]
    async fn set(&self, key: &str, value: &str) -> Void {
        let response = self.client.put(self.key_url(key)).body(value.to_string()).send().await?;

        response.error_for_status().map_err(|e| anyhow::anyhow!("Failed to set counter: {}", e))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self, prefix: &str) -> Res<Vec<(String, String)>> {
        let response = self
            .client
            .get(format!("{}/", self.bucket_url))
            .query(&[("prefix", prefix), ("values", "true"), ("format", "json")])
            .send()
            .await?;

        let pairs: Vec<(String, String)> = response.error_for_status()?.json().await?;

        Ok(pairs)
    }
}
