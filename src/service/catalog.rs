//! Process-wide cache of the canonical timezone list.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, instrument};

use crate::base::types::Res;

use super::timezone::TimezoneApi;

/// Lazily-filled cache of the canonical timezone names.
///
/// Constructed empty at process start and filled on first use.  The fill is
/// single-flight: concurrent first uses coalesce into one upstream fetch.  A
/// failed fetch leaves the cache empty, so the next dispatch retries; once
/// filled, the list is immutable for the process lifetime.
#[derive(Clone, Default)]
pub struct TimezoneCatalog {
    cell: Arc<OnceCell<Vec<String>>>,
}

impl TimezoneCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached timezone list, fetching it from the service on first use.
    #[instrument(skip_all)]
    pub async fn get(&self, api: &TimezoneApi) -> Res<&[String]> {
        let timezones = self
            .cell
            .get_or_try_init(|| async {
                let timezones = api.list_timezones().await?;

                if timezones.is_empty() {
                    return Err(anyhow::anyhow!("Timezone service returned an empty catalog."));
                }

                info!("Cached {} timezones.", timezones.len());

                Ok(timezones)
            })
            .await?;

        Ok(timezones)
    }
}
