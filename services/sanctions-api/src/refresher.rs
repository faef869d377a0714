use crate::errors::{ApiError, ApiResult};
use crate::fetcher::SourceFetcher;
use crate::metrics::{RECORDS_LOADED, REFRESHES_TOTAL};
use sanctions_core::DatasetStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Fetches the SDN export and installs it into the shared store.
pub struct Refresher {
    fetcher: SourceFetcher,
    store: Arc<DatasetStore>,
    // held across fetch and install
    in_flight: Mutex<()>,
}

impl Refresher {
    pub fn new(fetcher: SourceFetcher, store: Arc<DatasetStore>) -> Self {
        Self {
            fetcher,
            store,
            in_flight: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<DatasetStore> {
        &self.store
    }

    /// Returns the number of records now loaded. A failed download or parse
    /// leaves the current dataset untouched. Concurrent calls run one at a time.
    pub async fn refresh(&self) -> ApiResult<usize> {
        let _guard = self.in_flight.lock().await;
        let result = self.fetch_and_install().await;

        match &result {
            Ok(records) => {
                REFRESHES_TOTAL.with_label_values(&["success"]).inc();
                RECORDS_LOADED.set(*records as i64);
                info!("SDN list refreshed from {}: {} records", self.fetcher.source(), records);
            }
            Err(e) => {
                REFRESHES_TOTAL.with_label_values(&["failure"]).inc();
                error!("SDN list refresh from {} failed: {}", self.fetcher.source(), e);
            }
        }

        result
    }

    async fn fetch_and_install(&self) -> ApiResult<usize> {
        let document = self.fetcher.fetch().await?;

        // Extraction of the full list is CPU bound; keep it off the reactor.
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.refresh_from_bytes(&document))
            .await
            .map_err(|e| ApiError::InternalError(format!("refresh task failed: {}", e)))?
            .map_err(ApiError::from)
    }

    /// Refresh every `interval`, starting one interval from now.
    pub fn spawn_periodic(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("Scheduled SDN refresh every {:?}", interval);
            let mut ticker = tokio::time::interval(interval);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let _ = self.refresh().await;
            }
        })
    }
}
