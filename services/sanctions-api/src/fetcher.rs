// Retrieves the raw SDN XML export, over HTTP or from a local file

use crate::config::SourceConfig;
use crate::errors::{ApiError, ApiResult};
use reqwest::Client;
use std::time::Duration;
use tracing::info;

pub struct SourceFetcher {
    config: SourceConfig,
    http_client: Client,
}

impl SourceFetcher {
    pub fn new(config: SourceConfig) -> ApiResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ApiError::ConfigurationError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Where the list is read from, for logs and responses.
    pub fn source(&self) -> &str {
        self.config
            .local_path
            .as_deref()
            .unwrap_or(&self.config.url)
    }

    pub async fn fetch(&self) -> ApiResult<Vec<u8>> {
        match &self.config.local_path {
            Some(path) => self.read_local(path).await,
            None => self.download().await,
        }
    }

    async fn read_local(&self, path: &str) -> ApiResult<Vec<u8>> {
        info!("Reading SDN list from {}", path);
        tokio::fs::read(path).await.map_err(|e| {
            ApiError::ExternalServiceError(format!("Failed to read {}: {}", path, e))
        })
    }

    async fn download(&self) -> ApiResult<Vec<u8>> {
        info!("Downloading SDN list from {}", self.config.url);

        let response = self
            .http_client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| ApiError::ExternalServiceError(format!("SDN download failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::ExternalServiceError(format!(
                "SDN download returned status {}",
                status
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            ApiError::ExternalServiceError(format!("SDN download interrupted: {}", e))
        })?;

        info!("Downloaded {} bytes of SDN XML", body.len());
        Ok(body.to_vec())
    }
}
