//! GBFS HTTP client.
//!
//! Fetches the station information and station status feeds. The two feeds
//! are independent documents; [`GbfsClient::fetch_snapshot`] requests both
//! concurrently and only succeeds if both do.

use futures::future::try_join;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{StationInfo, StationStatus};

use super::convert::{FeedSnapshot, convert_information_feed, convert_snapshot, convert_status_feed};
use super::error::GbfsError;
use super::types::{GbfsResponse, StationInformationDto, StationStatusDto};

/// Default GBFS base URL (Citi Bike NYC, English feeds).
pub const DEFAULT_BASE_URL: &str = "https://gbfs.citibikenyc.com/gbfs/en";

/// Name of the station metadata feed.
pub(crate) const STATION_INFORMATION: &str = "station_information";

/// Name of the live station status feed.
pub(crate) const STATION_STATUS: &str = "station_status";

/// Configuration for the GBFS client.
#[derive(Debug, Clone)]
pub struct GbfsConfig {
    /// Base URL the feed file names are appended to
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GbfsConfig {
    /// Create a config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GbfsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for a provider's GBFS station feeds.
#[derive(Debug, Clone)]
pub struct GbfsClient {
    http: reqwest::Client,
    base_url: String,
}

impl GbfsClient {
    /// Create a new GBFS client.
    pub fn new(config: GbfsConfig) -> Result<Self, GbfsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of a named feed.
    fn feed_url(&self, feed: &str) -> String {
        format!("{}/{}.json", self.base_url, feed)
    }

    /// Fetch and convert the station information feed.
    pub async fn fetch_station_information(&self) -> Result<Vec<StationInfo>, GbfsError> {
        let response = self.fetch_information_feed().await?;
        Ok(convert_information_feed(&response))
    }

    /// Fetch and convert the station status feed.
    pub async fn fetch_station_status(&self) -> Result<Vec<StationStatus>, GbfsError> {
        let response = self.fetch_status_feed().await?;
        Ok(convert_status_feed(&response))
    }

    /// Fetch both feeds concurrently.
    ///
    /// Fails if either request fails; no partial snapshot is returned.
    pub async fn fetch_snapshot(&self) -> Result<FeedSnapshot, GbfsError> {
        let (information, status) =
            try_join(self.fetch_information_feed(), self.fetch_status_feed()).await?;
        Ok(convert_snapshot(&information, &status))
    }

    async fn fetch_information_feed(
        &self,
    ) -> Result<GbfsResponse<StationInformationDto>, GbfsError> {
        self.get_feed(STATION_INFORMATION).await
    }

    async fn fetch_status_feed(&self) -> Result<GbfsResponse<StationStatusDto>, GbfsError> {
        self.get_feed(STATION_STATUS).await
    }

    async fn get_feed<T: DeserializeOwned>(
        &self,
        feed: &'static str,
    ) -> Result<GbfsResponse<T>, GbfsError> {
        let url = self.feed_url(feed);
        debug!(%url, "fetching feed");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GbfsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: GbfsResponse<T> =
            serde_json::from_str(&body).map_err(|e| GbfsError::Json {
                feed,
                message: e.to_string(),
            })?;

        debug!(feed, stations = parsed.data.stations.len(), "fetched feed");
        Ok(parsed)
    }
}
