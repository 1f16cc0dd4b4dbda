//! Mock GBFS client for running without network access.
//!
//! Loads `station_information.json` and `station_status.json` from a
//! directory and serves them as if they were live feeds.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::{StationInfo, StationStatus};

use super::client::{STATION_INFORMATION, STATION_STATUS};
use super::convert::{FeedSnapshot, convert_information_feed, convert_snapshot, convert_status_feed};
use super::error::GbfsError;
use super::types::{GbfsResponse, StationInformationDto, StationStatusDto};

/// Mock GBFS client that serves feeds from JSON files.
#[derive(Debug, Clone)]
pub struct MockGbfsClient {
    information: Arc<GbfsResponse<StationInformationDto>>,
    status: Arc<GbfsResponse<StationStatusDto>>,
}

impl MockGbfsClient {
    /// Create a mock client by loading both feed files from `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, GbfsError> {
        let data_dir = data_dir.as_ref();

        let information = load_feed(data_dir, STATION_INFORMATION)?;
        let status = load_feed(data_dir, STATION_STATUS)?;

        Ok(Self {
            information: Arc::new(information),
            status: Arc::new(status),
        })
    }

    /// Mimics [`GbfsClient::fetch_station_information`](super::GbfsClient::fetch_station_information).
    pub async fn fetch_station_information(&self) -> Result<Vec<StationInfo>, GbfsError> {
        Ok(convert_information_feed(&self.information))
    }

    /// Mimics [`GbfsClient::fetch_station_status`](super::GbfsClient::fetch_station_status).
    pub async fn fetch_station_status(&self) -> Result<Vec<StationStatus>, GbfsError> {
        Ok(convert_status_feed(&self.status))
    }

    /// Mimics [`GbfsClient::fetch_snapshot`](super::GbfsClient::fetch_snapshot).
    pub async fn fetch_snapshot(&self) -> Result<FeedSnapshot, GbfsError> {
        Ok(convert_snapshot(&self.information, &self.status))
    }
}

fn load_feed<T: DeserializeOwned>(
    data_dir: &Path,
    feed: &'static str,
) -> Result<GbfsResponse<T>, GbfsError> {
    let path = data_dir.join(format!("{feed}.json"));

    let json = std::fs::read_to_string(&path).map_err(|e| GbfsError::Mock {
        message: format!("failed to read {:?}: {}", path, e),
    })?;

    serde_json::from_str(&json).map_err(|e| GbfsError::Json {
        feed,
        message: e.to_string(),
    })
}
