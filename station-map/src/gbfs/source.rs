//! Feed source selection.

use super::client::GbfsClient;
use super::convert::FeedSnapshot;
use super::error::GbfsError;
use super::mock::MockGbfsClient;

/// Where station feeds come from: the provider, or local files.
#[derive(Debug, Clone)]
pub enum FeedSource {
    Live(GbfsClient),
    Mock(MockGbfsClient),
}

impl FeedSource {
    /// Fetch both feeds and convert them to domain types.
    pub async fn fetch_snapshot(&self) -> Result<FeedSnapshot, GbfsError> {
        match self {
            FeedSource::Live(client) => client.fetch_snapshot().await,
            FeedSource::Mock(client) => client.fetch_snapshot().await,
        }
    }

    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedSource::Live(_) => "live",
            FeedSource::Mock(_) => "mock",
        }
    }
}

impl From<GbfsClient> for FeedSource {
    fn from(client: GbfsClient) -> Self {
        FeedSource::Live(client)
    }
}

impl From<MockGbfsClient> for FeedSource {
    fn from(client: MockGbfsClient) -> Self {
        FeedSource::Mock(client)
    }
}
