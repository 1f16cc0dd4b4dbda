//! GBFS feed error types.

/// Errors that can occur when fetching station feeds.
#[derive(Debug, thiserror::Error)]
pub enum GbfsError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned an error status
    #[error("feed error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse feed JSON
    #[error("JSON parse error in {feed}: {message}")]
    Json { feed: &'static str, message: String },

    /// Mock feed files could not be loaded
    #[error("mock feed error: {message}")]
    Mock { message: String },
}
