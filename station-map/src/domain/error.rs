//! Domain error types.
//!
//! These errors represent malformed records rejected while building domain
//! values. They are distinct from feed/IO errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Station id was empty or whitespace
    #[error("station id must not be empty")]
    EmptyStationId,

    /// Coordinates were non-finite or outside WGS84 bounds
    #[error("invalid position: lat {lat}, lon {lon}")]
    InvalidPosition { lat: f64, lon: f64 },
}
