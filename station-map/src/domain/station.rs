//! Station identity, metadata and live status types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::DomainError;

/// Identifier of a bike-share dock, as issued by the feed provider.
///
/// Providers use opaque strings (Citi Bike mixes UUIDs and numeric ids), so
/// the only guarantee this type makes is that the id is not blank. Ids are
/// kept verbatim and compared exactly, so `"72 "` and `"72"` are different
/// stations.
///
/// # Examples
///
/// ```
/// use station_map::domain::StationId;
///
/// let id = StationId::parse("66db237e-0aca-11e7-82f6-3863bb44ef7c").unwrap();
/// assert_eq!(id.as_str(), "66db237e-0aca-11e7-82f6-3863bb44ef7c");
///
/// // Blank ids are rejected
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Parse a station id, rejecting empty or all-whitespace input.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.trim().is_empty() {
            return Err(DomainError::EmptyStationId);
        }
        Ok(StationId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    /// Create a position, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(&lon);
        if !lat_ok || !lon_ok {
            return Err(DomainError::InvalidPosition { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

/// Static metadata for a station, refreshed once per fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct StationInfo {
    pub station_id: StationId,
    pub name: String,
    pub position: Position,
    /// Number of docks. Not cross-checked against availability.
    pub capacity: u32,
}

impl StationInfo {
    pub fn new(
        station_id: StationId,
        name: impl Into<String>,
        position: Position,
        capacity: u32,
    ) -> Self {
        Self {
            station_id,
            name: name.into(),
            position,
            capacity,
        }
    }
}

/// Real-time operational state of a station.
///
/// The `station_id` is a foreign key into [`StationInfo`] but the feed does
/// not guarantee a match.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStatus {
    pub station_id: StationId,
    pub is_installed: bool,
    pub is_renting: bool,
    pub num_bikes_available: u32,

    /// Free docks, when the feed reports them.
    pub num_docks_available: Option<u32>,

    /// Whether the station accepts returns, when reported.
    pub is_returning: Option<bool>,

    /// When the station last reported to the provider.
    pub last_reported: Option<DateTime<Utc>>,
}

impl StationStatus {
    /// Create a status with only the fields used for classification set.
    pub fn new(
        station_id: StationId,
        is_installed: bool,
        is_renting: bool,
        num_bikes_available: u32,
    ) -> Self {
        Self {
            station_id,
            is_installed,
            is_renting,
            num_bikes_available,
            num_docks_available: None,
            is_returning: None,
            last_reported: None,
        }
    }
}
