//! Data transfer objects for JSON responses.

use serde::Serialize;

use crate::classify::{CategoryCounts, ClassificationResult, ClassifiedStation};
use crate::domain::Category;
use crate::render::Palette;

/// A station in a category listing.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Provider station id
    pub station_id: String,

    /// Display name
    pub name: String,

    pub lat: f64,

    pub lon: f64,

    /// Total docks
    pub capacity: u32,

    /// Bikes available to rent
    pub bikes_available: u32,

    /// Free docks, if reported
    pub docks_available: Option<u32>,

    pub is_installed: bool,

    pub is_renting: bool,

    /// Whether returns are accepted, if reported
    pub is_returning: Option<bool>,

    /// RFC 3339 time of the station's last report
    pub last_reported: Option<String>,
}

impl StationResult {
    /// Create from a classified station.
    pub fn from_station(station: &ClassifiedStation) -> Self {
        Self {
            station_id: station.info.station_id.to_string(),
            name: station.info.name.clone(),
            lat: station.info.position.lat,
            lon: station.info.position.lon,
            capacity: station.info.capacity,
            bikes_available: station.status.num_bikes_available,
            docks_available: station.status.num_docks_available,
            is_installed: station.status.is_installed,
            is_renting: station.status.is_renting,
            is_returning: station.status.is_returning,
            last_reported: station.status.last_reported.map(|t| t.to_rfc3339()),
        }
    }
}

/// All stations of one category.
#[derive(Debug, Serialize)]
pub struct CategoryResult {
    /// Machine-readable key, e.g. `out_of_order`
    pub category: Category,

    /// Display label, e.g. "Out of Order"
    pub label: &'static str,

    /// Legend colour
    pub color: String,

    pub count: usize,

    /// Stations in feed order
    pub stations: Vec<StationResult>,
}

/// Response for the station listing.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Local time the listing was produced
    pub timestamp: String,

    pub total_stations: usize,

    /// One entry per category, in display order
    pub categories: Vec<CategoryResult>,

    /// Stations with no status record
    pub unmatched: Vec<String>,
}

impl StationsResponse {
    /// Build from a classification result.
    pub fn from_result(result: &ClassificationResult, palette: &Palette, timestamp: String) -> Self {
        let categories = result
            .iter()
            .map(|(category, stations)| CategoryResult {
                category,
                label: category.label(),
                color: palette.color(category).to_string(),
                count: stations.len(),
                stations: stations.iter().map(StationResult::from_station).collect(),
            })
            .collect();

        Self {
            timestamp,
            total_stations: result.total_stations(),
            categories,
            unmatched: result.unmatched().iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Response for the summary endpoint.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Local time the summary was produced
    pub timestamp: String,

    /// RFC 3339 time the provider last updated the status feed
    pub feed_last_updated: Option<String>,

    pub total_stations: usize,

    pub counts: CategoryCounts,

    /// Number of stations with no status record
    pub unmatched_stations: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
