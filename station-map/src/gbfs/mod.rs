//! GBFS (General Bikeshare Feed Specification) client.
//!
//! This module fetches the two station feeds a bike-share provider
//! publishes and converts them to domain types:
//! - `station_information.json`: static metadata (name, position, capacity)
//! - `station_status.json`: live state (installed, renting, bikes available)
//!
//! The feeds are independent and not guaranteed to agree; joining them is
//! the classifier's job.

mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use client::{DEFAULT_BASE_URL, GbfsClient, GbfsConfig};
pub use convert::{FeedSnapshot, convert_station_information, convert_station_status};
pub use error::GbfsError;
pub use mock::MockGbfsClient;
pub use source::FeedSource;
pub use types::{FeedRecord, GbfsResponse, StationInformationDto, StationStatusDto, StationsData};

#[cfg(test)]
pub(crate) use mock::fixtures;
