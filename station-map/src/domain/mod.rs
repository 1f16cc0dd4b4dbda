//! Core domain types for bike-share stations.
//!
//! These types enforce invariants at construction time.

mod category;
mod error;
mod station;

pub use category::{Category, LOW_BIKE_THRESHOLD};
pub use error::DomainError;
pub use station::{Position, StationId, StationInfo, StationStatus};
