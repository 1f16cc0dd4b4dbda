//! Station health categories.

use std::fmt;

use serde::Serialize;

use super::StationStatus;

/// Stations with fewer bikes than this (but at least one) are `Low`.
pub const LOW_BIKE_THRESHOLD: u32 = 5;

/// Mutually exclusive health classification of a station.
///
/// Variants are declared in evaluation order: [`Category::for_status`] checks
/// each predicate in turn and the first that holds wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Dock not installed yet.
    ComingSoon,
    /// Installed, no bikes available.
    Empty,
    /// Installed with bikes, but renting disabled.
    OutOfOrder,
    /// Renting, fewer than [`LOW_BIKE_THRESHOLD`] bikes.
    Low,
    /// Renting with plenty of bikes.
    Healthy,
}

impl Category {
    /// All categories, in evaluation (and display) order.
    pub const ALL: [Category; 5] = [
        Category::ComingSoon,
        Category::Empty,
        Category::OutOfOrder,
        Category::Low,
        Category::Healthy,
    ];

    /// Classify a single status record.
    ///
    /// The order of checks is load-bearing: a station with zero bikes and
    /// renting disabled is `Empty`, not `OutOfOrder`; an uninstalled station
    /// is `ComingSoon` whatever its bike count.
    ///
    /// # Examples
    ///
    /// ```
    /// use station_map::domain::{Category, StationId, StationStatus};
    ///
    /// let id = StationId::parse("1").unwrap();
    /// let status = StationStatus::new(id, true, false, 0);
    /// assert_eq!(Category::for_status(&status), Category::Empty);
    /// ```
    pub fn for_status(status: &StationStatus) -> Category {
        if !status.is_installed {
            Category::ComingSoon
        } else if status.num_bikes_available == 0 {
            Category::Empty
        } else if !status.is_renting {
            Category::OutOfOrder
        } else if status.num_bikes_available < LOW_BIKE_THRESHOLD {
            Category::Low
        } else {
            Category::Healthy
        }
    }

    /// Position of this category in [`Category::ALL`].
    pub fn index(self) -> usize {
        match self {
            Category::ComingSoon => 0,
            Category::Empty => 1,
            Category::OutOfOrder => 2,
            Category::Low => 3,
            Category::Healthy => 4,
        }
    }

    /// Human-readable label used for overlays and the summary panel.
    pub fn label(self) -> &'static str {
        match self {
            Category::ComingSoon => "Coming Soon",
            Category::Empty => "Empty Stations",
            Category::OutOfOrder => "Out of Order",
            Category::Low => "Low Stations",
            Category::Healthy => "Healthy Stations",
        }
    }

    /// Stable machine-readable key (matches the serde representation).
    pub fn key(self) -> &'static str {
        match self {
            Category::ComingSoon => "coming_soon",
            Category::Empty => "empty",
            Category::OutOfOrder => "out_of_order",
            Category::Low => "low",
            Category::Healthy => "healthy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
