//! Station classification.
//!
//! Joins station metadata with live status and partitions the matched
//! stations into health categories. This is a pure, single-pass transform
//! that is re-run from scratch on every fetch.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{Category, StationId, StationInfo, StationStatus};

/// A station joined with the status record it was classified by.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedStation {
    pub info: StationInfo,
    pub status: StationStatus,
}

/// Number of stations in each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub coming_soon: usize,
    pub empty: usize,
    pub out_of_order: usize,
    pub low: usize,
    pub healthy: usize,
}

impl CategoryCounts {
    /// Count for a single category.
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::ComingSoon => self.coming_soon,
            Category::Empty => self.empty,
            Category::OutOfOrder => self.out_of_order,
            Category::Low => self.low,
            Category::Healthy => self.healthy,
        }
    }

    /// Sum over all categories.
    pub fn total(&self) -> usize {
        self.coming_soon + self.empty + self.out_of_order + self.low + self.healthy
    }
}

/// Outcome of a classification run.
///
/// Every bucket is present (possibly empty) and holds stations in the order
/// they appeared in the metadata input. Stations without a status record are
/// listed in [`unmatched`](Self::unmatched) and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    groups: [Vec<ClassifiedStation>; 5],
    unmatched: Vec<StationId>,
}

impl ClassificationResult {
    fn empty() -> Self {
        Self {
            groups: Default::default(),
            unmatched: Vec::new(),
        }
    }

    /// Stations assigned to `category`, in input order.
    pub fn stations(&self, category: Category) -> &[ClassifiedStation] {
        &self.groups[category.index()]
    }

    /// Number of stations assigned to `category`.
    pub fn count(&self, category: Category) -> usize {
        self.groups[category.index()].len()
    }

    /// Per-category counts.
    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            coming_soon: self.count(Category::ComingSoon),
            empty: self.count(Category::Empty),
            out_of_order: self.count(Category::OutOfOrder),
            low: self.count(Category::Low),
            healthy: self.count(Category::Healthy),
        }
    }

    /// Number of stations that were matched to a status and classified.
    pub fn total_stations(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Ids of stations that had no status record, in input order.
    pub fn unmatched(&self) -> &[StationId] {
        &self.unmatched
    }

    /// Iterate over `(category, stations)` in [`Category::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ClassifiedStation])> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.stations(category)))
    }
}

/// Classify every station that has a matching status record.
///
/// If `statuses` contains several records for the same station, the first
/// one wins. Stations with no status are skipped and reported with a warning;
/// this never fails.
pub fn classify(stations: &[StationInfo], statuses: &[StationStatus]) -> ClassificationResult {
    let index = index_statuses(statuses);

    let result = stations
        .iter()
        .fold(ClassificationResult::empty(), |mut acc, station| {
            match index.get(&station.station_id) {
                Some(status) => {
                    let category = Category::for_status(status);
                    acc.groups[category.index()].push(ClassifiedStation {
                        info: station.clone(),
                        status: (*status).clone(),
                    });
                }
                None => {
                    warn!(station_id = %station.station_id, "status not found for station");
                    acc.unmatched.push(station.station_id.clone());
                }
            }
            acc
        });

    debug!(
        total = result.total_stations(),
        unmatched = result.unmatched.len(),
        "classified stations"
    );

    result
}

/// Index statuses by station id, keeping the first record for each id.
fn index_statuses(statuses: &[StationStatus]) -> HashMap<&StationId, &StationStatus> {
    let mut index = HashMap::with_capacity(statuses.len());
    for status in statuses {
        index.entry(&status.station_id).or_insert(status);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Position;

    fn info(id: &str, capacity: u32) -> StationInfo {
        StationInfo::new(
            StationId::parse(id).unwrap(),
            format!("Station {id}"),
            Position::new(40.73, -74.0).unwrap(),
            capacity,
        )
    }

    fn status(id: &str, installed: bool, renting: bool, bikes: u32) -> StationStatus {
        StationStatus::new(StationId::parse(id).unwrap(), installed, renting, bikes)
    }

    fn ids(stations: &[ClassifiedStation]) -> Vec<&str> {
        stations.iter().map(|s| s.info.station_id.as_str()).collect()
    }

    #[test]
    fn two_station_example() {
        let stations = vec![info("1", 10), info("2", 5)];
        let statuses = vec![status("1", true, true, 3), status("2", false, false, 0)];

        let result = classify(&stations, &statuses);

        assert_eq!(ids(result.stations(Category::Low)), vec!["1"]);
        assert_eq!(ids(result.stations(Category::ComingSoon)), vec!["2"]);
        assert!(result.stations(Category::Empty).is_empty());
        assert!(result.stations(Category::OutOfOrder).is_empty());
        assert!(result.stations(Category::Healthy).is_empty());
        assert_eq!(result.total_stations(), 2);
        assert!(result.unmatched().is_empty());
    }

    #[test]
    fn unmatched_station_is_excluded() {
        let stations = vec![info("1", 10), info("2", 5), info("3", 20)];
        let statuses = vec![status("1", true, true, 3), status("2", false, false, 0)];

        let result = classify(&stations, &statuses);

        assert_eq!(result.total_stations(), 2);
        assert_eq!(result.unmatched(), &[StationId::parse("3").unwrap()]);
        for (_, bucket) in result.iter() {
            assert!(bucket.iter().all(|s| s.info.station_id.as_str() != "3"));
        }
    }

    #[test]
    fn uninstalled_with_zero_bikes_is_coming_soon() {
        let result = classify(&[info("1", 10)], &[status("1", false, true, 0)]);
        assert_eq!(result.count(Category::ComingSoon), 1);
        assert_eq!(result.count(Category::Empty), 0);
    }

    #[test]
    fn empty_check_precedes_renting_check() {
        let result = classify(&[info("1", 10)], &[status("1", true, false, 0)]);
        assert_eq!(result.count(Category::Empty), 1);
        assert_eq!(result.count(Category::OutOfOrder), 0);
    }

    #[test]
    fn first_duplicate_status_wins() {
        let stations = vec![info("1", 10)];
        let statuses = vec![status("1", true, true, 12), status("1", false, false, 0)];

        let result = classify(&stations, &statuses);

        assert_eq!(result.count(Category::Healthy), 1);
        assert_eq!(result.count(Category::ComingSoon), 0);
        assert_eq!(result.stations(Category::Healthy)[0].status.num_bikes_available, 12);
    }

    #[test]
    fn ids_join_exactly() {
        let result = classify(&[info("72 ", 20)], &[status("72", true, true, 10)]);
        assert_eq!(result.total_stations(), 0);
        assert_eq!(result.unmatched().len(), 1);
        assert_eq!(result.unmatched()[0].as_str(), "72 ");
    }

    #[test]
    fn statuses_without_station_are_ignored() {
        let stations = vec![info("1", 10)];
        let statuses = vec![status("99", true, true, 3), status("1", true, true, 8)];

        let result = classify(&stations, &statuses);

        assert_eq!(result.total_stations(), 1);
        assert_eq!(result.count(Category::Healthy), 1);
        assert!(result.unmatched().is_empty());
    }

    #[test]
    fn buckets_keep_station_input_order() {
        let stations = vec![info("c", 10), info("a", 10), info("b", 10)];
        // Status order deliberately differs from station order
        let statuses = vec![
            status("a", true, true, 9),
            status("b", true, true, 9),
            status("c", true, true, 9),
        ];

        let result = classify(&stations, &statuses);
        assert_eq!(ids(result.stations(Category::Healthy)), vec!["c", "a", "b"]);
    }

    #[test]
    fn availability_above_capacity_is_not_validated() {
        let result = classify(&[info("1", 2)], &[status("1", true, true, 50)]);
        assert_eq!(result.count(Category::Healthy), 1);
    }

    #[test]
    fn empty_inputs_yield_empty_buckets() {
        let result = classify(&[], &[]);
        assert_eq!(result.total_stations(), 0);
        assert_eq!(result.counts(), CategoryCounts::default());
        assert_eq!(result.iter().count(), 5);
    }

    #[test]
    fn counts_match_buckets() {
        let stations = vec![
            info("1", 10),
            info("2", 10),
            info("3", 10),
            info("4", 10),
            info("5", 10),
            info("6", 10),
        ];
        let statuses = vec![
            status("1", false, false, 0),
            status("2", true, true, 0),
            status("3", true, false, 7),
            status("4", true, true, 2),
            status("5", true, true, 15),
            status("6", true, true, 5),
        ];

        let counts = classify(&stations, &statuses).counts();

        assert_eq!(
            counts,
            CategoryCounts {
                coming_soon: 1,
                empty: 1,
                out_of_order: 1,
                low: 1,
                healthy: 2,
            }
        );
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.get(Category::Healthy), 2);
    }
}
