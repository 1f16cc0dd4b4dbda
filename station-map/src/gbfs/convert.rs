//! Conversion from GBFS DTOs to domain types.
//!
//! Records that do not match the feed schema, or cannot form a valid domain
//! value (blank id, impossible coordinates), are dropped with a warning. A
//! single bad record never fails the whole feed.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::{DomainError, Position, StationId, StationInfo, StationStatus};

use super::types::{FeedRecord, GbfsResponse, StationInformationDto, StationStatusDto};

/// Both station feeds, fetched together and converted to domain types.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub stations: Vec<StationInfo>,
    pub statuses: Vec<StationStatus>,
    /// When the provider last updated the status feed.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Convert a single `station_information` record.
pub fn convert_station_information(dto: &StationInformationDto) -> Result<StationInfo, DomainError> {
    let station_id = StationId::parse(&dto.station_id)?;
    let position = Position::new(dto.lat, dto.lon)?;
    Ok(StationInfo::new(
        station_id,
        dto.name.clone(),
        position,
        dto.capacity,
    ))
}

/// Convert a single `station_status` record.
pub fn convert_station_status(dto: &StationStatusDto) -> Result<StationStatus, DomainError> {
    let station_id = StationId::parse(&dto.station_id)?;
    Ok(StationStatus {
        station_id,
        is_installed: dto.is_installed,
        is_renting: dto.is_renting,
        num_bikes_available: dto.num_bikes_available,
        num_docks_available: dto.num_docks_available,
        is_returning: dto.is_returning,
        last_reported: dto.last_reported.and_then(timestamp),
    })
}

/// Convert a `station_information` feed, skipping invalid records.
pub fn convert_information_feed(response: &GbfsResponse<StationInformationDto>) -> Vec<StationInfo> {
    convert_records(
        &response.data.stations,
        "skipping station information record",
        |dto| (dto.station_id.as_str(), convert_station_information(dto)),
    )
}

/// Convert a `station_status` feed, skipping invalid records.
pub fn convert_status_feed(response: &GbfsResponse<StationStatusDto>) -> Vec<StationStatus> {
    convert_records(
        &response.data.stations,
        "skipping station status record",
        |dto| (dto.station_id.as_str(), convert_station_status(dto)),
    )
}

fn convert_records<'a, T, U>(
    records: &'a [FeedRecord<T>],
    message: &str,
    convert: impl Fn(&'a T) -> (&'a str, Result<U, DomainError>),
) -> Vec<U> {
    records
        .iter()
        .filter_map(|record| match record {
            FeedRecord::Parsed(dto) => match convert(dto) {
                (_, Ok(value)) => Some(value),
                (station_id, Err(e)) => {
                    warn!(station_id, error = %e, "{message}");
                    None
                }
            },
            FeedRecord::Malformed { station_id, error } => {
                warn!(station_id = station_id.as_deref().unwrap_or("<none>"), %error, "{message}");
                None
            }
        })
        .collect()
}

/// Convert both feeds into a snapshot.
pub fn convert_snapshot(
    information: &GbfsResponse<StationInformationDto>,
    status: &GbfsResponse<StationStatusDto>,
) -> FeedSnapshot {
    FeedSnapshot {
        stations: convert_information_feed(information),
        statuses: convert_status_feed(status),
        last_updated: status.last_updated.and_then(timestamp),
    }
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gbfs::types::{FeedRecord, StationsData};

    fn info_dto(id: &str, lat: f64, lon: f64) -> StationInformationDto {
        StationInformationDto {
            station_id: id.to_string(),
            name: format!("Station {id}"),
            lat,
            lon,
            capacity: 20,
        }
    }

    fn status_dto(id: &str) -> StationStatusDto {
        StationStatusDto {
            station_id: id.to_string(),
            is_installed: true,
            is_renting: true,
            num_bikes_available: 7,
            num_docks_available: Some(13),
            is_returning: Some(true),
            last_reported: Some(1710525512),
        }
    }

    fn envelope<T>(stations: Vec<T>, last_updated: Option<i64>) -> GbfsResponse<T> {
        GbfsResponse {
            last_updated,
            ttl: Some(5),
            data: StationsData {
                stations: stations.into_iter().map(FeedRecord::from).collect(),
            },
        }
    }

    #[test]
    fn converts_information_record() {
        let info = convert_station_information(&info_dto("72", 40.767, -73.993)).unwrap();
        assert_eq!(info.station_id.as_str(), "72");
        assert_eq!(info.name, "Station 72");
        assert_eq!(info.position.lat, 40.767);
        assert_eq!(info.capacity, 20);
    }

    #[test]
    fn converts_status_record() {
        let status = convert_station_status(&status_dto("72")).unwrap();
        assert_eq!(status.station_id.as_str(), "72");
        assert_eq!(status.num_bikes_available, 7);
        assert_eq!(status.num_docks_available, Some(13));
        assert_eq!(
            status.last_reported,
            DateTime::from_timestamp(1710525512, 0)
        );
    }

    #[test]
    fn invalid_records_are_skipped() {
        let feed = envelope(
            vec![
                info_dto("1", 40.7, -74.0),
                info_dto("", 40.7, -74.0),
                info_dto("3", 400.0, -74.0),
                info_dto("4", 40.8, -73.9),
            ],
            None,
        );

        let stations = convert_information_feed(&feed);
        let ids: Vec<_> = stations.iter().map(|s| s.station_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn blank_status_id_is_skipped() {
        let feed = envelope(vec![status_dto("1"), status_dto(" ")], None);
        assert_eq!(convert_status_feed(&feed).len(), 1);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let json = r#"{"last_updated": 1710525600, "data": {"stations": [
            {"station_id": "1", "is_installed": true, "is_renting": true, "num_bikes_available": 4},
            {"station_id": "2", "is_renting": true, "num_bikes_available": 4},
            {"station_id": "3", "is_installed": true, "is_renting": true, "num_bikes_available": null},
            {"station_id": "4", "is_installed": 1, "is_renting": 1, "num_bikes_available": 0}
        ]}}"#;

        let feed: GbfsResponse<StationStatusDto> = serde_json::from_str(json).unwrap();
        let statuses = convert_status_feed(&feed);
        let ids: Vec<_> = statuses.iter().map(|s| s.station_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn information_without_name_or_position_is_skipped() {
        let json = r#"{"data": {"stations": [
            {"station_id": "1", "lat": 40.7, "lon": -74.0},
            {"station_id": "2", "name": "Pier 40", "lon": -74.0},
            {"station_id": "3", "name": "Pier 40", "lat": 40.7, "lon": -74.0}
        ]}}"#;

        let feed: GbfsResponse<StationInformationDto> = serde_json::from_str(json).unwrap();
        let stations = convert_information_feed(&feed);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].station_id.as_str(), "3");
    }

    #[test]
    fn snapshot_takes_last_updated_from_status_feed() {
        let information = envelope(vec![info_dto("1", 40.7, -74.0)], Some(100));
        let status = envelope(vec![status_dto("1")], Some(1710525600));

        let snapshot = convert_snapshot(&information, &status);
        assert_eq!(snapshot.stations.len(), 1);
        assert_eq!(snapshot.statuses.len(), 1);
        assert_eq!(snapshot.last_updated, DateTime::from_timestamp(1710525600, 0));
    }
}
