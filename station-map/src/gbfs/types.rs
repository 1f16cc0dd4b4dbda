//! GBFS feed response DTOs.
//!
//! These types map directly to the `station_information.json` and
//! `station_status.json` documents. Providers differ in how strictly they
//! follow the GBFS format: GBFS v1 encodes booleans as `0`/`1` and some feeds
//! still send numeric station ids, so both encodings are accepted.
//!
//! Each entry of `data.stations` is parsed on its own into a [`FeedRecord`];
//! a malformed record is kept as [`FeedRecord::Malformed`] instead of
//! failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The envelope shared by every GBFS feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct GbfsResponse<T> {
    /// POSIX timestamp of when the provider last updated the feed.
    pub last_updated: Option<i64>,

    /// Seconds before the feed should be fetched again.
    pub ttl: Option<u64>,

    pub data: StationsData<T>,
}

/// The `data` object of a station feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct StationsData<T> {
    pub stations: Vec<FeedRecord<T>>,
}

/// One entry of a feed's `stations` array.
#[derive(Debug, Clone)]
pub enum FeedRecord<T> {
    Parsed(T),
    /// The entry did not match the record schema.
    Malformed {
        /// The entry's `station_id`, if it had one.
        station_id: Option<String>,
        error: String,
    },
}

impl<T> FeedRecord<T> {
    /// The parsed record, if the entry was well formed.
    pub fn parsed(&self) -> Option<&T> {
        match self {
            FeedRecord::Parsed(record) => Some(record),
            FeedRecord::Malformed { .. } => None,
        }
    }
}

impl<T> From<T> for FeedRecord<T> {
    fn from(record: T) -> Self {
        FeedRecord::Parsed(record)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for FeedRecord<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let station_id = match value.get("station_id") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        Ok(match serde_json::from_value(value) {
            Ok(record) => FeedRecord::Parsed(record),
            Err(e) => FeedRecord::Malformed {
                station_id,
                error: e.to_string(),
            },
        })
    }
}

/// A record from `station_information.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInformationDto {
    #[serde(deserialize_with = "station_id")]
    pub station_id: String,

    pub name: String,

    pub lat: f64,

    pub lon: f64,

    /// Missing on some virtual stations.
    #[serde(default)]
    pub capacity: u32,
}

/// A record from `station_status.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationStatusDto {
    #[serde(deserialize_with = "station_id")]
    pub station_id: String,

    #[serde(deserialize_with = "flag")]
    pub is_installed: bool,

    #[serde(deserialize_with = "flag")]
    pub is_renting: bool,

    pub num_bikes_available: u32,

    #[serde(default)]
    pub num_docks_available: Option<u32>,

    #[serde(default, deserialize_with = "optional_flag")]
    pub is_returning: Option<bool>,

    /// POSIX timestamp of the station's last report.
    #[serde(default)]
    pub last_reported: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(i64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
}

impl From<FlagRepr> for bool {
    fn from(repr: FlagRepr) -> Self {
        match repr {
            FlagRepr::Bool(b) => b,
            FlagRepr::Int(n) => n != 0,
        }
    }
}

fn station_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Text(s) => s,
        IdRepr::Number(n) => n.to_string(),
    })
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    FlagRepr::deserialize(deserializer).map(bool::from)
}

fn optional_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(Option::<FlagRepr>::deserialize(deserializer)?.map(bool::from))
}
