//! Journey planner v2 response DTOs.
//!
//! These types map directly to the JSON API responses. Every struct takes
//! `#[serde(default)]` because the API omits fields freely; unknown
//! fields are ignored. Coordinates arrive as `[lat, lon]` arrays.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::domain::{LatLng, to_stockholm};

/// Deserialize an optional `[lat, lon]` pair.
fn lat_lon<'de, D>(deserializer: D) -> Result<Option<LatLng>, D::Error>
where
    D: Deserializer<'de>,
{
    let pair: Option<Vec<f64>> = Option::deserialize(deserializer)?;
    match pair.as_deref() {
        None => Ok(None),
        Some(&[lat, lon]) => Ok(Some(LatLng::new(lat, lon))),
        Some(other) => Err(D::Error::invalid_length(other.len(), &"a [lat, lon] pair")),
    }
}

/// A diagnostic from the planner back end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemMessage {
    /// e.g. "error", "warning"
    #[serde(rename = "type")]
    pub kind: String,
    /// Back-end module reporting the message
    pub module: String,
    pub code: i64,
    pub text: String,
    pub sub_type: Option<String>,
}

impl SystemMessage {
    pub fn is_error(&self) -> bool {
        self.kind == "error"
    }
}

/// Response from `/stop-finder`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StopFinderResponse {
    pub system_messages: Vec<SystemMessage>,
    pub locations: Vec<StopLocation>,
}

impl StopFinderResponse {
    /// The location the API marked as the best match, if any.
    pub fn best(&self) -> Option<&StopLocation> {
        self.locations.iter().find(|l| l.is_best)
    }
}

/// A location matched by the stop finder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StopLocation {
    pub id: String,
    pub is_global_id: bool,
    /// Name including municipality
    pub name: String,
    /// Name without municipality
    pub disassembled_name: Option<String>,
    #[serde(deserialize_with = "lat_lon")]
    pub coord: Option<LatLng>,
    /// Set for streets and addresses
    pub street_name: Option<String>,
    /// Set for addresses
    pub building_number: Option<String>,
    /// "stop", "poi", "street", "singlehouse", ...
    #[serde(rename = "type")]
    pub kind: String,
    pub match_quality: i64,
    pub is_best: bool,
    /// Modes serving the stop: 0 train, 2 metro, 4 tram, 5 bus, 9 ferry,
    /// 10 on-demand
    pub product_classes: Vec<u32>,
    pub parent: Option<ParentLocation>,
}

/// The municipality or locality a location belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParentLocation {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response from `/trips`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripsResponse {
    #[serde(alias = "systemmessages")]
    pub system_messages: Vec<SystemMessage>,
    pub journeys: Vec<Journey>,
}

/// One journey option.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Journey {
    pub trip_id: Option<String>,
    /// Timetabled duration in seconds
    pub trip_duration: Option<i64>,
    /// Real-time duration in seconds
    pub trip_rt_duration: Option<i64>,
    pub rating: i64,
    pub is_additional: bool,
    pub interchanges: u32,
    pub is_realtime_only_informative: bool,
    pub legs: Vec<JourneyLeg>,
    pub days_of_service: Option<DaysOfService>,
    /// Set when a leg is cancelled
    pub trip_impossible: bool,
}

impl Journey {
    /// Real-time duration, falling back to the timetabled one.
    pub fn duration(&self) -> Option<Duration> {
        self.trip_rt_duration
            .or(self.trip_duration)
            .map(Duration::seconds)
    }

    /// Departure from the first leg's origin.
    pub fn departure(&self) -> Option<DateTime<Tz>> {
        self.legs.first().and_then(|l| l.origin.departure())
    }

    /// Arrival at the last leg's destination.
    pub fn arrival(&self) -> Option<DateTime<Tz>> {
        self.legs.last().and_then(|l| l.destination.arrival())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DaysOfService {
    pub rvb: String,
}

/// One leg of a journey.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JourneyLeg {
    pub infos: Vec<JourneyInfo>,
    pub hints: Vec<LegHint>,
    /// Meters
    pub distance: Option<u32>,
    /// Seconds
    pub duration: Option<i64>,
    pub foot_path_info: Vec<FootPathInfo>,
    pub origin: JourneyStop,
    pub destination: JourneyStop,
    pub transportation: Option<Transportation>,
    pub stop_sequence: Vec<JourneyStop>,
    /// `[lat, lon]` pairs along the leg
    pub coords: Vec<Vec<f64>>,
    pub properties: HashMap<String, serde_json::Value>,
}

impl JourneyLeg {
    /// Whether this is a footpath rather than a vehicle ride.
    ///
    /// Footpaths carry product class 99 or 100.
    pub fn is_walk(&self) -> bool {
        self.transportation
            .as_ref()
            .and_then(|t| t.product.as_ref())
            .is_some_and(|p| matches!(p.class, 99 | 100))
    }
}

/// A stop as it appears in a leg.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JourneyStop {
    pub is_global_id: bool,
    pub id: String,
    pub name: String,
    pub disassembled_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "lat_lon")]
    pub coord: Option<LatLng>,
    /// Floor level
    pub niveau: Option<i32>,
    pub parent: Option<Box<JourneyStop>>,
    pub product_classes: Vec<u32>,
    pub departure_time_base_timetable: Option<DateTime<Utc>>,
    pub departure_time_planned: Option<DateTime<Utc>>,
    pub departure_time_estimated: Option<DateTime<Utc>>,
    pub arrival_time_base_timetable: Option<DateTime<Utc>>,
    pub arrival_time_planned: Option<DateTime<Utc>>,
    pub arrival_time_estimated: Option<DateTime<Utc>>,
    pub properties: HashMap<String, serde_json::Value>,
}

impl JourneyStop {
    /// Estimated departure in Stockholm time, falling back to planned.
    pub fn departure(&self) -> Option<DateTime<Tz>> {
        self.departure_time_estimated
            .or(self.departure_time_planned)
            .map(|t| to_stockholm(&t))
    }

    /// Estimated arrival in Stockholm time, falling back to planned.
    pub fn arrival(&self) -> Option<DateTime<Tz>> {
        self.arrival_time_estimated
            .or(self.arrival_time_planned)
            .map(|t| to_stockholm(&t))
    }
}

/// The vehicle serving a leg.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transportation {
    pub id: String,
    pub name: String,
    pub disassembled_name: Option<String>,
    pub number: String,
    pub product: Option<TransportProduct>,
    pub operator: Option<TransportOperator>,
    pub destination: Option<TransportDestination>,
    pub is_samtrafik: bool,
    pub properties: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportProduct {
    pub id: i64,
    pub class: u32,
    pub name: String,
    pub icon_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportOperator {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportDestination {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A disruption or service notice on a leg.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JourneyInfo {
    pub id: String,
    pub info_links: Vec<InfoLink>,
    pub priority: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InfoLink {
    pub title: String,
    pub url: String,
    pub properties: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegHint {
    pub provider_code: String,
    pub content: String,
}

/// Walking directions attached to a leg.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FootPathInfo {
    /// Seconds
    pub duration: i64,
    #[serde(rename = "footPathElem")]
    pub elements: Vec<FootPathElement>,
    /// "BEFORE", "AFTER", "IDEST"
    pub position: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FootPathElement {
    pub description: String,
    pub origin: FootPathStop,
    pub destination: FootPathStop,
    pub level: String,
    pub level_from: i32,
    pub level_to: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FootPathStop {
    pub id: String,
    pub is_global_id: bool,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "lat_lon")]
    pub coord: Option<LatLng>,
}
