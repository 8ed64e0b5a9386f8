//! Trip leg types.
//!
//! A `Leg` is one segment of a trip: a walk or a ride on a single vehicle.
//! Legs are plain values decoded from a travel planner response.

use std::fmt;

use super::polyline::Polyline;
use super::time::{TimeError, TimePair, parse_time_pair};

/// The kind of a leg.
///
/// Only `Walk` is special-cased; every other kind counts as a transport
/// leg when post-processing trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LegType {
    /// On foot (`WALK`)
    Walk,
    /// A ride on a scheduled vehicle (`JNY`)
    Journey,
    /// A transfer between stops (`TRSF`)
    Transfer,
    /// Any other provider code
    Other(String),
}

impl LegType {
    /// Map a provider type code to a leg type.
    pub fn parse(code: &str) -> Self {
        match code {
            "WALK" => LegType::Walk,
            "JNY" => LegType::Journey,
            "TRSF" => LegType::Transfer,
            other => LegType::Other(other.to_string()),
        }
    }

    /// The provider type code.
    pub fn as_str(&self) -> &str {
        match self {
            LegType::Walk => "WALK",
            LegType::Journey => "JNY",
            LegType::Transfer => "TRSF",
            LegType::Other(code) => code,
        }
    }

    /// Whether this is a walk leg.
    pub fn is_walk(&self) -> bool {
        matches!(self, LegType::Walk)
    }
}

impl fmt::Display for LegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The origin or destination of a leg.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub id: String,
    pub ext_id: String,
    pub name: String,
    /// Provider location type, e.g. "ST" for stop, "ADR" for address
    pub kind: String,
    pub lon: f64,
    pub lat: f64,
    pub has_main_mast: bool,
    pub main_mast_id: Option<String>,
    pub main_mast_ext_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub rt_date: Option<String>,
    pub rt_time: Option<String>,
    pub track: Option<String>,
    pub prognosis_type: Option<String>,
}

impl Location {
    /// Scheduled and real-time timestamps, if a scheduled time was sent.
    pub fn times(&self) -> Result<Option<TimePair>, TimeError> {
        parse_time_pair(
            self.date.as_deref(),
            self.time.as_deref(),
            self.rt_date.as_deref(),
            self.rt_time.as_deref(),
        )
    }
}

/// An intermediate stop on a transport leg.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stop {
    pub id: String,
    pub ext_id: String,
    pub name: String,
    pub route_idx: u32,
    pub lon: f64,
    pub lat: f64,
    pub departure_date: Option<String>,
    pub departure_time: Option<String>,
    pub rt_departure_date: Option<String>,
    pub rt_departure_time: Option<String>,
    pub arrival_date: Option<String>,
    pub arrival_time: Option<String>,
    pub rt_arrival_date: Option<String>,
    pub rt_arrival_time: Option<String>,
    pub departure_track: Option<String>,
    pub arrival_track: Option<String>,
}

impl Stop {
    /// Arrival timestamps, if the stop has a scheduled arrival.
    pub fn arrival(&self) -> Result<Option<TimePair>, TimeError> {
        parse_time_pair(
            self.arrival_date.as_deref(),
            self.arrival_time.as_deref(),
            self.rt_arrival_date.as_deref(),
            self.rt_arrival_time.as_deref(),
        )
    }

    /// Departure timestamps, if the stop has a scheduled departure.
    pub fn departure(&self) -> Result<Option<TimePair>, TimeError> {
        parse_time_pair(
            self.departure_date.as_deref(),
            self.departure_time.as_deref(),
            self.rt_departure_date.as_deref(),
            self.rt_departure_time.as_deref(),
        )
    }
}

/// Line and operator metadata of a transport leg.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Product {
    pub name: String,
    pub num: Option<String>,
    pub line: Option<String>,
    pub category_code: Option<u32>,
    pub category_in: Option<String>,
    pub category_out: Option<String>,
    pub category_out_short: Option<String>,
    pub category_out_locale: Option<String>,
    pub operator: Option<String>,
    pub operator_code: Option<String>,
    pub admin: Option<String>,
}

/// A service message attached to a leg.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub active: bool,
    pub head: String,
    pub text: String,
    pub priority: Option<i32>,
    pub category: Option<String>,
    pub products: Option<u32>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
}

/// A short note attached to a leg.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub priority: Option<i32>,
    pub text: String,
}

/// One segment of a trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// Position within the trip
    pub idx: u32,
    pub leg_type: LegType,
    /// Length in meters
    pub distance: u32,
    pub cancelled: bool,
    pub reachable: bool,
    pub name: String,
    pub number: Option<String>,
    pub category: Option<String>,
    pub direction: Option<String>,
    pub origin: Location,
    pub destination: Location,
    /// Reference for a journey detail request
    pub journey_detail_ref: Option<String>,
    pub journey_status: Option<String>,
    pub product: Option<Product>,
    pub polyline: Option<Polyline>,
    pub stops: Vec<Stop>,
    pub messages: Vec<Message>,
    pub notes: Vec<Note>,
}

impl Leg {
    /// An otherwise empty leg of the given type.
    pub fn new(leg_type: LegType) -> Self {
        Self {
            idx: 0,
            leg_type,
            distance: 0,
            cancelled: false,
            reachable: true,
            name: String::new(),
            number: None,
            category: None,
            direction: None,
            origin: Location::default(),
            destination: Location::default(),
            journey_detail_ref: None,
            journey_status: None,
            product: None,
            polyline: None,
            stops: Vec::new(),
            messages: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// A walk leg of `distance` meters.
    pub fn walk(distance: u32) -> Self {
        Self {
            distance,
            ..Self::new(LegType::Walk)
        }
    }

    /// Whether this is a walk leg.
    pub fn is_walk(&self) -> bool {
        self.leg_type.is_walk()
    }

    /// Whether this leg rides a vehicle (anything but a walk).
    pub fn is_transport(&self) -> bool {
        !self.is_walk()
    }

    /// Line designation for display: the product's line, falling back to
    /// the leg name.
    pub fn line(&self) -> &str {
        self.product
            .as_ref()
            .and_then(|p| p.line.as_deref())
            .unwrap_or(&self.name)
    }
}
