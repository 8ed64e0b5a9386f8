//! SL Travelplanner 3.1 client.
//!
//! This module provides an HTTP client for the HAFAS-based Travelplanner
//! XML API.
//!
//! Key characteristics of the Travelplanner:
//! - Stop IDs are 9-digit HAFAS IDs; legacy site IDs are converted before
//!   they are sent
//! - Dates and times are Europe/Stockholm local time, split into separate
//!   `date` and `time` attributes
//! - Raw trips carry many short connector walks; use
//!   [`TripsResponse::combine_walks`] before display

mod client;
mod convert;
mod error;
mod request;
mod types;

pub use client::{DEFAULT_BASE_URL, TravelplannerClient, TravelplannerConfig};
pub use convert::{ConversionError, TripsResponse};
pub use error::TravelplannerError;
pub use request::{JourneyDetailRequest, ProductRef, Query, TripsRequest, WalkPreference};
pub use types::{
    FareItem, FareSetItem, HafasStatus, JourneyDetail, LegItem, LocationItem, PolylineItem,
    StopItem, TripItem, TripList,
};
