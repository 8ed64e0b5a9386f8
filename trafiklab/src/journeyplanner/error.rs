//! Journey planner error types.

use crate::domain::{InvalidLatLng, InvalidSiteId, InvalidStopFilter};

/// Errors that can occur when interacting with the journey planner API.
#[derive(Debug, thiserror::Error)]
pub enum JourneyPlannerError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The client id is not a valid header value
    #[error("invalid client id: {0:?}")]
    InvalidClientId(String),

    /// A stop finder request without a search string
    #[error("stop finder name is required")]
    EmptyStopName,

    #[error(transparent)]
    StopFilter(#[from] InvalidStopFilter),

    #[error(transparent)]
    SiteId(#[from] InvalidSiteId),

    #[error(transparent)]
    Coordinate(#[from] InvalidLatLng),

    #[error("invalid trips request: {0}")]
    InvalidTrips(#[from] InvalidTripsRequest),
}

/// A trips request that fails validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTripsRequest {
    /// A required field is empty
    #[error("{0} is required")]
    Missing(&'static str),

    /// A numeric field is outside its allowed range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },

    /// A name that is not one of the accepted values for `kind`
    #[error("invalid {kind}: {name:?}")]
    UnknownName { kind: &'static str, name: String },
}
