//! Travelplanner client error types.

use std::fmt;

use crate::domain::InvalidSiteId;

use super::convert::ConversionError;

/// Errors from the Travelplanner HTTP client.
#[derive(Debug)]
pub enum TravelplannerError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// XML deserialization failed
    Xml {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// The response carried an `errorCode` attribute
    Service { code: String, text: String },

    /// Rate limited by the API
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,

    /// No API key configured
    MissingApiKey,

    /// No base URL configured
    MissingBaseUrl,

    /// A stop ID in the request could not be converted
    InvalidRequest(InvalidSiteId),

    /// The response could not be converted to domain types
    Conversion(ConversionError),
}

impl fmt::Display for TravelplannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelplannerError::Http(e) => write!(f, "HTTP error: {e}"),
            TravelplannerError::Xml { message, body } => {
                write!(f, "XML parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            TravelplannerError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            TravelplannerError::Service { code, text } => {
                write!(f, "travel planner error {code}: {text}")
            }
            TravelplannerError::RateLimited => write!(f, "rate limited by travel planner API"),
            TravelplannerError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
            TravelplannerError::MissingApiKey => write!(f, "missing api key"),
            TravelplannerError::MissingBaseUrl => write!(f, "missing base url"),
            TravelplannerError::InvalidRequest(e) => write!(f, "invalid request: {e}"),
            TravelplannerError::Conversion(e) => write!(f, "conversion error: {e}"),
        }
    }
}

impl std::error::Error for TravelplannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TravelplannerError::Http(e) => Some(e),
            TravelplannerError::InvalidRequest(e) => Some(e),
            TravelplannerError::Conversion(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TravelplannerError {
    fn from(err: reqwest::Error) -> Self {
        TravelplannerError::Http(err)
    }
}

impl From<InvalidSiteId> for TravelplannerError {
    fn from(err: InvalidSiteId) -> Self {
        TravelplannerError::InvalidRequest(err)
    }
}

impl From<ConversionError> for TravelplannerError {
    fn from(err: ConversionError) -> Self {
        TravelplannerError::Conversion(err)
    }
}
