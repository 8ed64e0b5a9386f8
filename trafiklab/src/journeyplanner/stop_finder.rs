//! Stop finder requests.

use crate::domain::{InvalidStopFilter, LatLng, StopFilter};

use super::error::JourneyPlannerError;

/// How the stop finder interprets `name_sf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Free-text search
    Any,
    /// A `lng:lat:WGS84[dd.ddddd]` position
    Coord,
}

impl SearchType {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Any => "any",
            SearchType::Coord => "coord",
        }
    }
}

/// A `/stop-finder` query.
///
/// # Examples
///
/// ```
/// use trafiklab::journeyplanner::StopFinderRequest;
///
/// let req = StopFinderRequest::by_name("Slussen", ["stop", "poi"]).unwrap();
/// assert_eq!(
///     req.query().unwrap(),
///     vec![
///         ("name_sf", "Slussen".to_string()),
///         ("type_sf", "any".to_string()),
///         ("any_obj_filter_sf", "34".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StopFinderRequest {
    pub name: String,
    pub search_type: SearchType,
    pub filter: StopFilter,
}

impl StopFinderRequest {
    /// Search by free text, filtered by API kind names ("stop", "poi", ...).
    pub fn by_name<I, S>(name: impl Into<String>, filter: I) -> Result<Self, InvalidStopFilter>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            name: name.into(),
            search_type: SearchType::Any,
            filter: StopFilter::from_names(filter)?,
        })
    }

    /// Search around a position, filtered by API kind names.
    pub fn by_position<I, S>(position: LatLng, filter: I) -> Result<Self, InvalidStopFilter>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            name: position.to_trafiklab_string(),
            search_type: SearchType::Coord,
            filter: StopFilter::from_names(filter)?,
        })
    }

    /// Build the query pairs. Fails on an empty search string.
    pub fn query(&self) -> Result<Vec<(&'static str, String)>, JourneyPlannerError> {
        if self.name.trim().is_empty() {
            return Err(JourneyPlannerError::EmptyStopName);
        }
        Ok(vec![
            ("name_sf", self.name.clone()),
            ("type_sf", self.search_type.as_str().to_string()),
            ("any_obj_filter_sf", self.filter.to_string()),
        ])
    }
}
