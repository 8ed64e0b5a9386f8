//! WGS84 coordinates.

use std::fmt;
use std::str::FromStr;

/// Suffix of the Trafiklab coordinate form, `"lng:lat:WGS84[dd.ddddd]"`.
const TRAFIKLAB_SUFFIX: &str = ":WGS84[dd.ddddd]";

/// Error returned when parsing an invalid coordinate string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate {input:?}: {reason}")]
pub struct InvalidLatLng {
    input: String,
    reason: &'static str,
}

impl InvalidLatLng {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A latitude/longitude pair.
///
/// Parses from either `"lat,lng"` or the Trafiklab form
/// `"lng:lat:WGS84[dd.ddddd]"` (longitude first).
///
/// # Examples
///
/// ```
/// use trafiklab::domain::LatLng;
///
/// let a: LatLng = "59.335104,18.013809".parse().unwrap();
/// let b: LatLng = "18.013809:59.335104:WGS84[dd.ddddd]".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_trafiklab_string(), "18.013809:59.335104:WGS84[dd.ddddd]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as `"lng:lat:WGS84[dd.ddddd]"` with six decimals.
    pub fn to_trafiklab_string(&self) -> String {
        format!(
            "{:.6}:{:.6}{TRAFIKLAB_SUFFIX}",
            self.longitude, self.latitude
        )
    }
}

fn parse_axis(input: &str, part: &str, reason: &'static str) -> Result<f64, InvalidLatLng> {
    let value: f64 = part
        .trim()
        .parse()
        .map_err(|_| InvalidLatLng::new(input, reason))?;
    if !value.is_finite() {
        return Err(InvalidLatLng::new(input, reason));
    }
    Ok(value)
}

impl FromStr for LatLng {
    type Err = InvalidLatLng;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(coords) = s.strip_suffix(TRAFIKLAB_SUFFIX) {
            let Some((lng, lat)) = coords.split_once(':') else {
                return Err(InvalidLatLng::new(s, "expected lng:lat before WGS84 suffix"));
            };
            return Ok(LatLng {
                longitude: parse_axis(s, lng, "invalid longitude")?,
                latitude: parse_axis(s, lat, "invalid latitude")?,
            });
        }

        let Some((lat, lng)) = s.split_once(',') else {
            return Err(InvalidLatLng::new(s, "expected lat,lng"));
        };
        Ok(LatLng {
            latitude: parse_axis(s, lat, "invalid latitude")?,
            longitude: parse_axis(s, lng, "invalid longitude")?,
        })
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
