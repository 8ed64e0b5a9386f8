//! Leg polylines.
//!
//! The travel planner returns a leg's path as a flat list of numbers. When
//! the polyline is delta-encoded, the first pair is absolute and every
//! later value is an offset from the previous point on the same axis.

/// Error returned when a coordinate list cannot be split into pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("malformed polyline: expected an even number of coordinates, got {len}")]
pub struct MalformedPolyline {
    len: usize,
}

impl MalformedPolyline {
    /// The length of the rejected coordinate list.
    pub fn coord_count(&self) -> usize {
        self.len
    }
}

/// Decode a flat coordinate list into pairs.
///
/// Without `delta` the values are reshaped into consecutive pairs. With
/// `delta` each axis keeps its own running sum across the whole sequence.
///
/// # Examples
///
/// ```
/// use trafiklab::domain::decode_polyline;
///
/// assert_eq!(
///     decode_polyline(&[1.0, 2.0, 3.0, 4.0], false).unwrap(),
///     vec![(1.0, 2.0), (3.0, 4.0)]
/// );
/// assert_eq!(
///     decode_polyline(&[1.0, 2.0, 3.0, 4.0], true).unwrap(),
///     vec![(1.0, 2.0), (4.0, 6.0)]
/// );
/// assert!(decode_polyline(&[1.0, 2.0, 3.0], false).is_err());
/// ```
pub fn decode_polyline(coords: &[f64], delta: bool) -> Result<Vec<(f64, f64)>, MalformedPolyline> {
    if coords.len() % 2 != 0 {
        return Err(MalformedPolyline { len: coords.len() });
    }

    let mut points = Vec::with_capacity(coords.len() / 2);
    let mut last: Option<(f64, f64)> = None;

    for pair in coords.chunks_exact(2) {
        let point = match last {
            Some((x, y)) if delta => (x + pair[0], y + pair[1]),
            _ => (pair[0], pair[1]),
        };
        points.push(point);
        last = Some(point);
    }

    Ok(points)
}

/// A leg's path as returned by the travel planner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// Coordinate system, e.g. "WGS84"
    pub kind: String,
    /// Number of dimensions
    pub dim: String,
    /// Provider-encoded coordinate string, when sent instead of `coords`
    pub encoded: Option<String>,
    /// Whether `coords` are deltas after the first pair
    pub delta: bool,
    /// Flat coordinate list
    pub coords: Vec<f64>,
}

impl Polyline {
    /// Decode this polyline's coordinates using its own delta flag.
    pub fn coordinates(&self) -> Result<Vec<(f64, f64)>, MalformedPolyline> {
        decode_polyline(&self.coords, self.delta)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Output has exactly half as many points as input values.
        #[test]
        fn half_length(pairs in proptest::collection::vec((-1000i32..1000, -1000i32..1000), 0..50), delta in any::<bool>()) {
            let flat: Vec<f64> = pairs.iter().flat_map(|&(x, y)| [f64::from(x), f64::from(y)]).collect();
            prop_assert_eq!(decode_polyline(&flat, delta).unwrap().len(), pairs.len());
        }

        /// Decoding deltas of absolute points recovers the points.
        #[test]
        fn delta_inverts_differences(pairs in proptest::collection::vec((-1000i32..1000, -1000i32..1000), 1..50)) {
            let mut flat = vec![f64::from(pairs[0].0), f64::from(pairs[0].1)];
            for w in pairs.windows(2) {
                flat.push(f64::from(w[1].0 - w[0].0));
                flat.push(f64::from(w[1].1 - w[0].1));
            }
            let expected: Vec<(f64, f64)> = pairs.iter().map(|&(x, y)| (f64::from(x), f64::from(y))).collect();
            prop_assert_eq!(decode_polyline(&flat, true).unwrap(), expected);
        }
    }
}
