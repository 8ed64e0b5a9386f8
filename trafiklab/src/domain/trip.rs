//! Trip types and post-processing.
//!
//! A `Trip` is one journey option returned by a trip search: an ordered
//! list of legs. Raw results carry many tiny connector walks, so trips are
//! cleaned up with [`Trip::combine_walks`] before display, and
//! [`Trip::each_leg_contextual`] walks the legs with their transport
//! neighbours for rendering.

use chrono::Duration;
use tracing::trace;

use super::leg::Leg;
use super::time::{TimeError, TimePair};

/// Distance thresholds for dropping short walks.
///
/// A walk survives only if it is strictly longer than its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkPolicy {
    /// Threshold for leading and trailing walks (meters)
    pub min_edge_walk: u32,
    /// Threshold for walks between two transport legs (meters)
    pub min_intermediate_walk: u32,
}

impl WalkPolicy {
    pub fn new(min_edge_walk: u32, min_intermediate_walk: u32) -> Self {
        Self {
            min_edge_walk,
            min_intermediate_walk,
        }
    }

    fn keeps(&self, leg: &Leg, intermediate: bool) -> bool {
        if leg.is_transport() {
            return true;
        }
        let threshold = if intermediate {
            self.min_intermediate_walk
        } else {
            self.min_edge_walk
        };
        leg.distance > threshold
    }
}

impl Default for WalkPolicy {
    fn default() -> Self {
        Self {
            min_edge_walk: 40,
            min_intermediate_walk: 150,
        }
    }
}

/// Merge adjacent walks and drop short ones.
///
/// 1. Consecutive walk legs merge into the first: distances add up and the
///    destination becomes the last walk's destination.
/// 2. A merged walk is intermediate if a transport leg precedes it and it
///    is not the last leg. Intermediate walks need more than
///    `min_intermediate_walk` meters to survive, other walks more than
///    `min_edge_walk`.
///
/// Surviving legs keep their order and are renumbered from 0.
pub fn combine_walks(legs: &[Leg], policy: &WalkPolicy) -> Vec<Leg> {
    let mut merged: Vec<Leg> = Vec::with_capacity(legs.len());
    for leg in legs {
        match merged.last_mut() {
            Some(prev) if prev.is_walk() && leg.is_walk() => {
                prev.distance = prev.distance.saturating_add(leg.distance);
                prev.destination = leg.destination.clone();
            }
            _ => merged.push(leg.clone()),
        }
    }
    let merged_count = merged.len();

    let last = merged_count.saturating_sub(1);
    let mut intermediate = false;
    let mut kept = Vec::with_capacity(merged_count);
    for (i, leg) in merged.into_iter().enumerate() {
        if leg.is_transport() {
            intermediate = true;
        }
        if i == last {
            intermediate = false;
        }
        if policy.keeps(&leg, intermediate) {
            kept.push(leg);
        }
    }

    for (i, leg) in kept.iter_mut().enumerate() {
        leg.idx = u32::try_from(i).unwrap_or(u32::MAX);
    }

    trace!(
        legs = legs.len(),
        merged = merged_count,
        kept = kept.len(),
        "combined walks"
    );
    kept
}

/// A leg together with its neighbours, as seen by
/// [`Trip::each_leg_contextual`].
#[derive(Debug, Clone, Copy)]
pub struct LegContext<'a> {
    /// Position of `leg` in the trip
    pub index: usize,
    pub leg: &'a Leg,
    /// The leg immediately before
    pub prev: Option<&'a Leg>,
    /// The nearest earlier non-walk leg
    pub prev_transport: Option<&'a Leg>,
    /// The leg immediately after
    pub next: Option<&'a Leg>,
    /// The nearest later non-walk leg
    pub next_transport: Option<&'a Leg>,
}

/// A fare zone/ticket group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FareSet {
    pub name: String,
    pub description: String,
    pub fares: Vec<Fare>,
}

/// A single ticket price.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fare {
    pub name: String,
    pub description: String,
    pub currency: String,
    /// Price in the currency's minor unit
    pub price: Option<i64>,
}

/// Service-day validity of a trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceDay {
    pub planning_period_begin: Option<String>,
    pub planning_period_end: Option<String>,
    /// Regular days, human readable
    pub regular: Option<String>,
    /// Irregular days, human readable
    pub irregular: Option<String>,
    /// Validity bitfield over the planning period (hex)
    pub bitfield: Option<String>,
}

/// One journey option from a trip search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trip {
    pub idx: u32,
    pub trip_id: String,
    /// Context token for a reconstruction request
    pub ctx_recon: String,
    pub checksum: String,
    pub valid: bool,
    pub duration: Option<Duration>,
    pub service_days: Vec<ServiceDay>,
    pub legs: Vec<Leg>,
    pub fares: Vec<FareSet>,
}

impl Trip {
    /// A copy of this trip with walks merged and pruned under the default
    /// policy (40 m edge, 150 m intermediate).
    #[must_use]
    pub fn combine_walks(&self) -> Trip {
        self.combine_walks_with(&WalkPolicy::default())
    }

    /// A copy of this trip with walks merged and pruned under `policy`.
    #[must_use]
    pub fn combine_walks_with(&self, policy: &WalkPolicy) -> Trip {
        Trip {
            legs: combine_walks(&self.legs, policy),
            ..self.clone()
        }
    }

    /// Visit each leg in order with its neighbours.
    ///
    /// Stops at the first error returned by `visit` and returns it
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use trafiklab::domain::{Leg, LegType, Trip};
    ///
    /// let trip = Trip {
    ///     legs: vec![Leg::walk(100), Leg::new(LegType::Journey), Leg::walk(60)],
    ///     ..Trip::default()
    /// };
    ///
    /// let mut walks_to_transport = 0;
    /// trip.each_leg_contextual(|ctx| {
    ///     if ctx.leg.is_walk() && ctx.next_transport.is_some() {
    ///         walks_to_transport += 1;
    ///     }
    ///     Ok::<(), ()>(())
    /// })
    /// .unwrap();
    /// assert_eq!(walks_to_transport, 1);
    /// ```
    pub fn each_leg_contextual<'a, E, F>(&'a self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(LegContext<'a>) -> Result<(), E>,
    {
        let mut prev_transport = None;

        for (index, leg) in self.legs.iter().enumerate() {
            let rest = &self.legs[index + 1..];
            visit(LegContext {
                index,
                leg,
                prev: index.checked_sub(1).and_then(|i| self.legs.get(i)),
                prev_transport,
                next: rest.first(),
                next_transport: rest.iter().find(|l| l.is_transport()),
            })?;

            if leg.is_transport() {
                prev_transport = Some(leg);
            }
        }

        Ok(())
    }

    /// The non-walk legs.
    pub fn transport_legs(&self) -> impl Iterator<Item = &Leg> {
        self.legs.iter().filter(|l| l.is_transport())
    }

    /// Number of vehicle changes.
    pub fn change_count(&self) -> usize {
        self.transport_legs().count().saturating_sub(1)
    }

    /// Total walking distance in meters.
    pub fn walk_distance(&self) -> u32 {
        self.legs
            .iter()
            .filter(|l| l.is_walk())
            .fold(0, |acc, l| acc.saturating_add(l.distance))
    }

    /// Departure times at the first leg's origin.
    pub fn departure(&self) -> Result<Option<TimePair>, TimeError> {
        match self.legs.first() {
            Some(leg) => leg.origin.times(),
            None => Ok(None),
        }
    }

    /// Arrival times at the last leg's destination.
    pub fn arrival(&self) -> Result<Option<TimePair>, TimeError> {
        match self.legs.last() {
            Some(leg) => leg.destination.times(),
            None => Ok(None),
        }
    }

    /// Whether any leg has been cancelled.
    pub fn has_cancellation(&self) -> bool {
        self.legs.iter().any(|l| l.cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LegType, Location};

    fn bus() -> Leg {
        Leg::new(LegType::Journey)
    }

    fn named_walk(distance: u32, from: &str, to: &str) -> Leg {
        let mut leg = Leg::walk(distance);
        leg.origin = Location {
            name: from.into(),
            ..Location::default()
        };
        leg.destination = Location {
            name: to.into(),
            ..Location::default()
        };
        leg
    }

    fn trip(legs: Vec<Leg>) -> Trip {
        Trip {
            legs,
            ..Trip::default()
        }
    }

    fn shape(legs: &[Leg]) -> Vec<(bool, u32)> {
        legs.iter().map(|l| (l.is_walk(), l.distance)).collect()
    }

    #[test]
    fn short_merged_leading_walk_dropped() {
        let t = trip(vec![Leg::walk(10), Leg::walk(20), bus(), Leg::walk(50)]);
        let out = t.combine_walks();
        // 10 + 20 = 30 is not over the 40 m edge threshold
        assert_eq!(shape(&out.legs), vec![(false, 0), (true, 50)]);
    }

    #[test]
    fn merged_leading_walk_kept() {
        let t = trip(vec![Leg::walk(20), Leg::walk(30), bus()]);
        let out = t.combine_walks();
        assert_eq!(shape(&out.legs), vec![(true, 50), (false, 0)]);
        assert_eq!(out.legs[0].idx, 0);
        assert_eq!(out.legs[1].idx, 1);
    }

    #[test]
    fn merged_walk_keeps_first_origin_and_last_destination() {
        let t = trip(vec![
            named_walk(30, "A", "B"),
            named_walk(40, "B", "C"),
            named_walk(50, "C", "D"),
            bus(),
        ]);
        let out = t.combine_walks();
        assert_eq!(out.legs.len(), 2);
        assert_eq!(out.legs[0].distance, 120);
        assert_eq!(out.legs[0].origin.name, "A");
        assert_eq!(out.legs[0].destination.name, "D");
    }

    #[test]
    fn intermediate_walk_thresholds() {
        let dropped = trip(vec![bus(), Leg::walk(100), bus()]).combine_walks();
        assert_eq!(shape(&dropped.legs), vec![(false, 0), (false, 0)]);

        let kept = trip(vec![bus(), Leg::walk(200), bus()]).combine_walks();
        assert_eq!(
            shape(&kept.legs),
            vec![(false, 0), (true, 200), (false, 0)]
        );

        // Exactly on the threshold is dropped
        let edge = trip(vec![bus(), Leg::walk(150), bus()]).combine_walks();
        assert_eq!(edge.legs.len(), 2);
    }

    #[test]
    fn edge_walk_thresholds() {
        let t = trip(vec![Leg::walk(40), bus(), Leg::walk(41)]);
        assert_eq!(shape(&t.combine_walks().legs), vec![(false, 0), (true, 41)]);

        // A leading walk uses the edge threshold even though it's short of 150
        let t = trip(vec![Leg::walk(100), bus()]);
        assert_eq!(t.combine_walks().legs.len(), 2);
    }

    #[test]
    fn trailing_walk_uses_edge_threshold() {
        let t = trip(vec![bus(), Leg::walk(100)]);
        assert_eq!(shape(&t.combine_walks().legs), vec![(false, 0), (true, 100)]);
    }

    #[test]
    fn merge_happens_before_pruning() {
        // 80 + 80 = 160 > 150 so the merged intermediate walk survives
        let t = trip(vec![bus(), Leg::walk(80), Leg::walk(80), bus()]);
        assert_eq!(
            shape(&t.combine_walks().legs),
            vec![(false, 0), (true, 160), (false, 0)]
        );
    }

    #[test]
    fn walk_only_trips() {
        let t = trip(vec![Leg::walk(20), Leg::walk(30)]);
        assert_eq!(shape(&t.combine_walks().legs), vec![(true, 50)]);

        let t = trip(vec![Leg::walk(20), Leg::walk(10)]);
        assert!(t.combine_walks().legs.is_empty());
    }

    #[test]
    fn empty_trip() {
        assert!(trip(vec![]).combine_walks().legs.is_empty());
    }

    #[test]
    fn original_trip_untouched() {
        let t = trip(vec![Leg::walk(10), Leg::walk(20), bus()]);
        let _ = t.combine_walks();
        assert_eq!(t.legs.len(), 3);
        assert_eq!(t.legs[0].distance, 10);
    }

    #[test]
    fn renumbers_legs() {
        let mut legs = vec![Leg::walk(10), Leg::walk(50), bus(), Leg::walk(5), bus()];
        for (i, leg) in legs.iter_mut().enumerate() {
            leg.idx = i as u32 + 1;
        }
        let out = trip(legs).combine_walks();
        let idx: Vec<u32> = out.legs.iter().map(|l| l.idx).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn custom_policy() {
        let t = trip(vec![Leg::walk(10), bus(), Leg::walk(100), bus()]);
        let out = t.combine_walks_with(&WalkPolicy::new(0, 50));
        assert_eq!(
            shape(&out.legs),
            vec![(true, 10), (false, 0), (true, 100), (false, 0)]
        );
    }

    #[test]
    fn contextual_neighbours() {
        let t = trip(vec![Leg::walk(1), bus(), Leg::walk(3)]);
        let mut seen = Vec::new();

        t.each_leg_contextual(|ctx| {
            seen.push((
                ctx.index,
                ctx.prev.map(|l| l.distance),
                ctx.prev_transport.is_some(),
                ctx.next.map(|l| l.distance),
                ctx.next_transport.is_some(),
            ));
            Ok::<(), ()>(())
        })
        .unwrap();

        assert_eq!(
            seen,
            vec![
                (0, None, false, Some(0), true),
                (1, Some(1), false, Some(3), false),
                (2, Some(0), true, None, false),
            ]
        );
    }

    #[test]
    fn contextual_transport_lookahead_skips_walks() {
        let mut second = bus();
        second.name = "second".into();
        let t = trip(vec![bus(), Leg::walk(1), Leg::walk(2), second, Leg::walk(3)]);

        let mut next_transport = Vec::new();
        let mut prev_transport = Vec::new();
        t.each_leg_contextual(|ctx| {
            next_transport.push(ctx.next_transport.map(|l| l.name.clone()));
            prev_transport.push(ctx.prev_transport.map(|l| l.name.clone()));
            Ok::<(), ()>(())
        })
        .unwrap();

        assert_eq!(
            next_transport,
            vec![
                Some("second".into()),
                Some("second".into()),
                Some("second".into()),
                None,
                None
            ]
        );
        assert_eq!(
            prev_transport,
            vec![
                None,
                Some(String::new()),
                Some(String::new()),
                Some(String::new()),
                Some("second".into())
            ]
        );
    }

    #[test]
    fn contextual_stops_on_error() {
        let t = trip(vec![bus(), Leg::walk(1), bus(), Leg::walk(2)]);
        let mut visited = Vec::new();

        let result = t.each_leg_contextual(|ctx| {
            visited.push(ctx.index);
            if ctx.index == 1 {
                return Err("boom");
            }
            Ok(())
        });

        assert_eq!(result, Err("boom"));
        assert_eq!(visited, vec![0, 1]);
    }

    #[test]
    fn contextual_empty_trip() {
        let mut calls = 0;
        let result = trip(vec![]).each_leg_contextual(|_| {
            calls += 1;
            Ok::<(), ()>(())
        });
        assert!(result.is_ok());
        assert_eq!(calls, 0);
    }

    #[test]
    fn summary_helpers() {
        let mut t = trip(vec![Leg::walk(100), bus(), Leg::walk(200), bus()]);
        assert_eq!(t.change_count(), 1);
        assert_eq!(t.walk_distance(), 300);
        assert_eq!(t.transport_legs().count(), 2);
        assert!(!t.has_cancellation());

        t.legs[1].cancelled = true;
        assert!(t.has_cancellation());
    }

    #[test]
    fn departure_and_arrival() {
        let mut first = Leg::walk(100);
        first.origin.date = Some("2024-03-15".into());
        first.origin.time = Some("10:00:00".into());
        let mut last = bus();
        last.destination.date = Some("2024-03-15".into());
        last.destination.time = Some("10:30:00".into());

        let t = trip(vec![first, last]);
        let dep = t.departure().unwrap().unwrap();
        let arr = t.arrival().unwrap().unwrap();
        assert_eq!(arr.scheduled - dep.scheduled, Duration::minutes(30));

        assert_eq!(trip(vec![]).departure().unwrap(), None);
    }
}
