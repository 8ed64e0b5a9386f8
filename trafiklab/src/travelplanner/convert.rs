//! Conversion from Travelplanner DTOs to domain types.

use tracing::warn;

use crate::domain::{
    Fare, FareSet, Leg, LegType, Location, Message, Note, Polyline, Product, ServiceDay, Stop,
    TimeError, Trip, parse_iso_duration,
};

use super::types::{
    FareSetItem, JourneyDetail, LegItem, LocationItem, MessageItem, NoteItem, PolylineItem,
    ProductItem, ServiceDays, StopItem, TripItem, TripList,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// The trip duration is not an ISO 8601 duration
    #[error("invalid duration {value:?}: {source}")]
    InvalidDuration { value: String, source: TimeError },
}

/// A trip search or reconstruction result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripsResponse {
    /// Scroll context for earlier trips
    pub scr_b: Option<String>,
    /// Scroll context for later trips
    pub scr_f: Option<String>,
    pub trips: Vec<Trip>,
}

impl TripsResponse {
    /// A copy with [`Trip::combine_walks`] applied to every trip.
    #[must_use]
    pub fn combine_walks(&self) -> TripsResponse {
        TripsResponse {
            trips: self.trips.iter().map(Trip::combine_walks).collect(),
            ..self.clone()
        }
    }
}

/// Convert a `<TripList>` document.
pub fn convert_trip_list(list: &TripList) -> Result<TripsResponse, ConversionError> {
    let trips = list
        .trips
        .iter()
        .map(convert_trip)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TripsResponse {
        scr_b: list.scr_b.clone(),
        scr_f: list.scr_f.clone(),
        trips,
    })
}

pub fn convert_trip(item: &TripItem) -> Result<Trip, ConversionError> {
    let duration = item
        .duration
        .as_deref()
        .map(|value| {
            parse_iso_duration(value).map_err(|source| ConversionError::InvalidDuration {
                value: value.to_string(),
                source,
            })
        })
        .transpose()?;

    let legs = item
        .leg_list
        .as_ref()
        .map(|list| list.legs.iter().map(convert_leg).collect())
        .unwrap_or_default();

    let fares = item
        .tariff_result
        .as_ref()
        .map(|tariff| tariff.fare_sets.iter().map(convert_fare_set).collect())
        .unwrap_or_default();

    Ok(Trip {
        idx: item.idx.unwrap_or(0),
        trip_id: item.trip_id.clone().unwrap_or_default(),
        ctx_recon: item.ctx_recon.clone().unwrap_or_default(),
        checksum: item.checksum.clone().unwrap_or_default(),
        valid: item.valid.unwrap_or(true),
        duration,
        service_days: item.service_days.iter().map(convert_service_days).collect(),
        legs,
        fares,
    })
}

pub fn convert_leg(item: &LegItem) -> Leg {
    let leg_type = item
        .leg_type
        .as_deref()
        .map(LegType::parse)
        .unwrap_or_else(|| LegType::Other(String::new()));

    Leg {
        idx: item.idx.unwrap_or(0),
        distance: item.dist.unwrap_or(0),
        cancelled: item.cancelled.unwrap_or(false),
        reachable: item.reachable.unwrap_or(true),
        name: item.name.clone().unwrap_or_default(),
        number: item.number.clone(),
        category: item.category.clone(),
        direction: item.direction.clone(),
        origin: item.origin.as_ref().map(convert_location).unwrap_or_default(),
        destination: item
            .destination
            .as_ref()
            .map(convert_location)
            .unwrap_or_default(),
        journey_detail_ref: item
            .journey_detail_ref
            .as_ref()
            .and_then(|r| r.reference.clone()),
        journey_status: item.journey_status.clone(),
        product: item.product.as_ref().map(convert_product),
        polyline: item.polyline.as_ref().map(convert_polyline),
        stops: item
            .stops
            .as_ref()
            .map(|s| s.stops.iter().map(convert_stop).collect())
            .unwrap_or_default(),
        messages: item
            .messages
            .as_ref()
            .map(|m| m.messages.iter().map(convert_message).collect())
            .unwrap_or_default(),
        notes: item
            .notes
            .as_ref()
            .map(|n| n.notes.iter().map(convert_note).collect())
            .unwrap_or_default(),
        leg_type,
    }
}

/// Convert a `<JourneyDetail>` document into a leg.
///
/// The leg's origin and destination are taken from the first and last
/// stop of the run.
pub fn convert_journey_detail(detail: &JourneyDetail) -> Leg {
    let stops: Vec<Stop> = detail
        .stops
        .as_ref()
        .map(|s| s.stops.iter().map(convert_stop).collect())
        .unwrap_or_default();

    if detail.products.len() > 1 {
        warn!(
            count = detail.products.len(),
            "journey detail has several products, using the first"
        );
    }
    let product = detail.products.first().map(convert_product);

    let mut leg = Leg::new(LegType::Journey);
    if let Some(first) = stops.first() {
        leg.origin = Location {
            id: first.id.clone(),
            ext_id: first.ext_id.clone(),
            name: first.name.clone(),
            lon: first.lon,
            lat: first.lat,
            date: first.departure_date.clone(),
            time: first.departure_time.clone(),
            rt_date: first.rt_departure_date.clone(),
            rt_time: first.rt_departure_time.clone(),
            track: first.departure_track.clone(),
            ..Location::default()
        };
    }
    if let Some(last) = stops.last() {
        leg.destination = Location {
            id: last.id.clone(),
            ext_id: last.ext_id.clone(),
            name: last.name.clone(),
            lon: last.lon,
            lat: last.lat,
            date: last.arrival_date.clone(),
            time: last.arrival_time.clone(),
            rt_date: last.rt_arrival_date.clone(),
            rt_time: last.rt_arrival_time.clone(),
            track: last.arrival_track.clone(),
            ..Location::default()
        };
    }
    if let Some(p) = &product {
        leg.name = p.name.clone();
        leg.number = p.num.clone();
    }

    leg.product = product;
    leg.polyline = detail.polyline.as_ref().map(convert_polyline);
    leg.messages = detail
        .messages
        .as_ref()
        .map(|m| m.messages.iter().map(convert_message).collect())
        .unwrap_or_default();
    leg.stops = stops;
    leg
}

fn convert_location(item: &LocationItem) -> Location {
    Location {
        id: item.id.clone().unwrap_or_default(),
        ext_id: item.ext_id.clone().unwrap_or_default(),
        name: item.name.clone().unwrap_or_default(),
        kind: item.location_type.clone().unwrap_or_default(),
        lon: item.lon.unwrap_or_default(),
        lat: item.lat.unwrap_or_default(),
        has_main_mast: item.has_main_mast.unwrap_or(false),
        main_mast_id: item.main_mast_id.clone(),
        main_mast_ext_id: item.main_mast_ext_id.clone(),
        date: item.date.clone(),
        time: item.time.clone(),
        rt_date: item.rt_date.clone(),
        rt_time: item.rt_time.clone(),
        track: item.track.clone(),
        prognosis_type: item.prognosis_type.clone(),
    }
}

fn convert_stop(item: &StopItem) -> Stop {
    Stop {
        id: item.id.clone().unwrap_or_default(),
        ext_id: item.ext_id.clone().unwrap_or_default(),
        name: item.name.clone().unwrap_or_default(),
        route_idx: item.route_idx.unwrap_or(0),
        lon: item.lon.unwrap_or_default(),
        lat: item.lat.unwrap_or_default(),
        departure_date: item.dep_date.clone(),
        departure_time: item.dep_time.clone(),
        rt_departure_date: item.rt_dep_date.clone(),
        rt_departure_time: item.rt_dep_time.clone(),
        arrival_date: item.arr_date.clone(),
        arrival_time: item.arr_time.clone(),
        rt_arrival_date: item.rt_arr_date.clone(),
        rt_arrival_time: item.rt_arr_time.clone(),
        departure_track: item.dep_track.clone(),
        arrival_track: item.arr_track.clone(),
    }
}

fn convert_product(item: &ProductItem) -> Product {
    Product {
        name: item.name.clone().unwrap_or_default(),
        num: item.num.clone(),
        line: item.line.clone(),
        category_code: item.cat_code,
        category_in: item.cat_in.clone(),
        category_out: item.cat_out.clone(),
        category_out_short: item.cat_out_s.clone(),
        category_out_locale: item.cat_out_l.clone(),
        operator: item.operator.clone(),
        operator_code: item.operator_code.clone(),
        admin: item.admin.clone(),
    }
}

fn convert_polyline(item: &PolylineItem) -> Polyline {
    Polyline {
        kind: item.kind.clone().unwrap_or_default(),
        dim: item.dim.clone().unwrap_or_default(),
        encoded: item.crd_enc_s.clone(),
        delta: item.delta.unwrap_or(false),
        coords: item.crd.clone(),
    }
}

fn convert_message(item: &MessageItem) -> Message {
    Message {
        id: item.id.clone().unwrap_or_default(),
        active: item.act.unwrap_or(false),
        head: item.head.clone().unwrap_or_default(),
        text: item.text.clone().unwrap_or_default(),
        priority: item.priority,
        category: item.category.clone(),
        products: item.products,
        start_date: item.s_date.clone(),
        start_time: item.s_time.clone(),
        end_date: item.e_date.clone(),
        end_time: item.e_time.clone(),
    }
}

fn convert_note(item: &NoteItem) -> Note {
    Note {
        priority: item.priority,
        text: item.text.clone(),
    }
}

fn convert_service_days(item: &ServiceDays) -> ServiceDay {
    ServiceDay {
        planning_period_begin: item.planning_period_begin.clone(),
        planning_period_end: item.planning_period_end.clone(),
        regular: item.s_days_r.clone(),
        irregular: item.s_days_i.clone(),
        bitfield: item.s_days_b.clone(),
    }
}

fn convert_fare_set(item: &FareSetItem) -> FareSet {
    FareSet {
        name: item.name.clone().unwrap_or_default(),
        description: item.desc.clone().unwrap_or_default(),
        fares: item
            .fares
            .iter()
            .map(|f| Fare {
                name: f.name.clone().unwrap_or_default(),
                description: f.desc.clone().unwrap_or_default(),
                currency: f.cur.clone().unwrap_or_default(),
                price: f.price,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::travelplanner::types::{LegList, Stops};
    use chrono::Duration;

    fn walk_item(dist: u32) -> LegItem {
        LegItem {
            leg_type: Some("WALK".into()),
            dist: Some(dist),
            ..LegItem::default()
        }
    }

    fn metro_item() -> LegItem {
        LegItem {
            leg_type: Some("JNY".into()),
            name: Some("Tunnelbana 13".into()),
            product: Some(ProductItem {
                line: Some("13".into()),
                ..ProductItem::default()
            }),
            ..LegItem::default()
        }
    }

    #[test]
    fn convert_leg_defaults() {
        let leg = convert_leg(&LegItem::default());
        assert_eq!(leg.leg_type, LegType::Other(String::new()));
        assert!(leg.reachable);
        assert!(!leg.cancelled);
        assert!(leg.stops.is_empty());
    }

    #[test]
    fn convert_trip_fields() {
        let item = TripItem {
            idx: Some(2),
            trip_id: Some("C-2".into()),
            duration: Some("PT1H5M".into()),
            leg_list: Some(LegList {
                legs: vec![walk_item(100), metro_item()],
            }),
            ..TripItem::default()
        };

        let trip = convert_trip(&item).unwrap();
        assert_eq!(trip.idx, 2);
        assert_eq!(trip.trip_id, "C-2");
        assert_eq!(trip.duration, Some(Duration::minutes(65)));
        assert!(trip.valid);
        assert_eq!(trip.legs.len(), 2);
        assert!(trip.legs[0].is_walk());
        assert_eq!(trip.legs[1].line(), "13");
    }

    #[test]
    fn bad_duration_is_error() {
        let item = TripItem {
            duration: Some("23 minutes".into()),
            ..TripItem::default()
        };
        let err = convert_trip(&item).unwrap_err();
        assert!(err.to_string().contains("23 minutes"));
    }

    #[test]
    fn response_combine_walks_applies_to_every_trip() {
        let list = TripList {
            trips: vec![
                TripItem {
                    leg_list: Some(LegList {
                        legs: vec![walk_item(10), walk_item(20), metro_item()],
                    }),
                    ..TripItem::default()
                },
                TripItem {
                    leg_list: Some(LegList {
                        legs: vec![metro_item(), walk_item(100), metro_item()],
                    }),
                    ..TripItem::default()
                },
            ],
            ..TripList::default()
        };

        let response = convert_trip_list(&list).unwrap();
        let combined = response.combine_walks();
        assert_eq!(combined.trips[0].legs.len(), 1);
        assert_eq!(combined.trips[1].legs.len(), 2);
        // Input untouched
        assert_eq!(response.trips[0].legs.len(), 3);
    }

    #[test]
    fn journey_detail_endpoints_from_stops() {
        let detail = JourneyDetail {
            stops: Some(Stops {
                stops: vec![
                    StopItem {
                        name: Some("Slussen".into()),
                        dep_date: Some("2024-03-15".into()),
                        dep_time: Some("10:05:00".into()),
                        ..StopItem::default()
                    },
                    StopItem {
                        name: Some("T-Centralen".into()),
                        arr_date: Some("2024-03-15".into()),
                        arr_time: Some("10:08:00".into()),
                        ..StopItem::default()
                    },
                ],
            }),
            products: vec![ProductItem {
                name: Some("Tunnelbana 13".into()),
                ..ProductItem::default()
            }],
            ..JourneyDetail::default()
        };

        let leg = convert_journey_detail(&detail);
        assert_eq!(leg.leg_type, LegType::Journey);
        assert_eq!(leg.name, "Tunnelbana 13");
        assert_eq!(leg.origin.name, "Slussen");
        assert_eq!(leg.destination.name, "T-Centralen");
        assert_eq!(leg.stops.len(), 2);

        let dep = leg.origin.times().unwrap().unwrap();
        let arr = leg.destination.times().unwrap().unwrap();
        assert_eq!(arr.scheduled - dep.scheduled, Duration::minutes(3));
    }
}
