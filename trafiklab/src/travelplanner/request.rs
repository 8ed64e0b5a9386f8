//! Travelplanner request parameters.
//!
//! Requests are plain structs turned into query pairs by `query()`. Stop
//! identifiers are accepted in legacy site ID form and converted to HAFAS
//! IDs before they are sent. The API key is added by the client.

use chrono::{DateTime, Utc};

use crate::domain::{InvalidSiteId, LatLng, convert_id_to_hafas, to_stockholm};

/// A transport mode in the `products` bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductRef {
    Train,
    Metro,
    Tram,
    Bus,
    Boat,
    Commute,
}

impl ProductRef {
    pub const ALL: [ProductRef; 6] = [
        ProductRef::Train,
        ProductRef::Metro,
        ProductRef::Tram,
        ProductRef::Bus,
        ProductRef::Boat,
        ProductRef::Commute,
    ];

    /// The bits this mode occupies. Boats span two classes.
    pub const fn bits(self) -> u32 {
        match self {
            ProductRef::Train => 1,
            ProductRef::Metro => 2,
            ProductRef::Tram => 4,
            ProductRef::Bus => 8,
            ProductRef::Boat => 96,
            ProductRef::Commute => 128,
        }
    }

    /// Union of the given modes.
    pub fn mask<'a>(products: impl IntoIterator<Item = &'a ProductRef>) -> u32 {
        products.into_iter().fold(0, |acc, p| acc | p.bits())
    }
}

/// Walking preferences at the start or end of a trip.
///
/// Sent as `allow,min,max,linear`, distances in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkPreference {
    pub allow: bool,
    pub min: u32,
    pub max: u32,
    /// Use straight-line distance instead of the footpath network
    pub linear: bool,
}

impl WalkPreference {
    fn to_param(self) -> String {
        format!(
            "{},{},{},{}",
            flag(self.allow),
            self.min,
            self.max,
            flag(self.linear)
        )
    }
}

fn flag(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

/// Query pairs in the order they are sent.
pub type Query = Vec<(&'static str, String)>;

/// Parameters for a `trip.xml` search.
///
/// # Examples
///
/// ```
/// use trafiklab::travelplanner::TripsRequest;
///
/// let req = TripsRequest::between("9192", "9306");
/// let query = req.query().unwrap();
/// assert!(query.contains(&("originId", "300109192".to_string())));
/// assert!(query.contains(&("lang", "en".to_string())));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripsRequest {
    /// Response language, "en" when unset
    pub lang: Option<String>,
    pub origin_id: Option<String>,
    pub origin_ext_id: Option<String>,
    pub origin_coord: Option<LatLng>,
    pub dest_id: Option<String>,
    pub dest_ext_id: Option<String>,
    pub dest_coord: Option<LatLng>,
    /// Several via stops, sent `;`-separated
    pub via: Vec<String>,
    pub via_id: Option<String>,
    /// Minutes to wait at the via stop
    pub via_wait_time: Option<u32>,
    /// Stops to avoid, sent `;`-separated as given
    pub avoid: Vec<String>,
    pub avoid_id: Option<String>,
    pub change_time_percent: Option<u32>,
    pub min_change_time: Option<u32>,
    pub max_change_time: Option<u32>,
    pub add_change_time: Option<u32>,
    pub max_change: Option<u32>,
    /// Departure (or arrival) time; sent in Stockholm local time
    pub time: Option<DateTime<Utc>>,
    pub search_for_arrival: bool,
    /// Number of trips after `time`
    pub num_f: Option<u32>,
    /// Number of trips before `time`
    pub num_b: Option<u32>,
    /// Modes to use. Takes precedence over `avoid_products`.
    pub products: Vec<ProductRef>,
    /// Modes to leave out
    pub avoid_products: Vec<ProductRef>,
    pub lines: Vec<String>,
    /// Scroll context from a previous response
    pub context: Option<String>,
    /// Include leg polylines
    pub poly: bool,
    /// Include intermediate stops
    pub passlist: bool,
    pub origin_walk: Option<WalkPreference>,
    pub dest_walk: Option<WalkPreference>,
}

impl TripsRequest {
    /// A search from one site to another.
    pub fn between(origin_id: impl Into<String>, dest_id: impl Into<String>) -> Self {
        Self {
            origin_id: Some(origin_id.into()),
            dest_id: Some(dest_id.into()),
            ..Self::default()
        }
    }

    /// Set the departure time.
    pub fn departing_at(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self.search_for_arrival = false;
        self
    }

    /// Set the arrival time.
    pub fn arriving_at(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self.search_for_arrival = true;
        self
    }

    /// Request polylines and intermediate stops.
    pub fn with_details(mut self) -> Self {
        self.poly = true;
        self.passlist = true;
        self
    }

    /// The `products` bitmask, if any mode selection was made.
    pub fn products_mask(&self) -> Option<u32> {
        if !self.products.is_empty() {
            return Some(ProductRef::mask(&self.products));
        }
        if !self.avoid_products.is_empty() {
            let all = ProductRef::mask(&ProductRef::ALL);
            return Some(all & !ProductRef::mask(&self.avoid_products));
        }
        None
    }

    /// Build the query pairs.
    ///
    /// Fails if any stop ID cannot be converted to HAFAS form.
    pub fn query(&self) -> Result<Query, InvalidSiteId> {
        let mut q: Query = Vec::new();

        q.push(("lang", self.lang.clone().unwrap_or_else(|| "en".to_string())));

        if let Some(id) = &self.origin_id {
            q.push(("originId", convert_id_to_hafas(id)?));
        }
        push_opt(&mut q, "originExtId", self.origin_ext_id.as_ref());
        if let Some(coord) = self.origin_coord {
            q.push(("originCoordLat", coord.latitude.to_string()));
            q.push(("originCoordLong", coord.longitude.to_string()));
        }

        if let Some(id) = &self.dest_id {
            q.push(("destId", convert_id_to_hafas(id)?));
        }
        push_opt(&mut q, "destExtId", self.dest_ext_id.as_ref());
        if let Some(coord) = self.dest_coord {
            q.push(("destCoordLat", coord.latitude.to_string()));
            q.push(("destCoordLong", coord.longitude.to_string()));
        }

        if !self.via.is_empty() {
            let ids = self
                .via
                .iter()
                .map(|id| convert_id_to_hafas(id))
                .collect::<Result<Vec<_>, _>>()?;
            q.push(("via", ids.join(";")));
        }
        if let Some(id) = &self.via_id {
            q.push(("viaId", convert_id_to_hafas(id)?));
        }
        push_opt(&mut q, "viaWaitTime", self.via_wait_time);

        if !self.avoid.is_empty() {
            q.push(("avoid", self.avoid.join(";")));
        }
        if let Some(id) = &self.avoid_id {
            q.push(("avoidId", convert_id_to_hafas(id)?));
        }

        push_opt(&mut q, "changeTimePercent", self.change_time_percent);
        push_opt(&mut q, "minChangeTime", self.min_change_time);
        push_opt(&mut q, "maxChangeTime", self.max_change_time);
        push_opt(&mut q, "addChangeTime", self.add_change_time);
        push_opt(&mut q, "maxChange", self.max_change);

        if let Some(time) = &self.time {
            let local = to_stockholm(time);
            q.push(("date", local.format("%Y-%m-%d").to_string()));
            q.push(("time", local.format("%H:%M").to_string()));
        }
        q.push(("searchForArrival", flag(self.search_for_arrival).to_string()));

        push_opt(&mut q, "numF", self.num_f);
        push_opt(&mut q, "numB", self.num_b);
        push_opt(&mut q, "products", self.products_mask());

        let lines: Vec<&str> = self
            .lines
            .iter()
            .map(String::as_str)
            .filter(|l| !l.is_empty())
            .collect();
        if !lines.is_empty() {
            q.push(("lines", lines.join(",")));
        }

        push_opt(&mut q, "context", self.context.as_ref());
        q.push(("poly", flag(self.poly).to_string()));
        q.push(("passlist", flag(self.passlist).to_string()));

        if let Some(walk) = self.origin_walk {
            q.push(("originWalk", walk.to_param()));
        }
        if let Some(walk) = self.dest_walk {
            q.push(("destWalk", walk.to_param()));
        }

        Ok(q)
    }
}

fn push_opt<T: ToString>(q: &mut Query, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        q.push((key, value.to_string()));
    }
}

/// Parameters for a `journeydetail.xml` lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JourneyDetailRequest {
    /// A leg's journey detail reference
    pub id: String,
    /// Include the polyline
    pub poly: bool,
}

impl JourneyDetailRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            poly: false,
        }
    }

    pub fn with_poly(mut self) -> Self {
        self.poly = true;
        self
    }

    pub fn query(&self) -> Query {
        let mut q: Query = vec![("id", self.id.clone())];
        if self.poly {
            q.push(("poly", "1".to_string()));
        }
        q
    }
}
