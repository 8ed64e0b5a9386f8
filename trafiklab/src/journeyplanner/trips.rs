//! Trips requests.
//!
//! A [`TripsRequest`] is validated before anything is sent. Legacy SL site
//! IDs and HAFAS IDs given as origin or destination are converted to EFA
//! global IDs.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::domain::{LatLng, SL_EFA_PREFIX, convert_site_id_to_efa, is_site_id, to_stockholm};

use super::error::{InvalidTripsRequest, JourneyPlannerError};

/// Length of an EFA global stop ID.
const EFA_ID_LEN: usize = 16;

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// The name the API uses.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = InvalidTripsRequest;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| InvalidTripsRequest::UnknownName {
                        kind: $kind,
                        name: s.to_string(),
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_enum! {
    /// What to optimize for.
    RouteType, "route type" {
        LeastInterchange => "leastinterchange",
        LeastTime => "leasttime",
        LeastWalking => "leastwalking",
    }
}

named_enum! {
    /// Whether the requested time is a departure or an arrival.
    DepArr, "dep/arr" {
        Departure => "dep",
        Arrival => "arr",
    }
}

named_enum! {
    Language, "language" {
        Swedish => "sv",
        English => "en",
    }
}

named_enum! {
    /// Boolean switches sent as `<flag>=true`.
    TripFlag, "flag" {
        /// Also compute a walk-only trip
        ComputeMonomodalTripPedestrian => "compute_monomodal_trip_pedestrian",
        /// Also compute a bike-only trip
        ComputeMonomodalTripBicycle => "compute_monomodal_trip_bicycle",
        /// Don't compute a trip before the requested time
        CalcOneDirection => "calc_one_direction",
        /// Definitive exclusion of operators and lines
        MustExcl => "must_excl",
        /// Enable the operator filter
        SelOp => "sel_op",
        /// Enable the line filter
        SelLine => "sel_line",
        /// Suppress alternative trips
        NoAlt => "no_alt",
        /// Preferred inclusion of operators and lines
        PreferIncl => "prefer_incl",
        /// Allow walking to nearby alternative stops
        UseProxFootSearch => "use_prox_foot_search",
        /// Definitive inclusion of operators
        UseOnly => "use_only",
        /// Preferred exclusion of operators and lines
        PreferExcl => "prefer_excl",
        /// Output coordinate sequences for legs
        GenC => "gen_c",
    }
}

named_enum! {
    /// A mode of transport.
    Mode, "mode" {
        /// Pendeltåg
        CommuterTrain => "commuter_train",
        /// Tunnelbana
        Metro => "metro",
        /// Lokaltåg and spårväg
        TramsTrains => "trams_trains",
        Bus => "bus",
        ShipFerry => "ship_ferry",
        /// Anropsstyrd områdestrafik
        TransitOnDemand => "transit_on_demand",
        /// Fjärrtåg
        NationalTrain => "national_train",
        /// Närtrafik
        AccessibleBus => "accessible_bus",
    }
}

impl Mode {
    /// The `incl_mot_*` parameter for this mode.
    pub fn param(self) -> &'static str {
        match self {
            Mode::CommuterTrain => "incl_mot_0",
            Mode::Metro => "incl_mot_2",
            Mode::TramsTrains => "incl_mot_4",
            Mode::Bus => "incl_mot_5",
            Mode::ShipFerry => "incl_mot_9",
            Mode::TransitOnDemand => "incl_mot_10",
            Mode::NationalTrain => "incl_mot_14",
            Mode::AccessibleBus => "incl_mot_19",
        }
    }
}

/// Which modes of transport to use.
///
/// An empty include or avoid list behaves like `All`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModeSelection {
    #[default]
    All,
    /// Use only these modes
    Include(Vec<Mode>),
    /// Use every mode except these
    Avoid(Vec<Mode>),
}

impl ModeSelection {
    /// Whether `mode` may be used.
    pub fn allows(&self, mode: Mode) -> bool {
        match self {
            ModeSelection::Include(modes) if !modes.is_empty() => modes.contains(&mode),
            ModeSelection::Avoid(modes) => !modes.contains(&mode),
            _ => true,
        }
    }
}

/// An origin or destination.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    /// A stop ID or search string
    Any(String),
    Coord(LatLng),
}

impl Place {
    fn type_param(&self) -> &'static str {
        match self {
            Place::Any(_) => "any",
            Place::Coord(_) => "coord",
        }
    }

    /// The `name_*` value. Convertible site IDs become EFA IDs.
    fn name_param(&self) -> Result<String, JourneyPlannerError> {
        match self {
            Place::Coord(position) => Ok(position.to_trafiklab_string()),
            Place::Any(name) if name.len() != EFA_ID_LEN && is_site_id(name) => {
                Ok(convert_site_id_to_efa(name, SL_EFA_PREFIX)?)
            }
            Place::Any(name) => Ok(name.clone()),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, Place::Any(name) if name.trim().is_empty())
    }
}

impl FromStr for Place {
    type Err = std::convert::Infallible;

    /// Anything that parses as a coordinate is a `Coord`; the rest is `Any`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<LatLng>() {
            Ok(position) => Place::Coord(position),
            Err(_) => Place::Any(s.to_string()),
        })
    }
}

/// A `/trips` query.
#[derive(Debug, Clone, PartialEq)]
pub struct TripsRequest {
    /// Requested time; sent in Stockholm local time
    pub at: DateTime<Utc>,
    /// Number of trips to return, 1 to 3
    pub num_trips: u32,
    pub origin: Place,
    pub destination: Place,
    /// Stop ID to travel via
    pub via: Option<String>,
    /// Stop ID to avoid
    pub not_via: Option<String>,
    pub language: Option<Language>,
    pub flags: Vec<TripFlag>,
    pub modes: ModeSelection,
    /// 0 to 9
    pub max_changes: Option<u32>,
    /// Minutes, 0 to 120
    pub max_time_pedestrian: Option<u32>,
    /// Minutes, 0 to 120
    pub max_time_bicycle: Option<u32>,
    /// Meters, 0 to 1000
    pub max_length_pedestrian: Option<u32>,
    pub min_length_pedestrian: Option<u32>,
    pub max_length_bicycle: Option<u32>,
    pub min_length_bicycle: Option<u32>,
    /// Percent, 25 to 400
    pub change_speed: Option<u32>,
    pub route_type: Option<RouteType>,
    pub dep_arr: Option<DepArr>,
    /// Extra wait at the via stop, `HHMM`
    pub dwell_time: Option<String>,
    pub must_excl_lines: Vec<String>,
    pub prefer_excl_lines: Vec<String>,
    pub prefer_incl_lines: Vec<String>,
    pub use_only_operators: Vec<String>,
    pub must_excl_operators: Vec<String>,
    pub prefer_excl_operators: Vec<String>,
    pub prefer_incl_operators: Vec<String>,
}

impl TripsRequest {
    /// Default number of trips.
    pub const DEFAULT_NUM_TRIPS: u32 = 3;

    pub fn new(origin: Place, destination: Place, at: DateTime<Utc>) -> Self {
        Self {
            at,
            num_trips: Self::DEFAULT_NUM_TRIPS,
            origin,
            destination,
            via: None,
            not_via: None,
            language: None,
            flags: Vec::new(),
            modes: ModeSelection::All,
            max_changes: None,
            max_time_pedestrian: None,
            max_time_bicycle: None,
            max_length_pedestrian: None,
            min_length_pedestrian: None,
            max_length_bicycle: None,
            min_length_bicycle: None,
            change_speed: None,
            route_type: None,
            dep_arr: None,
            dwell_time: None,
            must_excl_lines: Vec::new(),
            prefer_excl_lines: Vec::new(),
            prefer_incl_lines: Vec::new(),
            use_only_operators: Vec::new(),
            must_excl_operators: Vec::new(),
            prefer_excl_operators: Vec::new(),
            prefer_incl_operators: Vec::new(),
        }
    }

    /// Check required fields and numeric ranges.
    pub fn validate(&self) -> Result<(), InvalidTripsRequest> {
        if self.origin.is_empty() {
            return Err(InvalidTripsRequest::Missing("name_origin"));
        }
        if self.destination.is_empty() {
            return Err(InvalidTripsRequest::Missing("name_destination"));
        }

        check_range("calc_number_of_trips", Some(self.num_trips), 1, 3)?;
        check_range("max_changes", self.max_changes, 0, 9)?;
        check_range("max_time_pedestrian", self.max_time_pedestrian, 0, 120)?;
        check_range("max_time_bicycle", self.max_time_bicycle, 0, 120)?;
        check_range("max_length_pedestrian", self.max_length_pedestrian, 0, 1000)?;
        check_range("min_length_pedestrian", self.min_length_pedestrian, 0, 1000)?;
        check_range("max_length_bicycle", self.max_length_bicycle, 0, 1000)?;
        check_range("min_length_bicycle", self.min_length_bicycle, 0, 1000)?;
        check_range("change_speed", self.change_speed, 25, 400)?;
        Ok(())
    }

    /// Validate and build the query pairs.
    pub fn query(&self) -> Result<Vec<(&'static str, String)>, JourneyPlannerError> {
        self.validate()?;

        let local = to_stockholm(&self.at);
        let mut q: Vec<(&'static str, String)> = vec![
            ("itd_date", local.format("%Y%m%d").to_string()),
            ("itd_time", local.format("%H%M").to_string()),
            ("name_origin", self.origin.name_param()?),
            ("type_origin", self.origin.type_param().to_string()),
            ("name_destination", self.destination.name_param()?),
            ("type_destination", self.destination.type_param().to_string()),
            ("calc_number_of_trips", self.num_trips.to_string()),
        ];

        for flag in &self.flags {
            q.push((flag.as_str(), "true".to_string()));
        }
        for &mode in Mode::ALL {
            q.push((mode.param(), self.modes.allows(mode).to_string()));
        }

        push_opt(&mut q, "language", self.language);
        if let Some(via) = &self.via {
            q.push(("type_via", "any".to_string()));
            q.push(("name_via", via.clone()));
        }
        if let Some(not_via) = &self.not_via {
            q.push(("type_not_via", "any".to_string()));
            q.push(("name_not_via", not_via.clone()));
        }
        push_opt(&mut q, "max_changes", self.max_changes);
        push_opt(&mut q, "max_time_pedestrian", self.max_time_pedestrian);
        push_opt(&mut q, "max_time_bicycle", self.max_time_bicycle);
        push_opt(&mut q, "max_length_pedestrian", self.max_length_pedestrian);
        push_opt(&mut q, "min_length_pedestrian", self.min_length_pedestrian);
        push_opt(&mut q, "max_length_bicycle", self.max_length_bicycle);
        push_opt(&mut q, "min_length_bicycle", self.min_length_bicycle);
        push_opt(&mut q, "change_speed", self.change_speed);
        push_opt(&mut q, "route_type", self.route_type);
        push_opt(&mut q, "itd_trip_date_time_dep_arr", self.dep_arr);
        push_opt(&mut q, "dwell_time", self.dwell_time.as_ref());

        push_all(&mut q, "must_excl_line", &self.must_excl_lines);
        push_all(&mut q, "prefer_excl_line", &self.prefer_excl_lines);
        push_all(&mut q, "prefer_incl_line", &self.prefer_incl_lines);
        push_all(&mut q, "use_only_op", &self.use_only_operators);
        push_all(&mut q, "must_excl_op", &self.must_excl_operators);
        push_all(&mut q, "prefer_excl_op", &self.prefer_excl_operators);
        push_all(&mut q, "prefer_incl_op", &self.prefer_incl_operators);

        Ok(q)
    }
}

fn check_range(
    field: &'static str,
    value: Option<u32>,
    min: u32,
    max: u32,
) -> Result<(), InvalidTripsRequest> {
    match value {
        Some(value) if !(min..=max).contains(&value) => Err(InvalidTripsRequest::OutOfRange {
            field,
            min,
            max,
            value,
        }),
        _ => Ok(()),
    }
}

fn push_opt<T: ToString>(q: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<T>) {
    if let Some(value) = value {
        q.push((key, value.to_string()));
    }
}

fn push_all(q: &mut Vec<(&'static str, String)>, key: &'static str, values: &[String]) {
    q.extend(values.iter().map(|v| (key, v.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 8, 5, 0).unwrap()
    }

    fn request() -> TripsRequest {
        TripsRequest::new(Place::Any("9192".into()), Place::Any("9001".into()), at())
    }

    fn get<'a>(q: &'a [(&'static str, String)], key: &str) -> Vec<&'a str> {
        q.iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn converts_site_ids_to_efa() {
        let q = request().query().unwrap();
        assert_eq!(get(&q, "name_origin"), vec!["9091001000009192"]);
        assert_eq!(get(&q, "name_destination"), vec!["9091001000009001"]);
        assert_eq!(get(&q, "type_origin"), vec!["any"]);
    }

    #[test]
    fn hafas_ids_converted_efa_ids_kept() {
        let mut req = request();
        req.origin = Place::Any("300109192".into());
        req.destination = Place::Any("9091001000009001".into());
        let q = req.query().unwrap();
        assert_eq!(get(&q, "name_origin"), vec!["9091001000009192"]);
        assert_eq!(get(&q, "name_destination"), vec!["9091001000009001"]);
    }

    #[test]
    fn search_strings_pass_through() {
        let mut req = request();
        req.origin = Place::Any("Slussen".into());
        let q = req.query().unwrap();
        assert_eq!(get(&q, "name_origin"), vec!["Slussen"]);
    }

    #[test]
    fn coordinates_use_trafiklab_form() {
        let mut req = request();
        req.destination = "59.335104,18.013809".parse().unwrap();
        let q = req.query().unwrap();
        assert_eq!(get(&q, "type_destination"), vec!["coord"]);
        assert_eq!(
            get(&q, "name_destination"),
            vec!["18.013809:59.335104:WGS84[dd.ddddd]"]
        );
    }

    #[test]
    fn stockholm_date_and_time() {
        let q = request().query().unwrap();
        assert_eq!(get(&q, "itd_date"), vec!["20240315"]);
        assert_eq!(get(&q, "itd_time"), vec!["0905"]);
    }

    #[test]
    fn all_modes_by_default() {
        let q = request().query().unwrap();
        for mode in Mode::ALL {
            assert_eq!(get(&q, mode.param()), vec!["true"], "{mode}");
        }
    }

    #[test]
    fn include_and_avoid_modes() {
        let mut req = request();
        req.modes = ModeSelection::Include(vec![Mode::Metro, Mode::Bus]);
        let q = req.query().unwrap();
        assert_eq!(get(&q, "incl_mot_2"), vec!["true"]);
        assert_eq!(get(&q, "incl_mot_5"), vec!["true"]);
        assert_eq!(get(&q, "incl_mot_0"), vec!["false"]);
        assert_eq!(get(&q, "incl_mot_19"), vec!["false"]);

        req.modes = ModeSelection::Avoid(vec![Mode::ShipFerry]);
        let q = req.query().unwrap();
        assert_eq!(get(&q, "incl_mot_9"), vec!["false"]);
        assert_eq!(get(&q, "incl_mot_14"), vec!["true"]);

        assert!(ModeSelection::Include(vec![]).allows(Mode::Bus));
    }

    #[test]
    fn range_validation() {
        let mut req = request();
        req.num_trips = 0;
        assert_eq!(
            req.validate(),
            Err(InvalidTripsRequest::OutOfRange {
                field: "calc_number_of_trips",
                min: 1,
                max: 3,
                value: 0
            })
        );

        let mut req = request();
        req.max_changes = Some(10);
        assert!(req.validate().is_err());
        req.max_changes = Some(0);
        assert!(req.validate().is_ok());

        let mut req = request();
        req.change_speed = Some(24);
        assert!(req.validate().is_err());
        req.change_speed = Some(400);
        assert!(req.validate().is_ok());

        let mut req = request();
        req.max_length_bicycle = Some(1001);
        assert!(req.validate().is_err());

        let mut req = request();
        req.max_time_pedestrian = Some(121);
        assert!(matches!(
            req.query(),
            Err(JourneyPlannerError::InvalidTrips(_))
        ));
    }

    #[test]
    fn empty_origin_rejected() {
        let mut req = request();
        req.origin = Place::Any(String::new());
        assert_eq!(
            req.validate(),
            Err(InvalidTripsRequest::Missing("name_origin"))
        );
    }

    #[test]
    fn zero_max_changes_is_sent() {
        let mut req = request();
        req.max_changes = Some(0);
        let q = req.query().unwrap();
        assert_eq!(get(&q, "max_changes"), vec!["0"]);
    }

    #[test]
    fn optional_params() {
        let mut req = request();
        req.language = Some(Language::Swedish);
        req.route_type = Some(RouteType::LeastWalking);
        req.dep_arr = Some(DepArr::Arrival);
        req.via = Some("9091001000009001".into());
        req.flags = vec![TripFlag::GenC, TripFlag::NoAlt];
        req.must_excl_lines = vec!["13".into(), "14".into()];
        req.use_only_operators = vec!["SL".into()];

        let q = req.query().unwrap();
        assert_eq!(get(&q, "language"), vec!["sv"]);
        assert_eq!(get(&q, "route_type"), vec!["leastwalking"]);
        assert_eq!(get(&q, "itd_trip_date_time_dep_arr"), vec!["arr"]);
        assert_eq!(get(&q, "type_via"), vec!["any"]);
        assert_eq!(get(&q, "name_via"), vec!["9091001000009001"]);
        assert_eq!(get(&q, "gen_c"), vec!["true"]);
        assert_eq!(get(&q, "no_alt"), vec!["true"]);
        assert_eq!(get(&q, "must_excl_line"), vec!["13", "14"]);
        assert_eq!(get(&q, "use_only_op"), vec!["SL"]);
        assert!(get(&q, "max_changes").is_empty());
        assert!(get(&q, "type_not_via").is_empty());
    }

    #[test]
    fn names_parse() {
        assert_eq!("leasttime".parse::<RouteType>(), Ok(RouteType::LeastTime));
        assert_eq!("dep".parse::<DepArr>(), Ok(DepArr::Departure));
        assert_eq!("use_prox_foot_search".parse::<TripFlag>(), Ok(TripFlag::UseProxFootSearch));
        assert_eq!("national_train".parse::<Mode>(), Ok(Mode::NationalTrain));
        assert_eq!(
            "de".parse::<Language>(),
            Err(InvalidTripsRequest::UnknownName {
                kind: "language",
                name: "de".into()
            })
        );
        assert_eq!(TripFlag::ALL.len(), 12);
        assert_eq!(Mode::ALL.len(), 8);
    }

    #[test]
    fn place_from_str() {
        assert_eq!(
            "59.33,18.06".parse::<Place>(),
            Ok(Place::Coord(LatLng::new(59.33, 18.06)))
        );
        assert_eq!("9192".parse::<Place>(), Ok(Place::Any("9192".into())));
    }
}
