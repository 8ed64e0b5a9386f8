//! Travelplanner 3.1 XML response DTOs.
//!
//! These types map directly to the HAFAS XML documents. Attributes are
//! prefixed with `@`; list wrappers such as `<LegList>` get their own
//! struct. HAFAS omits attributes rather than sending empty values, so
//! nearly everything is optional.

use serde::Deserialize;

/// Root-level error attributes shared by every HAFAS response.
pub trait HafasStatus {
    /// Error code reported inside an otherwise successful response.
    fn error_code(&self) -> Option<&str>;

    /// Human-readable text for [`HafasStatus::error_code`].
    fn error_text(&self) -> Option<&str>;
}

macro_rules! impl_hafas_status {
    ($($ty:ty),+) => {
        $(impl HafasStatus for $ty {
            fn error_code(&self) -> Option<&str> {
                self.error_code.as_deref()
            }

            fn error_text(&self) -> Option<&str> {
                self.error_text.as_deref()
            }
        })+
    };
}

impl_hafas_status!(TripList, JourneyDetail);

/// `<TripList>`: response to `trip.xml` and `Reconstruction.xml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripList {
    /// Scroll context for earlier trips
    #[serde(rename = "@scrB")]
    pub scr_b: Option<String>,

    /// Scroll context for later trips
    #[serde(rename = "@scrF")]
    pub scr_f: Option<String>,

    #[serde(rename = "@errorCode")]
    pub error_code: Option<String>,

    #[serde(rename = "@errorText")]
    pub error_text: Option<String>,

    #[serde(rename = "Trip", default)]
    pub trips: Vec<TripItem>,
}

/// `<Trip>`: one journey option.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripItem {
    #[serde(rename = "@idx")]
    pub idx: Option<u32>,

    #[serde(rename = "@tripId")]
    pub trip_id: Option<String>,

    #[serde(rename = "@ctxRecon")]
    pub ctx_recon: Option<String>,

    #[serde(rename = "@checksum")]
    pub checksum: Option<String>,

    #[serde(rename = "@valid")]
    pub valid: Option<bool>,

    /// ISO 8601 duration, e.g. "PT23M"
    #[serde(rename = "@duration")]
    pub duration: Option<String>,

    #[serde(rename = "ServiceDays", default)]
    pub service_days: Vec<ServiceDays>,

    #[serde(rename = "LegList")]
    pub leg_list: Option<LegList>,

    #[serde(rename = "TariffResult")]
    pub tariff_result: Option<TariffResult>,
}

/// `<ServiceDays>`: validity of a trip over the planning period.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceDays {
    #[serde(rename = "@planningPeriodBegin")]
    pub planning_period_begin: Option<String>,

    #[serde(rename = "@planningPeriodEnd")]
    pub planning_period_end: Option<String>,

    #[serde(rename = "@sDaysR")]
    pub s_days_r: Option<String>,

    #[serde(rename = "@sDaysI")]
    pub s_days_i: Option<String>,

    #[serde(rename = "@sDaysB")]
    pub s_days_b: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegList {
    #[serde(rename = "Leg", default)]
    pub legs: Vec<LegItem>,
}

/// `<Leg>`: one walk or vehicle ride.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegItem {
    #[serde(rename = "@idx")]
    pub idx: Option<u32>,

    /// "WALK", "JNY", "TRSF", ...
    #[serde(rename = "@type")]
    pub leg_type: Option<String>,

    /// Distance in meters (walks only)
    #[serde(rename = "@dist")]
    pub dist: Option<u32>,

    #[serde(rename = "@cancelled")]
    pub cancelled: Option<bool>,

    #[serde(rename = "@reachable")]
    pub reachable: Option<bool>,

    #[serde(rename = "@name")]
    pub name: Option<String>,

    #[serde(rename = "@number")]
    pub number: Option<String>,

    #[serde(rename = "@category")]
    pub category: Option<String>,

    #[serde(rename = "@direction")]
    pub direction: Option<String>,

    #[serde(rename = "Origin")]
    pub origin: Option<LocationItem>,

    #[serde(rename = "Destination")]
    pub destination: Option<LocationItem>,

    #[serde(rename = "Notes")]
    pub notes: Option<Notes>,

    #[serde(rename = "Messages")]
    pub messages: Option<Messages>,

    #[serde(rename = "JourneyDetailRef")]
    pub journey_detail_ref: Option<JourneyDetailRef>,

    #[serde(rename = "JourneyStatus")]
    pub journey_status: Option<String>,

    #[serde(rename = "Product")]
    pub product: Option<ProductItem>,

    #[serde(rename = "Polyline")]
    pub polyline: Option<PolylineItem>,

    #[serde(rename = "Stops")]
    pub stops: Option<Stops>,
}

/// `<Origin>` / `<Destination>` of a leg.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationItem {
    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "@extId")]
    pub ext_id: Option<String>,

    #[serde(rename = "@name")]
    pub name: Option<String>,

    /// "ST" (stop), "ADR" (address), "POI", "CRD" (coordinate)
    #[serde(rename = "@type")]
    pub location_type: Option<String>,

    #[serde(rename = "@lon")]
    pub lon: Option<f64>,

    #[serde(rename = "@lat")]
    pub lat: Option<f64>,

    #[serde(rename = "@hasMainMast")]
    pub has_main_mast: Option<bool>,

    #[serde(rename = "@mainMastId")]
    pub main_mast_id: Option<String>,

    #[serde(rename = "@mainMastExtId")]
    pub main_mast_ext_id: Option<String>,

    #[serde(rename = "@date")]
    pub date: Option<String>,

    #[serde(rename = "@time")]
    pub time: Option<String>,

    #[serde(rename = "@rtDate")]
    pub rt_date: Option<String>,

    #[serde(rename = "@rtTime")]
    pub rt_time: Option<String>,

    #[serde(rename = "@track")]
    pub track: Option<String>,

    #[serde(rename = "@prognosisType")]
    pub prognosis_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Notes {
    #[serde(rename = "Note", default)]
    pub notes: Vec<NoteItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteItem {
    #[serde(rename = "@priority")]
    pub priority: Option<i32>,

    #[serde(rename = "$text", default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Messages {
    #[serde(rename = "Message", default)]
    pub messages: Vec<MessageItem>,
}

/// `<Message>`: a service disruption notice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageItem {
    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "@act")]
    pub act: Option<bool>,

    #[serde(rename = "@head")]
    pub head: Option<String>,

    #[serde(rename = "@text")]
    pub text: Option<String>,

    #[serde(rename = "@priority")]
    pub priority: Option<i32>,

    #[serde(rename = "@category")]
    pub category: Option<String>,

    /// Product bitmask the message applies to
    #[serde(rename = "@products")]
    pub products: Option<u32>,

    #[serde(rename = "@sDate")]
    pub s_date: Option<String>,

    #[serde(rename = "@sTime")]
    pub s_time: Option<String>,

    #[serde(rename = "@eDate")]
    pub e_date: Option<String>,

    #[serde(rename = "@eTime")]
    pub e_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JourneyDetailRef {
    #[serde(rename = "@ref")]
    pub reference: Option<String>,
}

/// `<Product>`: line and operator of a vehicle leg.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductItem {
    #[serde(rename = "@name")]
    pub name: Option<String>,

    #[serde(rename = "@num")]
    pub num: Option<String>,

    #[serde(rename = "@line")]
    pub line: Option<String>,

    #[serde(rename = "@catCode")]
    pub cat_code: Option<u32>,

    #[serde(rename = "@catIn")]
    pub cat_in: Option<String>,

    #[serde(rename = "@catOut")]
    pub cat_out: Option<String>,

    #[serde(rename = "@catOutS")]
    pub cat_out_s: Option<String>,

    #[serde(rename = "@catOutL")]
    pub cat_out_l: Option<String>,

    #[serde(rename = "@operator")]
    pub operator: Option<String>,

    #[serde(rename = "@operatorCode")]
    pub operator_code: Option<String>,

    #[serde(rename = "@admin")]
    pub admin: Option<String>,
}

/// `<Polyline>`: a leg's path as a flat `<crd>` list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolylineItem {
    #[serde(rename = "@type")]
    pub kind: Option<String>,

    #[serde(rename = "@dim")]
    pub dim: Option<String>,

    #[serde(rename = "@delta")]
    pub delta: Option<bool>,

    #[serde(rename = "@crdEncS")]
    pub crd_enc_s: Option<String>,

    #[serde(rename = "crd", default)]
    pub crd: Vec<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stops {
    #[serde(rename = "Stop", default)]
    pub stops: Vec<StopItem>,
}

/// `<Stop>`: a call on a vehicle leg (requires `passlist=1`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopItem {
    #[serde(rename = "@id")]
    pub id: Option<String>,

    #[serde(rename = "@extId")]
    pub ext_id: Option<String>,

    #[serde(rename = "@name")]
    pub name: Option<String>,

    #[serde(rename = "@routeIdx")]
    pub route_idx: Option<u32>,

    #[serde(rename = "@lon")]
    pub lon: Option<f64>,

    #[serde(rename = "@lat")]
    pub lat: Option<f64>,

    #[serde(rename = "@depDate")]
    pub dep_date: Option<String>,

    #[serde(rename = "@depTime")]
    pub dep_time: Option<String>,

    #[serde(rename = "@rtDepDate")]
    pub rt_dep_date: Option<String>,

    #[serde(rename = "@rtDepTime")]
    pub rt_dep_time: Option<String>,

    #[serde(rename = "@arrDate")]
    pub arr_date: Option<String>,

    #[serde(rename = "@arrTime")]
    pub arr_time: Option<String>,

    #[serde(rename = "@rtArrDate")]
    pub rt_arr_date: Option<String>,

    #[serde(rename = "@rtArrTime")]
    pub rt_arr_time: Option<String>,

    #[serde(rename = "@depTrack")]
    pub dep_track: Option<String>,

    #[serde(rename = "@arrTrack")]
    pub arr_track: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TariffResult {
    #[serde(rename = "fareSetItem", default)]
    pub fare_sets: Vec<FareSetItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FareSetItem {
    #[serde(rename = "@name")]
    pub name: Option<String>,

    #[serde(rename = "@desc")]
    pub desc: Option<String>,

    #[serde(rename = "fareItem", default)]
    pub fares: Vec<FareItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FareItem {
    #[serde(rename = "@name")]
    pub name: Option<String>,

    #[serde(rename = "@desc")]
    pub desc: Option<String>,

    #[serde(rename = "@cur")]
    pub cur: Option<String>,

    /// Price in the currency's minor unit
    #[serde(rename = "@price")]
    pub price: Option<i64>,
}

/// `<JourneyDetail>`: the full run of one vehicle.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JourneyDetail {
    #[serde(rename = "@errorCode")]
    pub error_code: Option<String>,

    #[serde(rename = "@errorText")]
    pub error_text: Option<String>,

    #[serde(rename = "Stops")]
    pub stops: Option<Stops>,

    #[serde(rename = "Product", default)]
    pub products: Vec<ProductItem>,

    #[serde(rename = "Messages")]
    pub messages: Option<Messages>,

    #[serde(rename = "Polyline")]
    pub polyline: Option<PolylineItem>,
}
