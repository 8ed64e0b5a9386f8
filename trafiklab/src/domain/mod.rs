//! Domain types for SL journey planning.
//!
//! Identifier newtypes validate at construction time, so code receiving a
//! `HafasId` or `StopFilter` can trust it. Trip and leg types are plain
//! values decoded from planner responses, with the post-processing
//! operations used before display.

mod coord;
mod leg;
mod polyline;
mod site_id;
mod stop_filter;
mod time;
mod trip;

pub use coord::{InvalidLatLng, LatLng};
pub use leg::{Leg, LegType, Location, Message, Note, Product, Stop};
pub use polyline::{MalformedPolyline, Polyline, decode_polyline};
pub use site_id::{
    EfaId, EfaPrefix, HafasId, InvalidSiteId, SL_EFA_PREFIX, convert_hafas_to_efa,
    convert_id_to_hafas, convert_site_id_to_efa, is_site_id,
};
pub use stop_filter::{InvalidStopFilter, StopFilter, StopKind};
pub use time::{
    TimeError, TimePair, parse_iso_duration, parse_stockholm, parse_time_pair, to_stockholm,
};
pub use trip::{Fare, FareSet, LegContext, ServiceDay, Trip, WalkPolicy, combine_walks};
