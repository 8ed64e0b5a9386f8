//! Client library for SL's journey planning APIs.
//!
//! - [`travelplanner`]: the HAFAS-based Travelplanner 3.1 (XML)
//! - [`journeyplanner`]: the EFA-based journey planner v2 (JSON)
//! - [`domain`]: site identifier conversion between the two, stop filters,
//!   polylines and trip post-processing

pub mod domain;
pub mod journeyplanner;
pub mod travelplanner;
