//! SL journey planner v2 client.
//!
//! The EFA-based successor of the Travelplanner, speaking JSON.
//!
//! - Stop IDs are 16-digit EFA global IDs; legacy site IDs and HAFAS IDs
//!   passed as a trip origin or destination are converted before sending
//! - Times in responses are UTC; the request date and time are sent in
//!   Europe/Stockholm local time
//! - No API key is needed, but a client id can be sent as
//!   `X-Correlation-ID`

mod client;
mod error;
mod stop_finder;
mod trips;
mod types;

pub use client::{DEFAULT_BASE_URL, JourneyPlannerClient, JourneyPlannerConfig};
pub use error::{InvalidTripsRequest, JourneyPlannerError};
pub use stop_finder::{SearchType, StopFinderRequest};
pub use trips::{
    DepArr, Language, Mode, ModeSelection, Place, RouteType, TripFlag, TripsRequest,
};
pub use types::{
    DaysOfService, FootPathElement, FootPathInfo, FootPathStop, InfoLink, Journey, JourneyInfo, JourneyLeg,
    JourneyStop, LegHint, ParentLocation, StopFinderResponse, StopLocation, SystemMessage,
    TransportDestination, TransportOperator, TransportProduct, Transportation, TripsResponse,
};
