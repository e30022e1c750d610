mod od_point;
mod query_fault;
mod search_state;
mod snapped_point;
mod street_search_ops;
mod time_dependent_router;
mod time_ops;
mod transit_search_ops;
mod travel_time_observation;

use search_state::SearchState;

pub use od_point::OdPoint;
pub use query_fault::QueryFault;
pub use snapped_point::SnappedPoint;
pub use time_dependent_router::Router;
pub use travel_time_observation::TravelTimeObservation;
