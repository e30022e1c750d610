mod calendar;
mod departure;
mod edge;
mod ids;
mod network_build_config;
mod network_build_error;
mod network_builder;
mod network_model;
mod network_source;
mod node;
mod route;
mod spatial_index;
mod stop;
mod transfer;
mod trip;

pub use calendar::ServiceCalendar;
pub use departure::{Departure, Schedule, TripDeparture};
pub use edge::Edge;
pub use ids::{CalendarId, EdgeId, NodeId, RouteId, StopId, TripId};
pub use network_build_config::NetworkBuildConfig;
pub use network_build_error::{batch_build_error, NetworkBuildError};
pub use network_builder::build_network;
pub use network_model::NetworkModel;
pub use network_source::{
    AccessLinkRecord, CalendarRecord, EdgeRecord, NetworkSource, NodeRecord, StopRecord,
    StopTimeRecord, TransferRecord, TripRecord,
};
pub use node::Node;
pub use route::Route;
pub use spatial_index::PointIndex;
pub use stop::{AccessLink, Stop};
pub use transfer::Transfer;
pub use trip::{StopTime, Trip};
