use geo::Point;
use uom::si::f64::Length;

use super::{NodeId, StopId};

/// a transit boarding and alighting point.
#[derive(Debug, Clone)]
pub struct Stop {
    pub stop_id: StopId,
    /// identifier of this stop in the source schedule
    pub external_id: String,
    pub coordinate: Point<f64>,
    /// street nodes reachable from this stop by a short walk
    pub access_links: Vec<AccessLink>,
}

/// a short walking connection between a stop and a street node.
#[derive(Debug, Clone, Copy)]
pub struct AccessLink {
    pub node_id: NodeId,
    pub length: Length,
}
