use ttmatrix_core::model::network::{NodeId, StopId};
use uom::si::f64::Time;

/// an [`super::OdPoint`] attached to the network for one batch. each list holds
/// the network locations the point connects to along with the time to cover the
/// straight-line gap. empty lists mean the point has no access by that means.
#[derive(Debug, Clone)]
pub struct SnappedPoint {
    pub id: String,
    /// street nodes in walking range, nearest first
    pub walk_nodes: Vec<(NodeId, Time)>,
    /// street nodes in cycling range, nearest first
    pub bike_nodes: Vec<(NodeId, Time)>,
    /// transit stops in walking range, nearest first
    pub stops: Vec<(StopId, Time)>,
}

impl SnappedPoint {
    pub fn has_access(&self) -> bool {
        !(self.walk_nodes.is_empty() && self.bike_nodes.is_empty() && self.stops.is_empty())
    }
}
