use enumset::EnumSet;
use uom::si::f64::{Length, Time, Velocity};

use super::{EdgeId, NodeId};
use crate::model::TravelMode;

/// a directed street segment between two nodes.
#[derive(Debug, Clone)]
pub struct Edge {
    pub edge_id: EdgeId,
    pub src_node_id: NodeId,
    pub dst_node_id: NodeId,
    pub length: Length,
    /// street modes permitted to traverse this edge
    pub modes: EnumSet<TravelMode>,
}

impl Edge {
    pub fn permits(&self, mode: TravelMode) -> bool {
        self.modes.contains(mode)
    }

    /// time to traverse this edge at the given speed
    pub fn traversal_time(&self, speed: Velocity) -> Time {
        self.length / speed
    }
}
