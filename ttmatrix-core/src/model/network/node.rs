use geo::Point;

use super::NodeId;

/// a routable point in the street graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub node_id: NodeId,
    /// identifier of this node in the source data
    pub external_id: i64,
    pub coordinate: Point<f64>,
}
