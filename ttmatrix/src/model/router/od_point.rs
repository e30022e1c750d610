use geo::Point;
use serde::{Deserialize, Serialize};

/// an origin or destination location supplied by the caller, in the coordinate
/// system of the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdPoint {
    pub id: String,
    pub coordinate: Point<f64>,
}

impl OdPoint {
    pub fn new(id: &str, x: f64, y: f64) -> OdPoint {
        OdPoint {
            id: id.to_string(),
            coordinate: Point::new(x, y),
        }
    }
}
