use serde::{Deserialize, Serialize};
use uom::si::f64::Time;

/// the aggregate travel time for one origin-destination pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdMatrixEntry {
    pub from_id: String,
    pub to_id: String,
    /// median of the sampled travel times that reached the destination. None if
    /// no sampled departure reached it.
    pub travel_time: Option<Time>,
    /// number of sampled departures that did not reach the destination within budget
    pub unreachable_samples: usize,
}

impl OdMatrixEntry {
    pub fn is_reachable(&self) -> bool {
        self.travel_time.is_some()
    }

    pub fn travel_time_minutes(&self) -> Option<f64> {
        self.travel_time.map(|t| t.get::<uom::si::time::minute>())
    }
}
