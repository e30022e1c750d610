use ttmatrix_core::model::network::{EdgeId, StopId, TripId};

/// an internal invariant violated during a single router invocation. the fault
/// only affects the invocation that raised it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QueryFault {
    #[error("edge {edge_id} has invalid traversal cost {cost} seconds")]
    InvalidEdgeCost { edge_id: EdgeId, cost: f64 },
    #[error("{context} has invalid duration {duration} seconds")]
    InvalidAccessDuration { context: String, duration: f64 },
    #[error("trip {trip_id} arrives at stop {stop_id} before it was boarded")]
    TimeReversal { trip_id: TripId, stop_id: StopId },
    #[error("{context} index {index} is out of range")]
    IndexOutOfRange { context: String, index: usize },
}
