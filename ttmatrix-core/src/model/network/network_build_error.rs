use itertools::Itertools;

/// structurally invalid street or schedule data, detected once while the
/// network model is built.
#[derive(thiserror::Error, Debug)]
pub enum NetworkBuildError {
    #[error("duplicate node id {0}")]
    DuplicateNode(i64),
    #[error("duplicate stop id '{0}'")]
    DuplicateStop(String),
    #[error("duplicate trip id '{0}'")]
    DuplicateTrip(String),
    #[error("duplicate calendar service id '{0}'")]
    DuplicateCalendar(String),
    #[error("{context} references unknown node id {node}")]
    UnknownNode { context: String, node: i64 },
    #[error("{context} references unknown stop id '{stop}'")]
    UnknownStop { context: String, stop: String },
    #[error("trip '{trip}' references unknown calendar service id '{service_id}'")]
    UnknownCalendar { trip: String, service_id: String },
    #[error("{context} has invalid length {length}, must be a finite, non-negative number of meters")]
    InvalidEdgeLength { context: String, length: f64 },
    #[error("{context} has invalid coordinate ({x}, {y})")]
    InvalidCoordinate { context: String, x: f64, y: f64 },
    #[error("transfer from '{from}' to '{to}' has invalid duration {duration}, must be a finite, non-negative number of seconds")]
    InvalidTransferDuration { from: String, to: String, duration: f64 },
    #[error("trip '{0}' has fewer than two stop times")]
    TripTooShort(String),
    #[error("trip '{trip}' is missing both arrival and departure times at stop sequence {stop_sequence}")]
    MissingStopTimes { trip: String, stop_sequence: u32 },
    #[error("trip '{trip}' has stop times that decrease at stop sequence {stop_sequence}")]
    NonMonotonicStopTimes { trip: String, stop_sequence: u32 },
    #[error("calendar '{service_id}' ends before it starts")]
    InvalidCalendar { service_id: String },
    #[error("errors encountered while building network model: {0}")]
    Multiple(String),
}

/// combines all errors found during one build phase into a single error.
pub fn batch_build_error(mut errors: Vec<NetworkBuildError>) -> NetworkBuildError {
    if errors.len() == 1 {
        if let Some(error) = errors.pop() {
            return error;
        }
    }
    let concatenated = errors.iter().map(|e| e.to_string()).join("\n  ");
    NetworkBuildError::Multiple(format!("[\n  {concatenated}\n]"))
}
