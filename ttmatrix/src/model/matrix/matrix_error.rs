use itertools::Itertools;

use crate::model::config::ConfigError;

#[derive(thiserror::Error, Debug)]
pub enum MatrixError {
    #[error("matrix computation was cancelled, partial results discarded")]
    Cancelled,
    #[error("failure building worker thread pool: {0}")]
    ThreadPool(String),
    #[error("invalid matrix input: {0}")]
    InvalidInput(String),
    #[error("destination '{0}' is not part of the travel time matrix")]
    UnknownDestination(String),
    #[error("destination '{0}' is not reachable from any origin with the selected modes")]
    NoTravelTimes(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failure computing travel time matrix: {0}")]
    Internal(String),
}

/// error for a point set containing the same id more than once.
pub fn duplicate_ids_error(kind: &str, ids: &[&str]) -> MatrixError {
    let joined = ids.iter().map(|id| format!("'{id}'")).join(", ");
    MatrixError::InvalidInput(format!("duplicate {kind} ids: {joined}"))
}
