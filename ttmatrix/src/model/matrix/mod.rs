pub mod aggregate_ops;
mod cancellation_token;
mod matrix_aggregator;
mod matrix_error;
mod od_matrix_entry;
mod travel_time_matrix;

pub use cancellation_token::CancellationToken;
pub use matrix_aggregator::MatrixAggregator;
pub use matrix_error::MatrixError;
pub use od_matrix_entry::OdMatrixEntry;
pub use travel_time_matrix::TravelTimeMatrix;
