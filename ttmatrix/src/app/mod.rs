mod app_error;
pub mod matrix_io_ops;
mod point_record;
mod ttmatrix_app;

pub use app_error::AppError;
pub use point_record::{OdMatrixRow, PointRecord};
pub use ttmatrix_app::TtMatrixApp;
