use ttmatrix_core::model::network::NetworkBuildError;

use crate::model::{config::ConfigError, matrix::MatrixError};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("invalid user input: {0}")]
    InvalidUserInput(String),
    #[error("failure reading '{path}': {message}")]
    Read { path: String, message: String },
    #[error("failure writing '{path}': {message}")]
    Write { path: String, message: String },
    #[error(transparent)]
    Network(#[from] NetworkBuildError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
