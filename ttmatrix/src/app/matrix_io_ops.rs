use std::{fs::File, io::BufReader, path::Path};

use config::{Config, Environment};
use ttmatrix_core::model::network::{NetworkBuildConfig, NetworkSource};

use super::{AppError, OdMatrixRow, PointRecord};
use crate::model::{config::TravelTimeConfig, matrix::TravelTimeMatrix, router::OdPoint};

/// prefix of environment variables overriding configuration file values, such as
/// `TTMATRIX_TRAVEL_TIME__MAX_TIME`
const ENV_PREFIX: &str = "TTMATRIX";

/// reads the `travel_time` section and the optional `network` section of a
/// configuration file.
pub fn read_config(
    configuration_file: &Path,
) -> Result<(TravelTimeConfig, NetworkBuildConfig), AppError> {
    let filename = configuration_file.to_string_lossy();
    let config = Config::builder()
        .add_source(config::File::from(configuration_file))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .map_err(|e| {
            AppError::InvalidUserInput(format!("file '{filename}' produced error: {e}"))
        })?;
    let travel_time = config.get::<TravelTimeConfig>("travel_time").map_err(|e| {
        AppError::InvalidUserInput(format!(
            "error reading 'travel_time' key in '{filename}': {e}"
        ))
    })?;
    let network = match config.get::<NetworkBuildConfig>("network") {
        Ok(network) => network,
        Err(config::ConfigError::NotFound(_)) => NetworkBuildConfig::default(),
        Err(e) => {
            return Err(AppError::InvalidUserInput(format!(
                "error reading 'network' key in '{filename}': {e}"
            )))
        }
    };
    Ok((travel_time, network))
}

pub fn read_network_source(path: &Path) -> Result<NetworkSource, AppError> {
    let file = File::open(path).map_err(|e| read_error(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| read_error(path, e))
}

pub fn read_points(path: &Path) -> Result<Vec<OdPoint>, AppError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| read_error(path, e))?;
    reader
        .deserialize::<PointRecord>()
        .map(|row| row.map(OdPoint::from).map_err(|e| read_error(path, e)))
        .collect()
}

pub fn write_matrix(path: &Path, matrix: &TravelTimeMatrix) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| write_error(path, e))?;
    for entry in matrix.entries() {
        writer
            .serialize(OdMatrixRow::from(entry))
            .map_err(|e| write_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))
}

fn read_error(path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::Read {
        path: path.to_string_lossy().to_string(),
        message: e.to_string(),
    }
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::Write {
        path: path.to_string_lossy().to_string(),
        message: e.to_string(),
    }
}
