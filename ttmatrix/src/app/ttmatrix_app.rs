use std::{path::Path, sync::Arc};

use clap::Parser;
use ttmatrix_core::model::network::build_network;

use super::{matrix_io_ops, AppError};
use crate::model::{
    config::RoutingParameters,
    matrix::{CancellationToken, MatrixAggregator},
};

/// Command line tool computing travel time matrices over a multimodal street and transit network
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct TtMatrixApp {
    /// configuration file with a `travel_time` section and an optional `network` section
    #[arg(short, long)]
    pub configuration_file: String,

    /// JSON file containing the street and schedule records of the network
    #[arg(short, long)]
    pub network_file: String,

    /// CSV file of origin points with columns id,x,y
    #[arg(short, long)]
    pub origins_file: String,

    /// CSV file of destination points with columns id,x,y. if not provided,
    /// the origins are used as destinations.
    #[arg(short, long)]
    pub destinations_file: Option<String>,

    /// location of the CSV matrix output
    #[arg(long, default_value = "travel_time_matrix.csv")]
    pub output_file: String,
}

impl TtMatrixApp {
    pub fn run(&self) -> Result<(), AppError> {
        let (travel_time_config, network_config) =
            matrix_io_ops::read_config(Path::new(&self.configuration_file))?;
        let params = RoutingParameters::try_from(&travel_time_config)?;

        let source = matrix_io_ops::read_network_source(Path::new(&self.network_file))?;
        let network = Arc::new(build_network(&source, &network_config)?);

        let origins = matrix_io_ops::read_points(Path::new(&self.origins_file))?;
        let destinations = match &self.destinations_file {
            Some(file) => Some(matrix_io_ops::read_points(Path::new(file))?),
            None => None,
        };
        log::info!(
            "read {} origins and {} destinations",
            origins.len(),
            destinations.as_ref().map(|d| d.len()).unwrap_or(origins.len())
        );

        let aggregator = MatrixAggregator::new(network, params);
        let matrix = aggregator.compute(
            &origins,
            destinations.as_deref(),
            &CancellationToken::new(),
        )?;
        matrix_io_ops::write_matrix(Path::new(&self.output_file), &matrix)?;
        log::info!("wrote {} matrix entries to {}", matrix.len(), self.output_file);
        Ok(())
    }
}
