use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use itertools::Itertools;
use kdam::{Bar, BarBuilder, BarExt};
use rayon::prelude::*;
use ttmatrix_core::model::network::NetworkModel;

use super::{
    aggregate_ops, matrix_error::duplicate_ids_error, CancellationToken, MatrixError,
    OdMatrixEntry, TravelTimeMatrix,
};
use crate::model::{
    config::RoutingParameters,
    router::{OdPoint, Router, SnappedPoint, TravelTimeObservation},
    sampler::DepartureSampler,
};

/// computes travel time matrices over a shared network. the aggregator keeps no
/// state between batches besides the network and its routing parameters.
pub struct MatrixAggregator {
    network: Arc<NetworkModel>,
    params: RoutingParameters,
}

impl MatrixAggregator {
    pub fn new(network: Arc<NetworkModel>, params: RoutingParameters) -> MatrixAggregator {
        MatrixAggregator { network, params }
    }

    pub fn params(&self) -> &RoutingParameters {
        &self.params
    }

    /// runs the router once per (origin, sampled departure) pair against all
    /// destinations, then reduces the observations of each pair to its median.
    ///
    /// # Arguments
    ///
    /// * `origins` - points to route from, at least one
    /// * `destinations` - points to route to. if None, the origins are used.
    /// * `cancel` - checked before each routing task. a cancelled batch discards
    ///   everything it computed.
    ///
    /// # Returns
    ///
    /// * one entry for every origin-destination pair, ordered by origin then destination
    pub fn compute(
        &self,
        origins: &[OdPoint],
        destinations: Option<&[OdPoint]>,
        cancel: &CancellationToken,
    ) -> Result<TravelTimeMatrix, MatrixError> {
        let destinations = destinations.unwrap_or(origins);
        validate_points("origin", origins)?;
        validate_points("destination", destinations)?;

        let samples = DepartureSampler::try_from(&self.params)?.samples();
        let router = Router::new(&self.network, &self.params);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.params.parallelism)
            .build()
            .map_err(|e| MatrixError::ThreadPool(e.to_string()))?;

        let tasks = (0..origins.len())
            .cartesian_product(0..samples.len())
            .collect_vec();
        log::info!(
            "computing travel times for {} origins and {} destinations over {} departures ({} tasks)",
            origins.len(),
            destinations.len(),
            samples.len(),
            tasks.len()
        );

        // a progress bar shared across threads
        let bar: Option<Arc<Mutex<Bar>>> = if self.params.show_progress {
            let bar = BarBuilder::default()
                .desc("travel time matrix")
                .total(tasks.len())
                .animation("fillup")
                .build()
                .map_err(|e| {
                    MatrixError::Internal(format!("failure building progress bar: {e}"))
                })?;
            Some(Arc::new(Mutex::new(bar)))
        } else {
            None
        };

        let routed: Vec<(usize, Vec<TravelTimeObservation>)> = pool.install(|| {
            let snapped_origins: Vec<SnappedPoint> =
                origins.par_iter().map(|p| router.snap(p)).collect();
            let snapped_destinations: Vec<SnappedPoint> =
                destinations.par_iter().map(|p| router.snap(p)).collect();
            let unreachable = snapped_destinations
                .iter()
                .filter(|d| !d.has_access())
                .count();
            if unreachable > 0 {
                log::debug!("{unreachable} destinations have no access to the network");
            }

            tasks
                .par_iter()
                .map(|(origin_idx, sample_idx)| {
                    if cancel.is_cancelled() {
                        return Err(MatrixError::Cancelled);
                    }
                    if let Some(bar) = &bar {
                        if let Ok(mut bar) = bar.lock() {
                            let _ = bar.update(1);
                        }
                    }
                    let observations = router.route(
                        &snapped_origins[*origin_idx],
                        samples[*sample_idx],
                        &snapped_destinations,
                    );
                    Ok((*origin_idx, observations))
                })
                .collect::<Result<Vec<_>, MatrixError>>()
        })?;
        if bar.is_some() {
            eprintln!(); // end progress bar
        }
        if cancel.is_cancelled() {
            return Err(MatrixError::Cancelled);
        }

        let grouped = aggregate_ops::group_observations(routed.into_iter().flat_map(
            |(origin_idx, observations)| {
                observations
                    .into_iter()
                    .enumerate()
                    .map(move |(destination_idx, o)| ((origin_idx, destination_idx), o))
            },
        ));

        let entries = origins
            .iter()
            .enumerate()
            .cartesian_product(destinations.iter().enumerate())
            .map(|((o, origin), (d, destination))| {
                let pair = grouped.get(&(o, d)).cloned().unwrap_or_default();
                OdMatrixEntry {
                    from_id: origin.id.clone(),
                    to_id: destination.id.clone(),
                    travel_time: aggregate_ops::median(&pair.travel_times),
                    unreachable_samples: pair.unreachable_samples,
                }
            })
            .collect_vec();
        let reachable = entries.iter().filter(|e| e.is_reachable()).count();
        log::info!(
            "finished travel time matrix, {reachable} of {} pairs reachable",
            entries.len()
        );
        Ok(TravelTimeMatrix::new(entries))
    }
}

fn validate_points(kind: &str, points: &[OdPoint]) -> Result<(), MatrixError> {
    if points.is_empty() {
        return Err(MatrixError::InvalidInput(format!("no {kind} points provided")));
    }
    let mut seen = HashSet::new();
    let duplicates = points
        .iter()
        .filter(|p| !seen.insert(p.id.as_str()))
        .map(|p| p.id.as_str())
        .unique()
        .collect_vec();
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(duplicate_ids_error(kind, &duplicates))
    }
}
