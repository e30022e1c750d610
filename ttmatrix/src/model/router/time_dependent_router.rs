use chrono::{NaiveDateTime, Timelike};
use ttmatrix_core::model::{
    network::NetworkModel,
    TravelMode,
};
use uom::si::f64::Time;

use super::{
    street_search_ops, time_ops, transit_search_ops, OdPoint, QueryFault, SearchState,
    SnappedPoint, TravelTimeObservation,
};
use crate::model::config::RoutingParameters;

/// time-dependent multimodal earliest-arrival search over a shared, read-only
/// network. a router holds no mutable state; every invocation allocates its own
/// [`SearchState`], so one router may serve many threads at once.
pub struct Router<'a> {
    network: &'a NetworkModel,
    params: &'a RoutingParameters,
}

impl<'a> Router<'a> {
    pub fn new(network: &'a NetworkModel, params: &'a RoutingParameters) -> Router<'a> {
        Router { network, params }
    }

    /// attaches a point to the network: every street node within the configured
    /// access distance for each street mode in use, and every stop within that
    /// distance when transit is enabled. each list is ordered nearest first.
    pub fn snap(&self, point: &OdPoint) -> SnappedPoint {
        let radius = self.params.max_access_distance;
        let street_modes = self.params.street_modes();
        let nearby_nodes = |mode: TravelMode| match self.params.speed(mode) {
            Some(speed) if street_modes.contains(mode) => {
                self.network.nearby_nodes(&point.coordinate, radius, speed)
            }
            _ => vec![],
        };
        let stops = if self.params.uses_transit() {
            self.network
                .nearby_stops(&point.coordinate, radius, self.params.speed_walking)
        } else {
            vec![]
        };
        SnappedPoint {
            id: point.id.clone(),
            walk_nodes: nearby_nodes(TravelMode::Walk),
            bike_nodes: nearby_nodes(TravelMode::Bicycle),
            stops,
        }
    }

    /// travel times from `origin` to each destination for one departure instant,
    /// in destination order. a fault inside the search is logged and reported as
    /// every destination being unreachable.
    pub fn route(
        &self,
        origin: &SnappedPoint,
        departure: NaiveDateTime,
        destinations: &[SnappedPoint],
    ) -> Vec<TravelTimeObservation> {
        match self.try_route(origin, departure, destinations) {
            Ok(observations) => observations,
            Err(fault) => {
                log::warn!(
                    "query from origin '{}' departing {} aborted, all destinations unreachable: {}",
                    origin.id,
                    departure,
                    fault
                );
                vec![TravelTimeObservation::Unreachable; destinations.len()]
            }
        }
    }

    /// as [`Router::route`], but returns the fault instead of degrading to unreachable.
    pub fn try_route(
        &self,
        origin: &SnappedPoint,
        departure: NaiveDateTime,
        destinations: &[SnappedPoint],
    ) -> Result<Vec<TravelTimeObservation>, QueryFault> {
        let departure_ms = i64::from(departure.time().num_seconds_from_midnight()) * 1000
            + i64::from(departure.time().nanosecond() / 1_000_000);
        let budget_ms = access_millis(self.params.max_time, "travel time budget")?;
        let mut state = SearchState::new(
            self.network.n_nodes(),
            self.network.n_stops(),
            departure_ms,
            departure_ms + budget_ms,
        );
        if !origin.has_access() {
            return Ok(vec![TravelTimeObservation::Unreachable; destinations.len()]);
        }

        // access and street legs
        for mode in self.params.street_modes() {
            let (seeds, speed) = match mode {
                TravelMode::Walk => (&origin.walk_nodes, self.params.speed_walking),
                TravelMode::Bicycle => (&origin.bike_nodes, self.params.speed_cycling),
                TravelMode::Transit => continue,
            };
            let seeds = seeds
                .iter()
                .map(|(node_id, access)| {
                    access_millis(*access, "origin street access")
                        .map(|ms| (*node_id, departure_ms + ms))
                })
                .collect::<Result<Vec<_>, _>>()?;
            let arrivals = match mode {
                TravelMode::Bicycle => &mut state.bike_arrivals,
                _ => &mut state.walk_arrivals,
            };
            street_search_ops::run_search(
                self.network,
                mode,
                speed,
                &seeds,
                departure_ms + budget_ms,
                arrivals,
            )?;
        }

        if self.params.uses_transit() {
            for (stop_id, access) in origin.stops.iter() {
                let ms = access_millis(*access, "origin stop access")?;
                state.improve_stop(*stop_id, departure_ms + ms)?;
            }
            let walk_arrivals = std::mem::take(&mut state.walk_arrivals);
            let bike_arrivals = std::mem::take(&mut state.bike_arrivals);
            for node_arrivals in [&walk_arrivals, &bike_arrivals] {
                street_search_ops::link_nodes_to_stops(
                    self.network,
                    node_arrivals,
                    self.params.speed_walking,
                    &mut state,
                )?;
            }
            state.walk_arrivals = walk_arrivals;
            state.bike_arrivals = bike_arrivals;

            transit_search_ops::run_rounds(
                self.network,
                self.params.max_transfers,
                departure.date(),
                &mut state,
            )?;

            let seeds =
                street_search_ops::stop_egress_seeds(self.network, &state, self.params.speed_walking)?;
            let horizon_ms = state.horizon_ms();
            street_search_ops::run_search(
                self.network,
                TravelMode::Walk,
                self.params.speed_walking,
                &seeds,
                horizon_ms,
                &mut state.egress_arrivals,
            )?;
        }

        destinations
            .iter()
            .map(|destination| egress(&state, destination))
            .collect()
    }
}

/// the earliest arrival at a destination over all of its connections to the network.
fn egress(
    state: &SearchState,
    destination: &SnappedPoint,
) -> Result<TravelTimeObservation, QueryFault> {
    let mut best: Option<i64> = None;
    let mut consider = |reached: Option<i64>, access: Time| -> Result<(), QueryFault> {
        if let Some(reached) = reached {
            let arrival = reached + access_millis(access, "destination access")?;
            best = Some(best.map_or(arrival, |b| b.min(arrival)));
        }
        Ok(())
    };
    for (node_id, access) in destination.walk_nodes.iter() {
        let on_foot = street_search_ops::node_arrival(&state.walk_arrivals, *node_id)?;
        let after_transit = street_search_ops::node_arrival(&state.egress_arrivals, *node_id)?;
        consider(min_arrival(on_foot, after_transit), *access)?;
    }
    for (node_id, access) in destination.bike_nodes.iter() {
        consider(
            street_search_ops::node_arrival(&state.bike_arrivals, *node_id)?,
            *access,
        )?;
    }
    for (stop_id, access) in destination.stops.iter() {
        consider(state.stop_arrival(*stop_id)?, *access)?;
    }

    let observation = match best {
        Some(arrival) if arrival <= state.horizon_ms() => {
            let travel_time = arrival - state.departure_ms();
            if travel_time < 0 {
                return Err(QueryFault::InvalidAccessDuration {
                    context: format!("arrival at destination '{}'", destination.id),
                    duration: travel_time as f64 / 1000.0,
                });
            }
            TravelTimeObservation::Reachable(time_ops::from_millis(travel_time))
        }
        _ => TravelTimeObservation::Unreachable,
    };
    Ok(observation)
}

fn min_arrival(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

fn access_millis(duration: Time, context: &str) -> Result<i64, QueryFault> {
    time_ops::to_millis(duration).ok_or_else(|| QueryFault::InvalidAccessDuration {
        context: context.to_string(),
        duration: duration.get::<uom::si::time::second>(),
    })
}
