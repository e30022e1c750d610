use std::{cmp::Reverse, collections::BinaryHeap};

use ttmatrix_core::model::{
    network::{NetworkModel, NodeId},
    TravelMode,
};
use uom::si::f64::{Time, Velocity};

use super::{time_ops, QueryFault, SearchState};

/// earliest-arrival search over street edges permitted for `mode`, starting
/// from the seeded nodes. arrivals later than `horizon_ms` are pruned.
///
/// # Arguments
///
/// * `network` - street graph
/// * `mode` - street mode, only edges permitting it are traversed
/// * `speed` - travel speed of the mode
/// * `seeds` - nodes with their initial arrival times
/// * `horizon_ms` - latest arrival within the travel time budget
/// * `arrivals` - per-node best arrivals, improved in place
pub fn run_search(
    network: &NetworkModel,
    mode: TravelMode,
    speed: Velocity,
    seeds: &[(NodeId, i64)],
    horizon_ms: i64,
    arrivals: &mut [Option<i64>],
) -> Result<(), QueryFault> {
    let mut frontier: BinaryHeap<Reverse<(i64, usize)>> = BinaryHeap::new();
    for (node_id, arrival) in seeds.iter() {
        if improve(arrivals, node_id.0, *arrival, horizon_ms)? {
            frontier.push(Reverse((*arrival, node_id.0)));
        }
    }

    while let Some(Reverse((arrival, node_idx))) = frontier.pop() {
        if arrivals.get(node_idx).copied().flatten() != Some(arrival) {
            continue; // stale
        }
        for edge in network.outgoing_edges(NodeId(node_idx)) {
            if !edge.permits(mode) {
                continue;
            }
            let cost_time = edge.traversal_time(speed);
            let cost = time_ops::to_millis(cost_time).ok_or_else(|| QueryFault::InvalidEdgeCost {
                edge_id: edge.edge_id,
                cost: cost_time.get::<uom::si::time::second>(),
            })?;
            let next = arrival + cost;
            let dst = edge.dst_node_id.0;
            if improve(arrivals, dst, next, horizon_ms)? {
                frontier.push(Reverse((next, dst)));
            }
        }
    }
    Ok(())
}

/// updates each stop's arrival from the street nodes its access links reach.
pub fn link_nodes_to_stops(
    network: &NetworkModel,
    node_arrivals: &[Option<i64>],
    speed_walking: Velocity,
    state: &mut SearchState,
) -> Result<(), QueryFault> {
    for stop in network.stops() {
        for link in stop.access_links.iter() {
            let Some(node_arrival) = node_arrival(node_arrivals, link.node_id)? else {
                continue;
            };
            let link_ms = link_duration(link.length / speed_walking, &stop.external_id)?;
            state.improve_stop(stop.stop_id, node_arrival + link_ms)?;
        }
    }
    Ok(())
}

/// walking search seeds for leaving every reached stop through its access links.
pub fn stop_egress_seeds(
    network: &NetworkModel,
    state: &SearchState,
    speed_walking: Velocity,
) -> Result<Vec<(NodeId, i64)>, QueryFault> {
    let mut seeds = vec![];
    for (stop, arrival) in network.stops().iter().zip(state.stop_arrivals()) {
        let Some(arrival) = arrival else {
            continue;
        };
        for link in stop.access_links.iter() {
            let link_ms = link_duration(link.length / speed_walking, &stop.external_id)?;
            seeds.push((link.node_id, arrival + link_ms));
        }
    }
    Ok(seeds)
}

pub fn node_arrival(arrivals: &[Option<i64>], node_id: NodeId) -> Result<Option<i64>, QueryFault> {
    arrivals
        .get(node_id.0)
        .copied()
        .ok_or_else(|| QueryFault::IndexOutOfRange {
            context: String::from("node"),
            index: node_id.0,
        })
}

fn link_duration(duration: Time, stop: &str) -> Result<i64, QueryFault> {
    time_ops::to_millis(duration).ok_or_else(|| QueryFault::InvalidAccessDuration {
        context: format!("access link of stop '{stop}'"),
        duration: duration.get::<uom::si::time::second>(),
    })
}

fn improve(
    arrivals: &mut [Option<i64>],
    idx: usize,
    arrival: i64,
    horizon_ms: i64,
) -> Result<bool, QueryFault> {
    let current = arrivals
        .get_mut(idx)
        .ok_or_else(|| QueryFault::IndexOutOfRange {
            context: String::from("node"),
            index: idx,
        })?;
    if arrival > horizon_ms || current.is_some_and(|c| c <= arrival) {
        return Ok(false);
    }
    *current = Some(arrival);
    Ok(true)
}
