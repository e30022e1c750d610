use std::collections::HashSet;

use chrono::{NaiveDate, TimeDelta};
use ttmatrix_core::model::network::{NetworkModel, RouteId, StopId, TripDeparture};

use super::{time_ops, QueryFault, SearchState};

/// service days searched around the departure date, so trips running past
/// midnight on the previous day and trips early on the next day are both found.
const SERVICE_DAY_OFFSETS: [i64; 3] = [-1, 0, 1];

/// round-based transit search. each round boards trips at the stops improved in
/// the previous round, rides them forward, then walks the transfers leaving the
/// stops those trips reached. the first round boards at the stops reached from
/// the origin and the transfers leaving them; at most `max_transfers + 1` rounds
/// are run.
pub fn run_rounds(
    network: &NetworkModel,
    max_transfers: usize,
    service_date: NaiveDate,
    state: &mut SearchState,
) -> Result<(), QueryFault> {
    let reached = state.marked();
    apply_transfers(network, &reached, state)?;
    for round in 0..=max_transfers {
        let boarding = state.take_marked();
        if boarding.is_empty() {
            log::trace!("transit search converged after {round} rounds");
            break;
        }
        for (stop_id, ready_ms) in boarding {
            scan_stop(network, service_date, stop_id, ready_ms, state)?;
        }
        let improved = state.marked();
        apply_transfers(network, &improved, state)?;
    }
    Ok(())
}

/// boards the earliest running trip of every route leaving `stop_id` no earlier
/// than `ready_ms`.
fn scan_stop(
    network: &NetworkModel,
    service_date: NaiveDate,
    stop_id: StopId,
    ready_ms: i64,
    state: &mut SearchState,
) -> Result<(), QueryFault> {
    for day_offset in SERVICE_DAY_OFFSETS {
        let Some(date) = service_date.checked_add_signed(TimeDelta::days(day_offset)) else {
            continue;
        };
        let day_start_ms = day_offset * time_ops::DAY_MS;
        let earliest = time_ops::schedule_seconds_at_or_after(ready_ms - day_start_ms);
        let mut boarded: HashSet<RouteId> = HashSet::new();
        for departure in network.trips_departing_after(stop_id, earliest) {
            let board_ms = day_start_ms + i64::from(departure.departure_time) * 1000;
            if board_ms > state.horizon_ms() {
                break;
            }
            if boarded.contains(&departure.route_id)
                || !network.trip_runs_on(departure.trip_id, &date)
            {
                continue;
            }
            boarded.insert(departure.route_id);
            ride_trip(network, &departure, day_start_ms, board_ms, state)?;
        }
    }
    Ok(())
}

/// rides a boarded trip to the end of its route, improving every stop it reaches
/// within budget.
fn ride_trip(
    network: &NetworkModel,
    departure: &TripDeparture,
    day_start_ms: i64,
    board_ms: i64,
    state: &mut SearchState,
) -> Result<(), QueryFault> {
    let trip = network
        .get_trip(departure.trip_id)
        .ok_or_else(|| QueryFault::IndexOutOfRange {
            context: String::from("trip"),
            index: departure.trip_id.0,
        })?;
    for stop_time in trip.stop_times.iter().skip(departure.position + 1) {
        let arrival = day_start_ms + i64::from(stop_time.arrival_time) * 1000;
        if arrival < board_ms {
            return Err(QueryFault::TimeReversal {
                trip_id: trip.trip_id,
                stop_id: stop_time.stop_id,
            });
        }
        if arrival > state.horizon_ms() {
            break;
        }
        state.improve_stop(stop_time.stop_id, arrival)?;
    }
    Ok(())
}

fn apply_transfers(
    network: &NetworkModel,
    improved: &[(StopId, i64)],
    state: &mut SearchState,
) -> Result<(), QueryFault> {
    for (stop_id, arrival) in improved.iter() {
        for transfer in network.transfers_from(*stop_id) {
            let duration = time_ops::to_millis(transfer.duration).ok_or_else(|| {
                QueryFault::InvalidAccessDuration {
                    context: format!(
                        "transfer from stop {} to stop {}",
                        transfer.from_stop_id, transfer.to_stop_id
                    ),
                    duration: transfer.duration.get::<uom::si::time::second>(),
                }
            })?;
            state.improve_stop(transfer.to_stop_id, arrival + duration)?;
        }
    }
    Ok(())
}
