use ttmatrix_core::model::network::StopId;

use super::QueryFault;

/// the private, mutable state of one router invocation. arrival times are
/// milliseconds on the router clock, indexed by node or stop id. `None` marks a
/// location not reached within the travel time budget.
pub struct SearchState {
    departure_ms: i64,
    horizon_ms: i64,
    /// street nodes reached on foot from the origin
    pub walk_arrivals: Vec<Option<i64>>,
    /// street nodes reached by bicycle from the origin
    pub bike_arrivals: Vec<Option<i64>>,
    /// street nodes reached on foot after leaving transit
    pub egress_arrivals: Vec<Option<i64>>,
    stop_arrivals: Vec<Option<i64>>,
    marked: Vec<bool>,
}

impl SearchState {
    pub fn new(n_nodes: usize, n_stops: usize, departure_ms: i64, horizon_ms: i64) -> SearchState {
        SearchState {
            departure_ms,
            horizon_ms,
            walk_arrivals: vec![None; n_nodes],
            bike_arrivals: vec![None; n_nodes],
            egress_arrivals: vec![None; n_nodes],
            stop_arrivals: vec![None; n_stops],
            marked: vec![false; n_stops],
        }
    }

    pub fn departure_ms(&self) -> i64 {
        self.departure_ms
    }

    /// latest arrival time still within the travel time budget
    pub fn horizon_ms(&self) -> i64 {
        self.horizon_ms
    }

    pub fn stop_arrivals(&self) -> &[Option<i64>] {
        &self.stop_arrivals
    }

    pub fn stop_arrival(&self, stop_id: StopId) -> Result<Option<i64>, QueryFault> {
        self.stop_arrivals
            .get(stop_id.0)
            .copied()
            .ok_or_else(|| stop_out_of_range(stop_id))
    }

    /// records `arrival` at a stop if it is within budget and earlier than the
    /// best known arrival, marking the stop for the next transit round.
    pub fn improve_stop(&mut self, stop_id: StopId, arrival: i64) -> Result<bool, QueryFault> {
        let current = self
            .stop_arrivals
            .get_mut(stop_id.0)
            .ok_or_else(|| stop_out_of_range(stop_id))?;
        if arrival > self.horizon_ms || current.is_some_and(|c| c <= arrival) {
            return Ok(false);
        }
        *current = Some(arrival);
        if let Some(mark) = self.marked.get_mut(stop_id.0) {
            *mark = true;
        }
        Ok(true)
    }

    /// stops marked since marks were last taken, with their current best arrival
    pub fn marked(&self) -> Vec<(StopId, i64)> {
        self.marked
            .iter()
            .zip(self.stop_arrivals.iter())
            .enumerate()
            .filter_map(|(idx, (mark, arrival))| match (mark, arrival) {
                (true, Some(arrival)) => Some((StopId(idx), *arrival)),
                _ => None,
            })
            .collect()
    }

    /// like [`SearchState::marked`], but also clears all marks
    pub fn take_marked(&mut self) -> Vec<(StopId, i64)> {
        let mut taken = vec![];
        for (idx, mark) in self.marked.iter_mut().enumerate() {
            if *mark {
                *mark = false;
                if let Some(arrival) = self.stop_arrivals[idx] {
                    taken.push((StopId(idx), arrival));
                }
            }
        }
        taken
    }
}

fn stop_out_of_range(stop_id: StopId) -> QueryFault {
    QueryFault::IndexOutOfRange {
        context: String::from("stop"),
        index: stop_id.0,
    }
}
