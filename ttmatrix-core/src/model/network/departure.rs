use skiplist::OrderedSkipList;

use super::{RouteId, TripId};

/// the departures of all trips on one route from one stop position, ordered
/// by departure time.
pub type Schedule = OrderedSkipList<Departure>;

/// a single departure from a route position, recorded with the trip's arrival
/// time at the next stop of the route. times are seconds after service-day midnight.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Departure {
    pub departure_time: u32,
    pub next_arrival_time: u32,
    pub trip_id: TripId,
}

impl Departure {
    /// creates the search key for departures at or after `time`. it orders
    /// before every departure leaving at `time` itself, so the lookup is inclusive.
    pub fn construct_query(time: u32) -> Self {
        Self {
            departure_time: time,
            next_arrival_time: 0,
            trip_id: TripId(0),
        }
    }
}

impl PartialEq for Departure {
    fn eq(&self, other: &Self) -> bool {
        self.departure_time == other.departure_time
            && self.next_arrival_time == other.next_arrival_time
            && self.trip_id == other.trip_id
    }
}

impl PartialOrd for Departure {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// departures leaving at the same time are ordered by their arrival at the next stop.
impl Ord for Departure {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.departure_time
            .cmp(&other.departure_time)
            .then(self.next_arrival_time.cmp(&other.next_arrival_time))
            .then(self.trip_id.cmp(&other.trip_id))
    }
}

/// a trip leaving a stop, as listed by [`super::NetworkModel::trips_departing_after`].
/// field order defines the ordering: earliest departure first, then earliest
/// arrival at the next stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TripDeparture {
    pub departure_time: u32,
    pub next_arrival_time: u32,
    pub route_id: RouteId,
    /// index of the departing stop within the route's stop sequence
    pub position: usize,
    pub trip_id: TripId,
}

#[cfg(test)]
mod test {
    use super::*;
    use std::ops::Bound;

    fn departure(departure_time: u32, next_arrival_time: u32, trip: usize) -> Departure {
        Departure {
            departure_time,
            next_arrival_time,
            trip_id: TripId(trip),
        }
    }

    #[test]
    fn test_query_is_inclusive() {
        let mut schedule = Schedule::new();
        schedule.insert(departure(100, 200, 0));
        schedule.insert(departure(300, 400, 1));
        let query = Departure::construct_query(300);
        let next = schedule
            .lower_bound(Bound::Included(&query))
            .expect("test failed: departure at query time not found");
        assert_eq!(next.trip_id, TripId(1));
    }

    #[test]
    fn test_same_departure_prefers_earliest_next_arrival() {
        let mut schedule = Schedule::new();
        schedule.insert(departure(300, 500, 0));
        schedule.insert(departure(300, 420, 1));
        let query = Departure::construct_query(250);
        let next = schedule
            .lower_bound(Bound::Included(&query))
            .expect("test failed");
        assert_eq!(next.trip_id, TripId(1));
    }
}
