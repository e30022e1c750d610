use super::{RouteId, Schedule, StopId, TripId};

/// a route pattern: trips sharing an identical stop sequence, none of which
/// overtakes another. within a route, a trip that leaves a stop earlier
/// arrives at every later stop no later than the trips leaving after it.
pub struct Route {
    pub route_id: RouteId,
    pub stops: Vec<StopId>,
    /// trips on this route, ordered by first departure
    pub trips: Vec<TripId>,
    /// one departure schedule for each boardable position (all but the last stop)
    pub schedules: Vec<Schedule>,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("route_id", &self.route_id)
            .field("stops", &self.stops)
            .field("trips", &self.trips)
            .finish()
    }
}
