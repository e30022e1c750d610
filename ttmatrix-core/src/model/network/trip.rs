use super::{CalendarId, RouteId, StopId, TripId};

/// arrival and departure at a stop, in seconds after service-day midnight.
/// values may exceed one day for trips running past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopTime {
    pub stop_id: StopId,
    pub arrival_time: u32,
    pub departure_time: u32,
}

/// one scheduled run of a transit service.
#[derive(Debug, Clone)]
pub struct Trip {
    pub trip_id: TripId,
    /// identifier of this trip in the source schedule
    pub external_id: String,
    /// route pattern this trip was assigned to during network construction
    pub route_id: RouteId,
    /// service calendar of this trip. a trip without a calendar runs every day.
    pub calendar_id: Option<CalendarId>,
    /// stop times in travel order, non-decreasing in time
    pub stop_times: Vec<StopTime>,
}

impl Trip {
    pub fn first_departure(&self) -> Option<u32> {
        self.stop_times.first().map(|st| st.departure_time)
    }
}
