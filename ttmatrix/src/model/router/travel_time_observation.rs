use uom::si::f64::Time;

/// the outcome of one router invocation for one destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TravelTimeObservation {
    Reachable(Time),
    Unreachable,
}

impl TravelTimeObservation {
    pub fn travel_time(&self) -> Option<Time> {
        match self {
            TravelTimeObservation::Reachable(t) => Some(*t),
            TravelTimeObservation::Unreachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, TravelTimeObservation::Reachable(_))
    }
}
