use uom::si::f64::Time;

use super::StopId;

/// a permitted walking interchange between two stops with a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct Transfer {
    pub from_stop_id: StopId,
    pub to_stop_id: StopId,
    pub duration: Time,
}
