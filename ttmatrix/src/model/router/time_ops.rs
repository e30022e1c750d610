use uom::si::f64::Time;

/// milliseconds in one service day
pub const DAY_MS: i64 = 86_400_000;

/// converts a duration to whole milliseconds of the router clock. returns None
/// for negative, infinite or NaN durations.
pub fn to_millis(duration: Time) -> Option<i64> {
    let millis = duration.get::<uom::si::time::millisecond>().round();
    if millis.is_finite() && millis >= 0.0 && millis < i64::MAX as f64 {
        Some(millis as i64)
    } else {
        None
    }
}

pub fn from_millis(millis: i64) -> Time {
    Time::new::<uom::si::time::millisecond>(millis as f64)
}

/// earliest whole schedule second at or after a millisecond clock value.
/// values before midnight map to zero.
pub fn schedule_seconds_at_or_after(millis: i64) -> u32 {
    if millis <= 0 {
        0
    } else {
        let seconds = (millis + 999) / 1000;
        u32::try_from(seconds).unwrap_or(u32::MAX)
    }
}
