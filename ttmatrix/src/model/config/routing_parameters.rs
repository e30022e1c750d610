use chrono::{NaiveDateTime, TimeDelta};
use enumset::EnumSet;
use ttmatrix_core::{model::TravelMode, util::date_deserialization_ops};
use uom::si::f64::{Length, Time, Velocity};

use super::{ConfigError, TravelTimeConfig};

/// validated, typed routing options shared by every router invocation of a batch.
#[derive(Clone, Debug)]
pub struct RoutingParameters {
    pub departure: NaiveDateTime,
    pub departure_time_window: TimeDelta,
    pub sampling_interval: TimeDelta,
    pub max_time: Time,
    pub speed_walking: Velocity,
    pub speed_cycling: Velocity,
    pub max_transfers: usize,
    pub transport_modes: EnumSet<TravelMode>,
    pub max_access_distance: Length,
    pub parallelism: usize,
    pub show_progress: bool,
}

impl RoutingParameters {
    pub fn uses_transit(&self) -> bool {
        self.transport_modes.contains(TravelMode::Transit)
    }

    /// street modes searched from an origin. walking is searched whenever transit
    /// is enabled, since stops are reached on foot.
    pub fn street_modes(&self) -> EnumSet<TravelMode> {
        let mut modes = self.transport_modes & TravelMode::street_modes();
        if self.uses_transit() {
            modes.insert(TravelMode::Walk);
        }
        modes
    }

    /// travel speed of a street mode. transit has no fixed speed.
    pub fn speed(&self, mode: TravelMode) -> Option<Velocity> {
        match mode {
            TravelMode::Walk => Some(self.speed_walking),
            TravelMode::Bicycle => Some(self.speed_cycling),
            TravelMode::Transit => None,
        }
    }
}

impl TryFrom<&TravelTimeConfig> for RoutingParameters {
    type Error = ConfigError;

    fn try_from(conf: &TravelTimeConfig) -> Result<Self, Self::Error> {
        let departure =
            date_deserialization_ops::naive_datetime_from_str(&conf.departure).map_err(|e| {
                ConfigError::InvalidDeparture {
                    departure: conf.departure.clone(),
                    message: e.to_string(),
                }
            })?;
        let departure_time_window =
            minutes_to_delta("departure_time_window", conf.departure_time_window, true)?;
        let sampling_interval = minutes_to_delta("sampling_interval", conf.sampling_interval, false)?;
        let max_time = minutes_to_delta("max_time", conf.max_time, false)?;
        let speed_walking = kph_to_velocity("speed_walking", conf.speed_walking)?;
        let speed_cycling = kph_to_velocity("speed_cycling", conf.speed_cycling)?;
        if !conf.max_access_distance.is_finite() || conf.max_access_distance < 0.0 {
            return Err(ConfigError::InvalidDistance(conf.max_access_distance));
        }
        if conf.transport_modes.is_empty() {
            return Err(ConfigError::EmptyModes);
        }
        if conf.parallelism == 0 {
            return Err(ConfigError::InvalidParallelism);
        }
        Ok(RoutingParameters {
            departure,
            departure_time_window,
            sampling_interval,
            max_time: Time::new::<uom::si::time::millisecond>(
                max_time.num_milliseconds() as f64,
            ),
            speed_walking,
            speed_cycling,
            max_transfers: conf.max_transfers,
            transport_modes: conf.transport_modes,
            max_access_distance: Length::new::<uom::si::length::meter>(conf.max_access_distance),
            parallelism: conf.parallelism,
            show_progress: conf.show_progress,
        })
    }
}

/// converts a number of minutes into a millisecond-resolution time delta.
fn minutes_to_delta(name: &str, minutes: f64, allow_zero: bool) -> Result<TimeDelta, ConfigError> {
    let invalid = || {
        if allow_zero {
            ConfigError::InvalidWindow {
                name: name.to_string(),
                value: minutes,
            }
        } else {
            ConfigError::InvalidDuration {
                name: name.to_string(),
                value: minutes,
            }
        }
    };
    if !minutes.is_finite() || minutes < 0.0 {
        return Err(invalid());
    }
    let millis = (minutes * 60_000.0).round();
    if millis > i64::MAX as f64 {
        return Err(invalid());
    }
    let millis = millis as i64;
    if millis == 0 && !allow_zero {
        return Err(invalid());
    }
    TimeDelta::try_milliseconds(millis).ok_or_else(invalid)
}

fn kph_to_velocity(name: &str, kph: f64) -> Result<Velocity, ConfigError> {
    if kph.is_finite() && kph > 0.0 {
        Ok(Velocity::new::<uom::si::velocity::kilometer_per_hour>(kph))
    } else {
        Err(ConfigError::InvalidSpeed {
            name: name.to_string(),
            value: kph,
        })
    }
}
