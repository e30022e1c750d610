use enumset::EnumSet;
use serde::{Deserialize, Serialize};
use ttmatrix_core::model::TravelMode;

/// user configuration of a travel time matrix run. durations are given in
/// minutes, speeds in km/h and distances in meters.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TravelTimeConfig {
    /// first departure of the window, formatted as `%Y-%m-%d %H:%M:%S`
    pub departure: String,
    /// length of the departure window, starting at `departure`
    #[serde(default = "default_departure_time_window")]
    pub departure_time_window: f64,
    /// interval between sampled departures within the window
    #[serde(default = "default_sampling_interval")]
    pub sampling_interval: f64,
    /// travel time budget; anything slower is unreachable
    #[serde(default = "default_max_time")]
    pub max_time: f64,
    #[serde(default = "default_speed_walking")]
    pub speed_walking: f64,
    #[serde(default = "default_speed_cycling")]
    pub speed_cycling: f64,
    /// maximum number of transfers between transit trips
    #[serde(default = "default_max_transfers")]
    pub max_transfers: usize,
    #[serde(default = "default_transport_modes")]
    pub transport_modes: EnumSet<TravelMode>,
    /// search radius used to connect origins and destinations to streets and stops
    #[serde(default = "default_max_access_distance")]
    pub max_access_distance: f64,
    /// worker threads used to compute the matrix
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    #[serde(default)]
    pub show_progress: bool,
}

impl TravelTimeConfig {
    /// a configuration using the defaults for every option other than the departure.
    pub fn new(departure: &str) -> TravelTimeConfig {
        TravelTimeConfig {
            departure: departure.to_string(),
            departure_time_window: default_departure_time_window(),
            sampling_interval: default_sampling_interval(),
            max_time: default_max_time(),
            speed_walking: default_speed_walking(),
            speed_cycling: default_speed_cycling(),
            max_transfers: default_max_transfers(),
            transport_modes: default_transport_modes(),
            max_access_distance: default_max_access_distance(),
            parallelism: default_parallelism(),
            show_progress: false,
        }
    }
}

fn default_departure_time_window() -> f64 {
    10.0
}

fn default_sampling_interval() -> f64 {
    1.0
}

fn default_max_time() -> f64 {
    120.0
}

fn default_speed_walking() -> f64 {
    3.6
}

fn default_speed_cycling() -> f64 {
    12.0
}

fn default_max_transfers() -> usize {
    7
}

fn default_transport_modes() -> EnumSet<TravelMode> {
    TravelMode::Walk | TravelMode::Transit
}

fn default_max_access_distance() -> f64 {
    1600.0
}

fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
