/// invalid user configuration, found while converting a [`super::TravelTimeConfig`]
/// into [`super::RoutingParameters`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive, finite speed in km/h, found {value}")]
    InvalidSpeed { name: String, value: f64 },
    #[error("{name} must be a positive, finite number of minutes, found {value}")]
    InvalidDuration { name: String, value: f64 },
    #[error("{name} must be a non-negative, finite number of minutes ending within the supported calendar range, found {value}")]
    InvalidWindow { name: String, value: f64 },
    #[error("max_access_distance must be a non-negative, finite number of meters, found {0}")]
    InvalidDistance(f64),
    #[error("parallelism must be at least 1")]
    InvalidParallelism,
    #[error("transport_modes must contain at least one mode")]
    EmptyModes,
    #[error("failure parsing departure '{departure}': {message}")]
    InvalidDeparture { departure: String, message: String },
}
