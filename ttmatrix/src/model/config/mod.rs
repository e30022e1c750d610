mod config_error;
mod routing_parameters;
mod travel_time_config;

pub use config_error::ConfigError;
pub use routing_parameters::RoutingParameters;
pub use travel_time_config::TravelTimeConfig;
