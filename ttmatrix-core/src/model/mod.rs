mod coordinate_system;
mod travel_mode;

pub mod network;

pub use coordinate_system::CoordinateSystem;
pub use travel_mode::TravelMode;
