pub mod config;
pub mod matrix;
pub mod router;
pub mod sampler;
