mod departure_sampler;

pub use departure_sampler::DepartureSampler;
