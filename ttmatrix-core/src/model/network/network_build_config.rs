use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

/// options applied while constructing a [`super::NetworkModel`].
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct NetworkBuildConfig {
    /// radius in meters used to link stops without explicit access links to
    /// street nodes.
    #[serde(default = "default_stop_link_radius")]
    pub stop_link_radius: f64,
    /// maximum number of street nodes linked to such a stop.
    #[serde(default = "default_max_stop_links")]
    pub max_stop_links: usize,
}

impl NetworkBuildConfig {
    pub fn stop_link_radius(&self) -> Length {
        Length::new::<uom::si::length::meter>(self.stop_link_radius)
    }
}

impl Default for NetworkBuildConfig {
    fn default() -> Self {
        Self {
            stop_link_radius: default_stop_link_radius(),
            max_stop_links: default_max_stop_links(),
        }
    }
}

fn default_stop_link_radius() -> f64 {
    100.0
}

fn default_max_stop_links() -> usize {
    4
}
