use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

/// a mode of travel. walking and cycling run over street edges, transit runs
/// over the scheduled trips of the network.
#[derive(EnumSetType, Debug, Serialize, Deserialize)]
#[enumset(serialize_repr = "list")]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Walk,
    Bicycle,
    Transit,
}

impl TravelMode {
    /// the modes that traverse street edges
    pub fn street_modes() -> EnumSet<TravelMode> {
        TravelMode::Walk | TravelMode::Bicycle
    }

    pub fn is_street_mode(&self) -> bool {
        TravelMode::street_modes().contains(*self)
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TravelMode::Walk => "walk",
            TravelMode::Bicycle => "bicycle",
            TravelMode::Transit => "transit",
        };
        write!(f, "{s}")
    }
}
