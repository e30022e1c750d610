use geo::{Distance, Euclidean, Haversine, Point};
use serde::{Deserialize, Serialize};
use uom::si::f64::Length;

/// the coordinate reference shared by the network and all query points.
/// coordinate conversion is the caller's responsibility.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateSystem {
    /// x = longitude, y = latitude, in degrees (WGS84)
    #[default]
    Geographic,
    /// projected coordinates in meters
    Planar,
}

impl CoordinateSystem {
    /// distance between two points in this coordinate system.
    /// geographic points use the haversine formula.
    pub fn distance(&self, a: &Point<f64>, b: &Point<f64>) -> Length {
        let meters = match self {
            CoordinateSystem::Geographic => Haversine.distance(*a, *b),
            CoordinateSystem::Planar => Euclidean.distance(*a, *b),
        };
        Length::new::<uom::si::length::meter>(meters)
    }
}

#[cfg(test)]
mod test {
    use super::CoordinateSystem;
    use geo::Point;

    #[test]
    fn test_planar_distance() {
        let d = CoordinateSystem::Planar.distance(&Point::new(0.0, 0.0), &Point::new(300.0, 400.0));
        assert_eq!(d.get::<uom::si::length::meter>(), 500.0);
    }

    #[test]
    fn test_geographic_distance_one_degree_latitude() {
        let d = CoordinateSystem::Geographic
            .distance(&Point::new(-105.0, 40.0), &Point::new(-105.0, 41.0));
        let km = d.get::<uom::si::length::kilometer>();
        assert!((110.0..112.5).contains(&km), "unexpected distance {km}");
    }
}
