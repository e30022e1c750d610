use std::cmp::Ordering;

use geo::Point;
use rstar::{primitives::GeomWithData, RTree};
use uom::si::f64::Length;

use crate::{model::CoordinateSystem, util::geo_utils};

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// an R-tree over point locations, answering radius queries in meters
/// regardless of the coordinate system of the points.
pub struct PointIndex {
    rtree: RTree<IndexedPoint>,
    coordinate_system: CoordinateSystem,
}

impl PointIndex {
    /// bulk loads an index where each point is tagged with its position in `points`.
    pub fn new(points: &[Point<f64>], coordinate_system: CoordinateSystem) -> PointIndex {
        let entries = points
            .iter()
            .enumerate()
            .map(|(idx, p)| GeomWithData::new([p.x(), p.y()], idx))
            .collect();
        PointIndex {
            rtree: RTree::bulk_load(entries),
            coordinate_system,
        }
    }

    /// finds all indexed points within `radius` of `point`, ordered nearest first.
    /// equidistant points are ordered by index so results are deterministic.
    pub fn within_distance(&self, point: &Point<f64>, radius: Length) -> Vec<(usize, Length)> {
        let envelope = geo_utils::search_envelope(point, radius, &self.coordinate_system);
        let mut found = self
            .rtree
            .locate_in_envelope(&envelope)
            .filter_map(|entry| {
                let [x, y] = *entry.geom();
                let distance = self.coordinate_system.distance(point, &Point::new(x, y));
                (distance <= radius).then_some((entry.data, distance))
            })
            .collect::<Vec<_>>();
        found.sort_by(|(a_idx, a_dist), (b_idx, b_dist)| {
            a_dist
                .partial_cmp(b_dist)
                .unwrap_or(Ordering::Equal)
                .then(a_idx.cmp(b_idx))
        });
        found
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use uom::si::length::meter;

    #[test]
    fn test_within_distance_nearest_first() {
        let points = vec![
            Point::new(100.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 50.0),
            Point::new(1000.0, 1000.0),
        ];
        let index = PointIndex::new(&points, CoordinateSystem::Planar);
        let found = index.within_distance(&Point::new(0.0, 0.0), Length::new::<meter>(100.0));
        let ids = found.iter().map(|(idx, _)| *idx).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 0]);
    }

    #[test]
    fn test_within_distance_empty() {
        let points = vec![Point::new(1000.0, 1000.0)];
        let index = PointIndex::new(&points, CoordinateSystem::Planar);
        let found = index.within_distance(&Point::new(0.0, 0.0), Length::new::<meter>(100.0));
        assert!(found.is_empty());
    }
}
