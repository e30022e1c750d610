use geo::Point;
use rstar::AABB;
use uom::si::f64::Length;

use crate::model::CoordinateSystem;

/// conservative lower bound on the length of one degree of latitude, in meters.
const MIN_METERS_PER_DEGREE: f64 = 110_000.0;

/// smallest cosine used when widening a longitude search window, keeps the
/// window finite near the poles.
const MIN_COS_LATITUDE: f64 = 1e-6;

/// creates a rectangular search envelope that contains every point within `radius`
/// of `center`. the envelope is a superset of the search circle; callers must filter
/// candidates by exact distance.
///
/// # Arguments
///
/// * `center` - middle of the search
/// * `radius` - search radius
/// * `coordinate_system` - interpretation of the point coordinates
///
/// # Returns
///
/// * an envelope in the coordinate space of the point
pub fn search_envelope(
    center: &Point<f64>,
    radius: Length,
    coordinate_system: &CoordinateSystem,
) -> AABB<[f64; 2]> {
    let meters = radius.get::<uom::si::length::meter>().max(0.0);
    let (dx, dy) = match coordinate_system {
        CoordinateSystem::Planar => (meters, meters),
        CoordinateSystem::Geographic => {
            let dy = meters / MIN_METERS_PER_DEGREE;
            // a degree of longitude is shortest at the poleward edge of the window
            let widest_lat = (center.y().abs() + dy).min(90.0);
            let cos_lat = widest_lat.to_radians().cos().abs().max(MIN_COS_LATITUDE);
            let dx = (meters / (MIN_METERS_PER_DEGREE * cos_lat)).min(360.0);
            (dx, dy)
        }
    };
    AABB::from_corners(
        [center.x() - dx, center.y() - dy],
        [center.x() + dx, center.y() + dy],
    )
}

/// true if both coordinates of the point are finite numbers.
pub fn is_finite_point(point: &Point<f64>) -> bool {
    point.x().is_finite() && point.y().is_finite()
}
