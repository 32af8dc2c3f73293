use iris_geometry::Point2;

use crate::IrisGeometry;

/// Radius of the clear opening: the closest any blade edge comes to the iris centre.
///
/// Returns `f64::INFINITY` for a geometry with no blades.
#[must_use]
pub fn aperture_radius(geometry: &IrisGeometry) -> f64 {
    geometry
        .blades
        .iter()
        .flat_map(|blade| blade.outline.iter())
        .map(|arc| arc.distance_from(Point2::ORIGIN))
        .fold(f64::INFINITY, f64::min)
}

#[must_use]
pub fn aperture_diameter(geometry: &IrisGeometry) -> f64 {
    2.0 * aperture_radius(geometry)
}
