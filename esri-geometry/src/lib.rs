//! Geometry model of the ArcGIS REST API: points, multipoints, polylines, polygons and extents
//! with their spatial references, together with GeoJSON geometry types and the algorithms that
//! work on them.
//!
//! Reading and writing the JSON forms lives in the `esri-json` crate.

pub mod algorithm;
pub mod cartesian;
pub mod error;
pub mod extent;
pub mod geojson;
pub mod geometry;
pub mod geometry_type;
pub mod multi_point;
pub mod path;
pub mod point;
pub mod polygon;
pub mod polyline;
pub mod segment;
pub mod size;
pub mod spatial_reference;
pub mod tolerance;

pub use error::GeometryError;
pub use extent::{extent_of_points, Extent, Interval};
pub use geometry::Geometry;
pub use geometry_type::GeometryType;
pub use multi_point::MultiPoint;
pub use path::{Path, Ring};
pub use point::{Ordinates, Point};
pub use polygon::Polygon;
pub use polyline::Polyline;
pub use size::Size;
pub use spatial_reference::SpatialReference;

/// Z and M flags for a container: set when there is at least one point and all points have the ordinate.
pub(crate) fn detect_ordinates<'a>(points: impl IntoIterator<Item = &'a Point>) -> (bool, bool) {
    let mut count = 0usize;
    let (mut has_z, mut has_m) = (true, true);
    for point in points {
        count += 1;
        has_z &= point.has_z();
        has_m &= point.has_m();
    }

    (count > 0 && has_z, count > 0 && has_m)
}
