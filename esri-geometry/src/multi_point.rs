use crate::extent::{extent_of_points, Extent};
use crate::geojson::GeoJsonMultiPoint;
use crate::point::Point;
use crate::spatial_reference::SpatialReference;

/// An unordered set of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiPoint {
    points: Vec<Point>,
    has_z: bool,
    has_m: bool,
    spatial_reference: Option<SpatialReference>,
}

impl MultiPoint {
    /// Creates a multipoint with explicit Z and M flags.
    pub fn new(points: Vec<Point>, has_z: bool, has_m: bool) -> Self {
        Self {
            points,
            has_z,
            has_m,
            spatial_reference: None,
        }
    }

    /// Creates a multipoint, setting the Z and M flags when every point has the ordinate.
    pub fn from_points(points: Vec<Point>) -> Self {
        let (has_z, has_m) = crate::detect_ordinates(&points);
        Self::new(points, has_z, has_m)
    }

    /// Sets the spatial reference.
    pub fn with_spatial_reference(
        mut self,
        spatial_reference: impl Into<Option<SpatialReference>>,
    ) -> Self {
        self.spatial_reference = spatial_reference.into();
        self
    }

    /// Member points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// True if the points carry elevation.
    pub fn has_z(&self) -> bool {
        self.has_z
    }

    /// True if the points carry a measure.
    pub fn has_m(&self) -> bool {
        self.has_m
    }

    /// Spatial reference.
    pub fn spatial_reference(&self) -> Option<&SpatialReference> {
        self.spatial_reference.as_ref()
    }

    /// Bounding box of the points, in the multipoint's spatial reference.
    pub fn extent(&self) -> Extent {
        extent_of_points(&self.points).with_spatial_reference(self.spatial_reference.clone())
    }

    /// Midpoint of the extent.
    pub fn center(&self) -> Point {
        self.extent().center()
    }

    /// GeoJSON multi point with the same positions.
    pub fn to_geojson(&self) -> GeoJsonMultiPoint {
        GeoJsonMultiPoint {
            coordinates: self.points.iter().map(Point::to_coordinates).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_uses_own_spatial_reference() {
        let multi_point = MultiPoint::from_points(vec![Point::new(0.0, 0.0), Point::new(2.0, 4.0)])
            .with_spatial_reference(SpatialReference::WGS84);
        let extent = multi_point.extent();
        assert_eq!(extent.spatial_reference(), Some(&SpatialReference::WGS84));
        assert_eq!(multi_point.center().x(), 1.0);
        assert_eq!(multi_point.center().y(), 2.0);
    }

    #[test]
    fn flags_detected_from_points() {
        let mixed = MultiPoint::from_points(vec![Point::new_z(0.0, 0.0, 1.0), Point::new(2.0, 4.0)]);
        assert!(!mixed.has_z());
        let all_z = MultiPoint::from_points(vec![Point::new_zm(0.0, 0.0, 1.0, 2.0)]);
        assert!(all_z.has_z());
        assert!(all_z.has_m());
        assert!(!MultiPoint::from_points(vec![]).has_z());
    }

    #[test]
    fn geojson_nesting() {
        let multi_point = MultiPoint::from_points(vec![Point::new(0.0, 1.0), Point::new_z(2.0, 3.0, 4.0)]);
        assert_eq!(
            multi_point.to_geojson().coordinates,
            vec![vec![0.0, 1.0], vec![2.0, 3.0, 4.0]]
        );
    }
}
