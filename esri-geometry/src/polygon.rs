use crate::algorithm::polylabel::{find_pole, PolylabelOptions};
use crate::error::GeometryError;
use crate::extent::{extent_of_points, Extent};
use crate::geojson::GeoJsonPolygon;
use crate::path::Ring;
use crate::point::Point;
use crate::spatial_reference::SpatialReference;

/// An area bounded by rings. The first ring is the exterior, following rings are holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    rings: Vec<Ring>,
    has_z: bool,
    has_m: bool,
    spatial_reference: Option<SpatialReference>,
}

impl Polygon {
    /// Creates a polygon with explicit Z and M flags.
    pub fn new(rings: Vec<Ring>, has_z: bool, has_m: bool) -> Self {
        Self {
            rings,
            has_z,
            has_m,
            spatial_reference: None,
        }
    }

    /// Creates a polygon, setting the Z and M flags when every vertex has the ordinate.
    pub fn from_rings(rings: Vec<Ring>) -> Self {
        let (has_z, has_m) = crate::detect_ordinates(rings.iter().flat_map(Ring::points));
        Self::new(rings, has_z, has_m)
    }

    /// Sets the spatial reference.
    pub fn with_spatial_reference(
        mut self,
        spatial_reference: impl Into<Option<SpatialReference>>,
    ) -> Self {
        self.spatial_reference = spatial_reference.into();
        self
    }

    /// Rings.
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// The first ring.
    pub fn exterior(&self) -> Option<&Ring> {
        self.rings.first()
    }

    /// True if the vertices carry elevation.
    pub fn has_z(&self) -> bool {
        self.has_z
    }

    /// True if the vertices carry a measure.
    pub fn has_m(&self) -> bool {
        self.has_m
    }

    /// Spatial reference.
    pub fn spatial_reference(&self) -> Option<&SpatialReference> {
        self.spatial_reference.as_ref()
    }

    /// Iterates over the vertices of all rings.
    pub fn iter_points(&self) -> impl Iterator<Item = &Point> {
        self.rings.iter().flat_map(Ring::points)
    }

    /// Bounding box of all vertices, in the polygon's spatial reference.
    pub fn extent(&self) -> Extent {
        extent_of_points(self.iter_points()).with_spatial_reference(self.spatial_reference.clone())
    }

    /// Pole of inaccessibility with the default precision.
    pub fn center(&self) -> Result<Point, GeometryError> {
        self.pole(&PolylabelOptions::default())
    }

    /// Pole of inaccessibility: the interior point farthest from the boundary.
    pub fn pole(&self, options: &PolylabelOptions) -> Result<Point, GeometryError> {
        find_pole(self, options).map(|pole| pole.point)
    }

    /// GeoJSON polygon with the same rings.
    pub fn to_geojson(&self) -> GeoJsonPolygon {
        GeoJsonPolygon {
            coordinates: self.rings.iter().map(Ring::to_coordinates).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn l_shape() -> Polygon {
        let ring: Ring = [
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 2.0),
            (2.0, 2.0),
            (2.0, 10.0),
            (0.0, 10.0),
            (0.0, 0.0),
        ]
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();
        Polygon::from_rings(vec![ring]).with_spatial_reference(SpatialReference::WEB_MERCATOR)
    }

    #[test]
    fn center_is_inside_concave_polygon() {
        let polygon = l_shape();
        let extent_center = polygon.extent().center();
        assert_eq!(extent_center, Point::new(5.0, 5.0).with_spatial_reference(SpatialReference::WEB_MERCATOR));

        let center = polygon.center().unwrap();
        assert!(center.x() < 2.0 || center.y() < 2.0);
        assert_eq!(center.spatial_reference(), Some(&SpatialReference::WEB_MERCATOR));
    }

    #[test]
    fn pole_with_fine_precision() {
        let pole = l_shape()
            .pole(&PolylabelOptions::default().with_precision(0.01))
            .unwrap();
        // inscribed circle touching both outer edges and the inner corner at (2, 2)
        let expected = 2.0 * 2f64.sqrt() / (1.0 + 2f64.sqrt());
        assert_abs_diff_eq!(pole.x(), expected, epsilon = 0.05);
        assert_abs_diff_eq!(pole.y(), expected, epsilon = 0.05);
    }

    #[test]
    fn geojson_rings() {
        let polygon = l_shape().to_geojson();
        assert_eq!(polygon.coordinates.len(), 1);
        assert_eq!(polygon.coordinates[0][1], vec![10.0, 0.0]);
    }
}
