use crate::error::GeometryError;
use crate::extent::Extent;
use crate::geojson::GeoJsonGeometry;
use crate::geometry_type::GeometryType;
use crate::multi_point::MultiPoint;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::polyline::Polyline;
use crate::spatial_reference::SpatialReference;

/// Any of the geometries that can be exchanged with a server.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Single point.
    Point(Point),
    /// Set of points.
    MultiPoint(MultiPoint),
    /// Line of one or more paths.
    Polyline(Polyline),
    /// Area of one or more rings.
    Polygon(Polygon),
    /// Bounding box.
    Extent(Extent),
}

impl Geometry {
    /// Type tag of the geometry.
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::MultiPoint(_) => GeometryType::Multipoint,
            Geometry::Polyline(_) => GeometryType::Polyline,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::Extent(_) => GeometryType::Envelope,
        }
    }

    /// Spatial reference of the geometry.
    pub fn spatial_reference(&self) -> Option<&SpatialReference> {
        match self {
            Geometry::Point(g) => g.spatial_reference(),
            Geometry::MultiPoint(g) => g.spatial_reference(),
            Geometry::Polyline(g) => g.spatial_reference(),
            Geometry::Polygon(g) => g.spatial_reference(),
            Geometry::Extent(g) => g.spatial_reference(),
        }
    }

    /// Bounding box.
    pub fn extent(&self) -> Extent {
        match self {
            Geometry::Point(g) => g.extent(),
            Geometry::MultiPoint(g) => g.extent(),
            Geometry::Polyline(g) => g.extent(),
            Geometry::Polygon(g) => g.extent(),
            Geometry::Extent(g) => g.clone(),
        }
    }

    /// Representative point: the point itself, the pole of inaccessibility for polygons and the
    /// middle of the extent for everything else.
    pub fn center(&self) -> Result<Point, GeometryError> {
        match self {
            Geometry::Point(g) => Ok(g.center()),
            Geometry::MultiPoint(g) => Ok(g.center()),
            Geometry::Polyline(g) => Ok(g.center()),
            Geometry::Polygon(g) => g.center(),
            Geometry::Extent(g) => Ok(g.center()),
        }
    }

    /// Pole of inaccessibility. Defined for points, extents and polygons only.
    pub fn pole(&self) -> Result<Point, GeometryError> {
        match self {
            Geometry::Point(g) => Ok(g.center()),
            Geometry::Extent(g) => Ok(g.center()),
            Geometry::Polygon(g) => g.center(),
            Geometry::MultiPoint(_) => Err(GeometryError::NotImplemented("pole of a multipoint")),
            Geometry::Polyline(_) => Err(GeometryError::NotImplemented("pole of a polyline")),
        }
    }

    /// Every vertex of the geometry. Extents give their two corners.
    pub fn bounding_points(&self) -> Vec<Point> {
        match self {
            Geometry::Point(g) => vec![g.clone()],
            Geometry::MultiPoint(g) => g.points().to_vec(),
            Geometry::Polyline(g) => g.iter_points().cloned().collect(),
            Geometry::Polygon(g) => g.iter_points().cloned().collect(),
            Geometry::Extent(g) => g.bounding_points().to_vec(),
        }
    }

    /// GeoJSON representation with the matching nesting depth.
    pub fn to_geojson(&self) -> GeoJsonGeometry {
        match self {
            Geometry::Point(g) => crate::geojson::GeoJsonPoint::from(g).into(),
            Geometry::MultiPoint(g) => g.to_geojson().into(),
            Geometry::Polyline(g) => g.to_geojson(),
            Geometry::Polygon(g) => g.to_geojson().into(),
            Geometry::Extent(g) => g.to_geojson().into(),
        }
    }
}

macro_rules! impl_from_geometry {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self {
                    Geometry::$variant(value)
                }
            }
        )*
    };
}

impl_from_geometry!(Point, MultiPoint, Polyline, Polygon, Extent);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::GeoJsonGeometryType;
    use crate::path::Path;
    use assert_matches::assert_matches;

    #[test]
    fn type_tags() {
        assert_eq!(
            Geometry::from(Extent::empty()).geometry_type(),
            GeometryType::Envelope
        );
        assert_eq!(
            Geometry::from(MultiPoint::default()).geometry_type().type_string(),
            "esriGeometryMultipoint"
        );
    }

    #[test]
    fn centers() {
        let point = Point::new(1.0, 2.0).with_spatial_reference(SpatialReference::WGS84);
        assert_eq!(Geometry::from(point.clone()).center().unwrap(), point);

        let extent = Extent::new(0.0, 0.0, 2.0, 4.0);
        assert_eq!(Geometry::from(extent).center().unwrap(), Point::new(1.0, 2.0));

        let polyline = Polyline::from_paths(vec![Path::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 2.0),
        ])]);
        let geometry = Geometry::from(polyline);
        assert_eq!(geometry.center().unwrap(), Point::new(2.0, 1.0));
        assert_matches!(geometry.pole(), Err(GeometryError::NotImplemented(_)));
    }

    #[test]
    fn bounding_points_of_extent() {
        let geometry = Geometry::from(Extent::new(0.0, 1.0, 2.0, 3.0));
        assert_eq!(
            geometry.bounding_points(),
            vec![Point::new(0.0, 1.0), Point::new(2.0, 3.0)]
        );
    }

    #[test]
    fn geojson_types() {
        let cases = [
            (Geometry::from(Point::new(0.0, 0.0)), GeoJsonGeometryType::Point),
            (Geometry::from(MultiPoint::default()), GeoJsonGeometryType::MultiPoint),
            (Geometry::from(Polygon::default()), GeoJsonGeometryType::Polygon),
            (Geometry::from(Extent::empty()), GeoJsonGeometryType::Polygon),
            (Geometry::from(Polyline::default()), GeoJsonGeometryType::MultiLineString),
        ];
        for (geometry, expected) in cases {
            assert_eq!(geometry.to_geojson().geometry_type(), expected);
        }
    }
}
