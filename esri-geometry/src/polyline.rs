use crate::extent::{extent_of_points, Extent};
use crate::geojson::{GeoJsonGeometry, GeoJsonLineString, GeoJsonMultiLineString};
use crate::path::Path;
use crate::point::Point;
use crate::spatial_reference::SpatialReference;

/// A line made of one or more paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    paths: Vec<Path>,
    has_z: bool,
    has_m: bool,
    spatial_reference: Option<SpatialReference>,
}

impl Polyline {
    /// Creates a polyline with explicit Z and M flags.
    pub fn new(paths: Vec<Path>, has_z: bool, has_m: bool) -> Self {
        Self {
            paths,
            has_z,
            has_m,
            spatial_reference: None,
        }
    }

    /// Creates a polyline, setting the Z and M flags when every vertex has the ordinate.
    pub fn from_paths(paths: Vec<Path>) -> Self {
        let (has_z, has_m) = crate::detect_ordinates(paths.iter().flat_map(Path::points));
        Self::new(paths, has_z, has_m)
    }

    /// Sets the spatial reference.
    pub fn with_spatial_reference(
        mut self,
        spatial_reference: impl Into<Option<SpatialReference>>,
    ) -> Self {
        self.spatial_reference = spatial_reference.into();
        self
    }

    /// Paths.
    pub fn paths(&self) -> &[Path] {
        &self.paths
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

    /// Iterates over the vertices of all paths.
    pub fn iter_points(&self) -> impl Iterator<Item = &Point> {
        self.paths.iter().flat_map(Path::points)
    }

    /// Bounding box of all vertices, in the polyline's spatial reference.
    pub fn extent(&self) -> Extent {
        extent_of_points(self.iter_points()).with_spatial_reference(self.spatial_reference.clone())
    }

    /// Midpoint of the extent.
    pub fn center(&self) -> Point {
        self.extent().center()
    }

    /// A line string for a single path, a multi line string otherwise.
    pub fn to_geojson(&self) -> GeoJsonGeometry {
        match self.paths.as_slice() {
            [path] => GeoJsonLineString {
                coordinates: path.to_coordinates(),
            }
            .into(),
            paths => GeoJsonMultiLineString {
                coordinates: paths.iter().map(Path::to_coordinates).collect(),
            }
            .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[(f64, f64)]) -> Path {
        points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn extent_over_all_paths() {
        let polyline = Polyline::from_paths(vec![
            path(&[(0.0, 0.0), (1.0, 1.0)]),
            path(&[(5.0, -2.0), (3.0, 3.0)]),
        ]);
        assert_eq!(polyline.extent(), Extent::new(0.0, -2.0, 5.0, 3.0));
        assert_eq!(polyline.center(), Point::new(2.5, 0.5));
        assert_eq!(polyline.iter_points().count(), 4);
    }

    #[test]
    fn geojson_depth_follows_path_count() {
        let single = Polyline::from_paths(vec![path(&[(0.0, 0.0), (1.0, 1.0)])]);
        assert!(matches!(single.to_geojson(), GeoJsonGeometry::LineString(_)));

        let multi = Polyline::from_paths(vec![
            path(&[(0.0, 0.0), (1.0, 1.0)]),
            path(&[(2.0, 2.0), (3.0, 3.0)]),
        ]);
        let GeoJsonGeometry::MultiLineString(lines) = multi.to_geojson() else {
            panic!("expected multi line string");
        };
        assert_eq!(lines.coordinates.len(), 2);
    }
}
