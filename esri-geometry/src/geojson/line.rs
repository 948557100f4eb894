use super::{convert_positions, Position};
use crate::error::GeometryError;
use crate::multi_point::MultiPoint;
use crate::path::Path;
use crate::polyline::Polyline;

/// GeoJSON line string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoJsonLineString {
    /// Vertices.
    pub coordinates: Vec<Position>,
}

impl GeoJsonLineString {
    /// Converts to a polyline with a single path.
    pub fn to_spatial(&self) -> Result<Polyline, GeometryError> {
        let path = Path::new(convert_positions(&self.coordinates)?);
        Ok(Polyline::from_paths(vec![path]))
    }
}

/// GeoJSON multi point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoJsonMultiPoint {
    /// Member points.
    pub coordinates: Vec<Position>,
}

impl GeoJsonMultiPoint {
    /// Converts to a multipoint.
    pub fn to_spatial(&self) -> Result<MultiPoint, GeometryError> {
        Ok(MultiPoint::from_points(convert_positions(&self.coordinates)?))
    }
}

/// GeoJSON multi line string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoJsonMultiLineString {
    /// Member line strings.
    pub coordinates: Vec<Vec<Position>>,
}

impl GeoJsonMultiLineString {
    /// Converts to a polyline with one path per line string.
    pub fn to_spatial(&self) -> Result<Polyline, GeometryError> {
        let paths = self
            .coordinates
            .iter()
            .map(|line| convert_positions(line).map(Path::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polyline::from_paths(paths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn multi_line_string_keeps_all_lines() {
        let lines = GeoJsonMultiLineString {
            coordinates: vec![
                vec![vec![0.0, 0.0], vec![1.0, 0.0]],
                vec![vec![2.0, 2.0], vec![3.0, 3.0], vec![4.0, 2.0]],
            ],
        };
        let polyline = lines.to_spatial().unwrap();
        assert_eq!(polyline.paths().len(), 2);
        assert_eq!(polyline.paths()[1].len(), 3);
        assert!(!polyline.has_z());
    }

    #[test]
    fn multi_point_detects_elevation() {
        let points = GeoJsonMultiPoint {
            coordinates: vec![vec![0.0, 0.0, 1.0], vec![1.0, 0.0, 2.0]],
        };
        let multi_point = points.to_spatial().unwrap();
        assert!(multi_point.has_z());
        assert!(!multi_point.has_m());
        assert_eq!(multi_point.points()[1], Point::new_z(1.0, 0.0, 2.0));
    }

    #[test]
    fn short_position_is_an_error() {
        let line = GeoJsonLineString {
            coordinates: vec![vec![0.0, 0.0], vec![1.0]],
        };
        assert!(line.to_spatial().is_err());
    }
}
