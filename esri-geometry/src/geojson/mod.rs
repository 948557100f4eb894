//! GeoJSON geometry objects and their conversion to the ArcGIS model.

use crate::error::GeometryError;
use crate::geometry::Geometry;
use crate::point::Point;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

mod line;
mod point;
mod polygon;

#[cfg(feature = "geojson")]
mod interop;

pub use line::{GeoJsonLineString, GeoJsonMultiLineString, GeoJsonMultiPoint};
pub use point::GeoJsonPoint;
pub use polygon::{GeoJsonMultiPolygon, GeoJsonPolygon};

/// A GeoJSON position: `[x, y, z?, m?]`.
pub type Position = Vec<f64>;

/// Value of the GeoJSON `type` member for geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum GeoJsonGeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeoJsonGeometryType {
    /// The `type` string.
    pub fn as_str(self) -> &'static str {
        match self {
            GeoJsonGeometryType::Point => "Point",
            GeoJsonGeometryType::LineString => "LineString",
            GeoJsonGeometryType::Polygon => "Polygon",
            GeoJsonGeometryType::MultiPoint => "MultiPoint",
            GeoJsonGeometryType::MultiLineString => "MultiLineString",
            GeoJsonGeometryType::MultiPolygon => "MultiPolygon",
            GeoJsonGeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// Nesting depth of the `coordinates` array. `None` for collections.
    pub fn coordinates_depth(self) -> Option<usize> {
        match self {
            GeoJsonGeometryType::Point => Some(1),
            GeoJsonGeometryType::LineString | GeoJsonGeometryType::MultiPoint => Some(2),
            GeoJsonGeometryType::Polygon | GeoJsonGeometryType::MultiLineString => Some(3),
            GeoJsonGeometryType::MultiPolygon => Some(4),
            GeoJsonGeometryType::GeometryCollection => None,
        }
    }
}

impl Display for GeoJsonGeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeoJsonGeometryType {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Point" => GeoJsonGeometryType::Point,
            "LineString" => GeoJsonGeometryType::LineString,
            "Polygon" => GeoJsonGeometryType::Polygon,
            "MultiPoint" => GeoJsonGeometryType::MultiPoint,
            "MultiLineString" => GeoJsonGeometryType::MultiLineString,
            "MultiPolygon" => GeoJsonGeometryType::MultiPolygon,
            "GeometryCollection" => GeoJsonGeometryType::GeometryCollection,
            _ => {
                return Err(GeometryError::Format(format!(
                    "unknown GeoJSON geometry type '{s}'"
                )))
            }
        })
    }
}

/// A collection of heterogeneous GeoJSON geometries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoJsonGeometryCollection {
    /// Member geometries.
    pub geometries: Vec<GeoJsonGeometry>,
}

/// Any GeoJSON geometry.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum GeoJsonGeometry {
    Point(GeoJsonPoint),
    LineString(GeoJsonLineString),
    Polygon(GeoJsonPolygon),
    MultiPoint(GeoJsonMultiPoint),
    MultiLineString(GeoJsonMultiLineString),
    MultiPolygon(GeoJsonMultiPolygon),
    GeometryCollection(GeoJsonGeometryCollection),
}

impl GeoJsonGeometry {
    /// The `type` tag of the geometry.
    pub fn geometry_type(&self) -> GeoJsonGeometryType {
        match self {
            GeoJsonGeometry::Point(_) => GeoJsonGeometryType::Point,
            GeoJsonGeometry::LineString(_) => GeoJsonGeometryType::LineString,
            GeoJsonGeometry::Polygon(_) => GeoJsonGeometryType::Polygon,
            GeoJsonGeometry::MultiPoint(_) => GeoJsonGeometryType::MultiPoint,
            GeoJsonGeometry::MultiLineString(_) => GeoJsonGeometryType::MultiLineString,
            GeoJsonGeometry::MultiPolygon(_) => GeoJsonGeometryType::MultiPolygon,
            GeoJsonGeometry::GeometryCollection(_) => GeoJsonGeometryType::GeometryCollection,
        }
    }

    /// Converts to the ArcGIS geometry model.
    ///
    /// Line strings become single-path polylines, multi polygons keep only their first polygon
    /// and geometry collections are not supported.
    pub fn to_spatial(&self) -> Result<Geometry, GeometryError> {
        Ok(match self {
            GeoJsonGeometry::Point(p) => p.to_spatial().into(),
            GeoJsonGeometry::LineString(l) => l.to_spatial()?.into(),
            GeoJsonGeometry::Polygon(p) => p.to_spatial()?.into(),
            GeoJsonGeometry::MultiPoint(mp) => mp.to_spatial()?.into(),
            GeoJsonGeometry::MultiLineString(ml) => ml.to_spatial()?.into(),
            GeoJsonGeometry::MultiPolygon(mp) => mp.to_spatial()?.into(),
            GeoJsonGeometry::GeometryCollection(_) => {
                return Err(GeometryError::NotImplemented(
                    "conversion of a GeoJSON geometry collection",
                ))
            }
        })
    }
}

macro_rules! impl_from_geojson {
    ($($variant:ident($ty:ty)),*) => {
        $(
            impl From<$ty> for GeoJsonGeometry {
                fn from(value: $ty) -> Self {
                    GeoJsonGeometry::$variant(value)
                }
            }
        )*
    };
}

impl_from_geojson!(
    Point(GeoJsonPoint),
    LineString(GeoJsonLineString),
    Polygon(GeoJsonPolygon),
    MultiPoint(GeoJsonMultiPoint),
    MultiLineString(GeoJsonMultiLineString),
    MultiPolygon(GeoJsonMultiPolygon),
    GeometryCollection(GeoJsonGeometryCollection)
);

fn convert_positions(positions: &[Position]) -> Result<Vec<Point>, GeometryError> {
    positions
        .iter()
        .map(|p| Point::from_coordinates(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn type_tags() {
        assert_eq!("MultiPolygon".parse(), Ok(GeoJsonGeometryType::MultiPolygon));
        assert!("multipolygon".parse::<GeoJsonGeometryType>().is_err());
        assert_eq!(GeoJsonGeometryType::MultiPolygon.coordinates_depth(), Some(4));
        assert_eq!(GeoJsonGeometryType::MultiPoint.coordinates_depth(), Some(2));
    }

    #[test]
    fn collection_is_not_converted() {
        let collection = GeoJsonGeometry::from(GeoJsonGeometryCollection::default());
        assert_matches!(
            collection.to_spatial(),
            Err(GeometryError::NotImplemented(_))
        );
    }

    #[test]
    fn line_string_becomes_single_path_polyline() {
        let line = GeoJsonGeometry::from(GeoJsonLineString {
            coordinates: vec![vec![0.0, 0.0], vec![1.0, 1.0, 5.0]],
        });
        let Geometry::Polyline(polyline) = line.to_spatial().unwrap() else {
            panic!("expected polyline");
        };
        assert_eq!(polyline.paths().len(), 1);
        assert_eq!(polyline.paths()[0].points()[1], Point::new_z(1.0, 1.0, 5.0));
    }
}
