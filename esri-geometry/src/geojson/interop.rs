//! Conversions to and from the `geojson` crate.

use super::*;
use ::geojson::{Geometry as ExternalGeometry, Value};

impl From<&GeoJsonGeometry> for ExternalGeometry {
    fn from(geometry: &GeoJsonGeometry) -> Self {
        let value = match geometry {
            GeoJsonGeometry::Point(p) => Value::Point(p.coordinates().to_vec()),
            GeoJsonGeometry::LineString(l) => Value::LineString(l.coordinates.clone()),
            GeoJsonGeometry::Polygon(p) => Value::Polygon(p.coordinates.clone()),
            GeoJsonGeometry::MultiPoint(mp) => Value::MultiPoint(mp.coordinates.clone()),
            GeoJsonGeometry::MultiLineString(ml) => Value::MultiLineString(ml.coordinates.clone()),
            GeoJsonGeometry::MultiPolygon(mp) => Value::MultiPolygon(mp.coordinates.clone()),
            GeoJsonGeometry::GeometryCollection(c) => {
                Value::GeometryCollection(c.geometries.iter().map(ExternalGeometry::from).collect())
            }
        };

        ExternalGeometry::new(value)
    }
}

impl TryFrom<&ExternalGeometry> for GeoJsonGeometry {
    type Error = GeometryError;

    fn try_from(geometry: &ExternalGeometry) -> Result<Self, Self::Error> {
        Ok(match &geometry.value {
            Value::Point(p) => GeoJsonPoint::new(p.clone())?.into(),
            Value::MultiPoint(points) => GeoJsonMultiPoint {
                coordinates: points.clone(),
            }
            .into(),
            Value::LineString(points) => GeoJsonLineString {
                coordinates: points.clone(),
            }
            .into(),
            Value::MultiLineString(lines) => GeoJsonMultiLineString {
                coordinates: lines.clone(),
            }
            .into(),
            Value::Polygon(rings) => GeoJsonPolygon {
                coordinates: rings.clone(),
            }
            .into(),
            Value::MultiPolygon(polygons) => GeoJsonMultiPolygon {
                coordinates: polygons.clone(),
            }
            .into(),
            Value::GeometryCollection(geometries) => GeoJsonGeometryCollection {
                geometries: geometries
                    .iter()
                    .map(GeoJsonGeometry::try_from)
                    .collect::<Result<_, _>>()?,
            }
            .into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_geometry_conversion() {
        let collection = GeoJsonGeometry::from(GeoJsonGeometryCollection {
            geometries: vec![
                GeoJsonPoint::new(vec![1.0, 2.0]).unwrap().into(),
                GeoJsonLineString {
                    coordinates: vec![vec![0.0, 0.0], vec![1.0, 1.0]],
                }
                .into(),
            ],
        });

        let external = ExternalGeometry::from(&collection);
        let Value::GeometryCollection(members) = &external.value else {
            panic!("expected collection");
        };
        assert_eq!(members[0].value, Value::Point(vec![1.0, 2.0]));

        assert_eq!(GeoJsonGeometry::try_from(&external).unwrap(), collection);
    }

    #[test]
    fn invalid_external_point() {
        let external = ExternalGeometry::new(Value::Point(vec![1.0]));
        assert!(GeoJsonGeometry::try_from(&external).is_err());
    }
}
