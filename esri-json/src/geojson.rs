//! GeoJSON geometry objects: `{"type": "...", "coordinates": [...]}`.
//!
//! The `coordinates` array is walked to the depth fixed by the `type`. Entries that are not arrays
//! where an array is expected are skipped, so a depth mismatch gives a short or empty geometry
//! rather than an error.

use crate::decode::{compact_numbers, kind, unexpected, JsonDecode};
use crate::encode::{numbers, Encoding, JsonEncode};
use crate::error::CodecError;
use esri_geometry::geojson::{
    GeoJsonGeometry, GeoJsonGeometryCollection, GeoJsonGeometryType, GeoJsonLineString,
    GeoJsonMultiLineString, GeoJsonMultiPoint, GeoJsonMultiPolygon, GeoJsonPoint, GeoJsonPolygon,
    Position,
};
use serde_json::{Map, Value};

fn position(value: &Value) -> Result<Position, CodecError> {
    match value {
        Value::Array(items) => compact_numbers(items),
        other => Err(unexpected("a position array", other)),
    }
}

fn nested<T>(
    value: &Value,
    item: impl Fn(&Value) -> Result<T, CodecError>,
) -> Result<Vec<T>, CodecError> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter(|entry| matches!(entry, Value::Array(_)))
            .map(item)
            .collect(),
        other => Err(unexpected("a coordinates array", other)),
    }
}

fn positions(value: &Value) -> Result<Vec<Position>, CodecError> {
    nested(value, position)
}

fn position_rows(value: &Value) -> Result<Vec<Vec<Position>>, CodecError> {
    nested(value, positions)
}

fn position_blocks(value: &Value) -> Result<Vec<Vec<Vec<Position>>>, CodecError> {
    nested(value, position_rows)
}

fn geometry_type(map: &Map<String, Value>) -> Result<Option<GeoJsonGeometryType>, CodecError> {
    match map.get("type") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(name)) => Ok(Some(name.parse()?)),
        Some(other) => Err(CodecError::format(format!(
            "GeoJSON 'type' must be a string, got {}",
            kind(other)
        ))),
    }
}

fn collection(map: &Map<String, Value>) -> Result<GeoJsonGeometryCollection, CodecError> {
    let geometries = match map.get("geometries") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| GeoJsonGeometry::decode_json(item).transpose())
            .collect::<Result<_, _>>()?,
        Some(other) => return Err(unexpected("a 'geometries' array", other)),
    };

    Ok(GeoJsonGeometryCollection { geometries })
}

fn geometry_from_object(map: &Map<String, Value>) -> Result<Option<GeoJsonGeometry>, CodecError> {
    let Some(geometry_type) = geometry_type(map)? else {
        return Ok(None);
    };

    log::trace!("Reading GeoJSON {geometry_type}");
    Ok(Some(match (geometry_type, map.get("coordinates")) {
        (GeoJsonGeometryType::GeometryCollection, _) => collection(map)?.into(),
        (_, None) => {
            log::debug!("GeoJSON {geometry_type} without coordinates");
            return Ok(None);
        }
        (GeoJsonGeometryType::Point, Some(c)) => GeoJsonPoint::new(position(c)?)?.into(),
        (GeoJsonGeometryType::LineString, Some(c)) => GeoJsonLineString {
            coordinates: positions(c)?,
        }
        .into(),
        (GeoJsonGeometryType::MultiPoint, Some(c)) => GeoJsonMultiPoint {
            coordinates: positions(c)?,
        }
        .into(),
        (GeoJsonGeometryType::Polygon, Some(c)) => GeoJsonPolygon {
            coordinates: position_rows(c)?,
        }
        .into(),
        (GeoJsonGeometryType::MultiLineString, Some(c)) => GeoJsonMultiLineString {
            coordinates: position_rows(c)?,
        }
        .into(),
        (GeoJsonGeometryType::MultiPolygon, Some(c)) => GeoJsonMultiPolygon {
            coordinates: position_blocks(c)?,
        }
        .into(),
    }))
}

impl JsonDecode for GeoJsonGeometry {
    fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
        match value {
            Value::Null => Ok(None),
            Value::Object(map) => geometry_from_object(map),
            other => Err(unexpected("a GeoJSON geometry object", other)),
        }
    }
}

fn tagged(geometry_type: GeoJsonGeometryType, member: &str, content: Value) -> Value {
    let mut map = Map::new();
    map.insert("type".into(), Value::from(geometry_type.as_str()));
    map.insert(member.into(), content);
    Value::Object(map)
}

fn encode_positions(positions: &[Position]) -> Value {
    Value::Array(positions.iter().map(|p| numbers(p.iter().copied())).collect())
}

fn encode_rows(rows: &[Vec<Position>]) -> Value {
    Value::Array(rows.iter().map(|row| encode_positions(row)).collect())
}

/// GeoJSON has a single form, so the encoding is only passed on to collection members.
impl JsonEncode for GeoJsonGeometry {
    fn encode_json(&self, encoding: Encoding) -> Value {
        let geometry_type = self.geometry_type();
        match self {
            GeoJsonGeometry::Point(p) => tagged(
                geometry_type,
                "coordinates",
                numbers(p.coordinates().iter().copied()),
            ),
            GeoJsonGeometry::LineString(GeoJsonLineString { coordinates })
            | GeoJsonGeometry::MultiPoint(GeoJsonMultiPoint { coordinates }) => {
                tagged(geometry_type, "coordinates", encode_positions(coordinates))
            }
            GeoJsonGeometry::Polygon(GeoJsonPolygon { coordinates })
            | GeoJsonGeometry::MultiLineString(GeoJsonMultiLineString { coordinates }) => {
                tagged(geometry_type, "coordinates", encode_rows(coordinates))
            }
            GeoJsonGeometry::MultiPolygon(mp) => tagged(
                geometry_type,
                "coordinates",
                Value::Array(mp.coordinates.iter().map(|rows| encode_rows(rows)).collect()),
            ),
            GeoJsonGeometry::GeometryCollection(c) => tagged(
                geometry_type,
                "geometries",
                Value::Array(
                    c.geometries
                        .iter()
                        .map(|g| g.encode_json(encoding))
                        .collect(),
                ),
            ),
        }
    }
}

macro_rules! impl_geojson_codec {
    ($($variant:ident($ty:ty)),*) => {
        $(
            impl JsonDecode for $ty {
                fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
                    match GeoJsonGeometry::decode_json(value)? {
                        Some(GeoJsonGeometry::$variant(g)) => Ok(Some(g)),
                        Some(other) => Err(CodecError::format(format!(
                            "expected GeoJSON {}, got {}",
                            stringify!($variant),
                            other.geometry_type()
                        ))),
                        None => Ok(None),
                    }
                }
            }

            impl JsonEncode for $ty {
                fn encode_json(&self, encoding: Encoding) -> Value {
                    GeoJsonGeometry::from(self.clone()).encode_json(encoding)
                }
            }
        )*
    };
}

impl_geojson_codec!(
    Point(GeoJsonPoint),
    LineString(GeoJsonLineString),
    Polygon(GeoJsonPolygon),
    MultiPoint(GeoJsonMultiPoint),
    MultiLineString(GeoJsonMultiLineString),
    MultiPolygon(GeoJsonMultiPolygon),
    GeometryCollection(GeoJsonGeometryCollection)
);
