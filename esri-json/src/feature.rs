//! Feature records: GeoJSON features and collections, and the server's own
//! `{"attributes": {...}, "geometry": {...}}` records.

use crate::decode::{kind, to_number, unexpected, JsonDecode};
use crate::encode::{numbers, Encoding, JsonEncode};
use crate::error::CodecError;
use esri_geometry::geojson::GeoJsonGeometry;
use esri_geometry::{Geometry, SpatialReference};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Coordinate reference system member of a GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    /// `name` or `link`.
    #[serde(rename = "type")]
    pub crs_type: String,
    /// Details of the reference.
    #[serde(default)]
    pub properties: CrsProperties,
}

/// Properties of a [`Crs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrsProperties {
    /// Named reference, e.g. `EPSG:4326` or `urn:ogc:def:crs:OGC:1.3:CRS84`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Linked reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Format of the linked reference.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    /// Numeric code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

impl Crs {
    /// A `name` CRS.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            crs_type: "name".into(),
            properties: CrsProperties {
                name: Some(name.into()),
                ..Default::default()
            },
        }
    }

    /// The spatial reference the CRS points to, if it names one by number.
    pub fn spatial_reference(&self) -> Option<SpatialReference> {
        if let Some(code) = self.properties.code {
            return Some(SpatialReference::from_wkid(code));
        }

        let name = self.properties.name.as_deref()?;
        if name.ends_with("CRS84") {
            return Some(SpatialReference::WGS84);
        }

        name.rsplit(':')
            .next()
            .and_then(|code| code.trim().parse().ok())
            .map(SpatialReference::from_wkid)
    }
}

impl JsonDecode for Crs {
    fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
        match value {
            Value::Null => Ok(None),
            Value::Object(_) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| CodecError::format(format!("invalid crs: {e}"))),
            other => Err(unexpected("a crs object", other)),
        }
    }
}

impl JsonEncode for Crs {
    fn encode_json(&self, _encoding: Encoding) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn check_type(map: &Map<String, Value>, expected: &str) -> Result<bool, CodecError> {
    match map.get("type") {
        None | Some(Value::Null) => Ok(false),
        Some(Value::String(name)) if name == expected => Ok(true),
        Some(other) => Err(CodecError::format(format!(
            "expected GeoJSON {expected}, got {other}"
        ))),
    }
}

fn attribute_map(value: Option<&Value>, name: &str) -> Result<Map<String, Value>, CodecError> {
    match value {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => Err(CodecError::format(format!(
            "'{name}' must be an object, got {}",
            kind(other)
        ))),
    }
}

fn bbox(map: &Map<String, Value>) -> Result<Option<Vec<f64>>, CodecError> {
    match map.get("bbox") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| to_number(item, "bbox"))
            .collect::<Result<_, _>>()
            .map(Some),
        Some(other) => Err(unexpected("a bbox array", other)),
    }
}

/// A GeoJSON feature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoJsonFeature {
    /// Identifier, a string or a number.
    pub id: Option<Value>,
    /// Attribute values.
    pub properties: Map<String, Value>,
    /// Bounding box.
    pub bbox: Option<Vec<f64>>,
    /// Shape of the feature.
    pub geometry: Option<GeoJsonGeometry>,
}

impl GeoJsonFeature {
    /// Attribute values.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Shape of the feature in the ArcGIS model.
    pub fn to_spatial(&self) -> Result<Option<Geometry>, CodecError> {
        Ok(self.geometry.as_ref().map(|g| g.to_spatial()).transpose()?)
    }
}

impl JsonDecode for GeoJsonFeature {
    fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
        let map = match value {
            Value::Null => return Ok(None),
            Value::Object(map) => map,
            other => return Err(unexpected("a GeoJSON feature", other)),
        };
        if !check_type(map, "Feature")? {
            return Ok(None);
        }

        Ok(Some(Self {
            id: map.get("id").filter(|id| !id.is_null()).cloned(),
            properties: attribute_map(map.get("properties"), "properties")?,
            bbox: bbox(map)?,
            geometry: match map.get("geometry") {
                Some(geometry) => GeoJsonGeometry::decode_json(geometry)?,
                None => None,
            },
        }))
    }
}

impl JsonEncode for GeoJsonFeature {
    fn encode_json(&self, encoding: Encoding) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::from("Feature"));
        if let Some(id) = &self.id {
            map.insert("id".into(), id.clone());
        }
        if let Some(bbox) = &self.bbox {
            map.insert("bbox".into(), numbers(bbox.iter().copied()));
        }
        map.insert(
            "geometry".into(),
            self.geometry
                .as_ref()
                .map_or(Value::Null, |g| g.encode_json(encoding)),
        );
        map.insert("properties".into(), Value::Object(self.properties.clone()));

        Value::Object(map)
    }
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoJsonFeatureCollection {
    /// Member features.
    pub features: Vec<GeoJsonFeature>,
    /// Bounding box of all features.
    pub bbox: Option<Vec<f64>>,
    /// Reference system of the coordinates.
    pub crs: Option<Crs>,
}

impl GeoJsonFeatureCollection {
    /// Spatial reference named by the `crs` member.
    pub fn spatial_reference(&self) -> Option<SpatialReference> {
        self.crs.as_ref().and_then(Crs::spatial_reference)
    }
}

impl JsonDecode for GeoJsonFeatureCollection {
    fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
        let map = match value {
            Value::Null => return Ok(None),
            Value::Object(map) => map,
            other => return Err(unexpected("a GeoJSON feature collection", other)),
        };
        if !check_type(map, "FeatureCollection")? {
            return Ok(None);
        }

        let features = match map.get("features") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| GeoJsonFeature::decode_json(item).transpose())
                .collect::<Result<_, _>>()?,
            Some(other) => return Err(unexpected("a 'features' array", other)),
        };

        Ok(Some(Self {
            features,
            bbox: bbox(map)?,
            crs: match map.get("crs") {
                Some(crs) => Crs::decode_json(crs)?,
                None => None,
            },
        }))
    }
}

impl JsonEncode for GeoJsonFeatureCollection {
    fn encode_json(&self, encoding: Encoding) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::from("FeatureCollection"));
        if let Some(bbox) = &self.bbox {
            map.insert("bbox".into(), numbers(bbox.iter().copied()));
        }
        if let Some(crs) = &self.crs {
            map.insert("crs".into(), crs.encode_json(encoding));
        }
        map.insert(
            "features".into(),
            Value::Array(
                self.features
                    .iter()
                    .map(|f| f.encode_json(encoding))
                    .collect(),
            ),
        );

        Value::Object(map)
    }
}

/// A feature as returned by map and feature services.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    /// Attribute values by field name.
    pub attributes: Map<String, Value>,
    /// Shape of the feature.
    pub geometry: Option<Geometry>,
}

impl Feature {
    /// Attribute values by field name.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Value of one attribute.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

impl JsonDecode for Feature {
    fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
        let map = match value {
            Value::Null => return Ok(None),
            Value::Object(map) => map,
            other => return Err(unexpected("a feature object", other)),
        };
        if !map.contains_key("attributes") && !map.contains_key("geometry") {
            return Ok(None);
        }

        Ok(Some(Self {
            attributes: attribute_map(map.get("attributes"), "attributes")?,
            geometry: match map.get("geometry") {
                Some(geometry) => Geometry::decode_json(geometry)?,
                None => None,
            },
        }))
    }
}

impl JsonEncode for Feature {
    fn encode_json(&self, encoding: Encoding) -> Value {
        let mut map = Map::new();
        map.insert("attributes".into(), Value::Object(self.attributes.clone()));
        if let Some(geometry) = &self.geometry {
            map.insert("geometry".into(), geometry.encode_json(encoding));
        }

        Value::Object(map)
    }
}
