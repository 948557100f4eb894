use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const TYPE_PREFIX: &str = "esriGeometry";

/// Geometry type tags used by ArcGIS services.
///
/// Serialized as the prefixed type string, e.g. `"esriGeometryPolygon"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
#[allow(missing_docs)]
pub enum GeometryType {
    #[serde(rename = "esriGeometryNull")]
    Null = 0,
    #[serde(rename = "esriGeometryPoint")]
    Point = 1,
    #[serde(rename = "esriGeometryMultipoint")]
    Multipoint = 2,
    #[serde(rename = "esriGeometryPolyline")]
    Polyline = 3,
    #[serde(rename = "esriGeometryPolygon")]
    Polygon = 4,
    #[serde(rename = "esriGeometryEnvelope")]
    Envelope = 5,
    #[serde(rename = "esriGeometryPath")]
    Path = 6,
    #[serde(rename = "esriGeometryAny")]
    Any = 7,
    #[serde(rename = "esriGeometryMultiPatch")]
    MultiPatch = 9,
    #[serde(rename = "esriGeometryRing")]
    Ring = 11,
    #[serde(rename = "esriGeometryLine")]
    Line = 13,
    #[serde(rename = "esriGeometryCircularArc")]
    CircularArc = 14,
    #[serde(rename = "esriGeometryBezier3Curve")]
    Bezier3Curve = 15,
    #[serde(rename = "esriGeometryEllipticArc")]
    EllipticArc = 16,
    #[serde(rename = "esriGeometryBag")]
    Bag = 17,
    #[serde(rename = "esriGeometryTriangleStrip")]
    TriangleStrip = 18,
    #[serde(rename = "esriGeometryTriangleFan")]
    TriangleFan = 19,
    #[serde(rename = "esriGeometryRay")]
    Ray = 20,
    #[serde(rename = "esriGeometrySphere")]
    Sphere = 21,
    #[serde(rename = "esriGeometryTriangles")]
    Triangles = 22,
}

impl GeometryType {
    /// All tags in code order.
    pub const ALL: [GeometryType; 20] = [
        GeometryType::Null,
        GeometryType::Point,
        GeometryType::Multipoint,
        GeometryType::Polyline,
        GeometryType::Polygon,
        GeometryType::Envelope,
        GeometryType::Path,
        GeometryType::Any,
        GeometryType::MultiPatch,
        GeometryType::Ring,
        GeometryType::Line,
        GeometryType::CircularArc,
        GeometryType::Bezier3Curve,
        GeometryType::EllipticArc,
        GeometryType::Bag,
        GeometryType::TriangleStrip,
        GeometryType::TriangleFan,
        GeometryType::Ray,
        GeometryType::Sphere,
        GeometryType::Triangles,
    ];

    /// Numeric code of the tag.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Name without the prefix, e.g. `Multipoint`.
    pub fn name(self) -> &'static str {
        match self {
            GeometryType::Null => "Null",
            GeometryType::Point => "Point",
            GeometryType::Multipoint => "Multipoint",
            GeometryType::Polyline => "Polyline",
            GeometryType::Polygon => "Polygon",
            GeometryType::Envelope => "Envelope",
            GeometryType::Path => "Path",
            GeometryType::Any => "Any",
            GeometryType::MultiPatch => "MultiPatch",
            GeometryType::Ring => "Ring",
            GeometryType::Line => "Line",
            GeometryType::CircularArc => "CircularArc",
            GeometryType::Bezier3Curve => "Bezier3Curve",
            GeometryType::EllipticArc => "EllipticArc",
            GeometryType::Bag => "Bag",
            GeometryType::TriangleStrip => "TriangleStrip",
            GeometryType::TriangleFan => "TriangleFan",
            GeometryType::Ray => "Ray",
            GeometryType::Sphere => "Sphere",
            GeometryType::Triangles => "Triangles",
        }
    }

    /// Prefixed type string, e.g. `esriGeometryMultipoint`.
    pub fn type_string(self) -> String {
        format!("{TYPE_PREFIX}{}", self.name())
    }

    /// Looks a tag up by its numeric code.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{TYPE_PREFIX}{}", self.name())
    }
}

/// Accepts names with or without the `esriGeometry` prefix, in any letter case.
impl FromStr for GeometryType {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let name = match s.get(..TYPE_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(TYPE_PREFIX) => &s[TYPE_PREFIX.len()..],
            _ => s,
        };

        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| GeometryError::Format(format!("unknown geometry type '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_strings() {
        assert_eq!(GeometryType::Polygon.type_string(), "esriGeometryPolygon");
        assert_eq!(GeometryType::Envelope.to_string(), "esriGeometryEnvelope");
        assert_eq!(GeometryType::Triangles.code(), 22);
        assert_eq!(GeometryType::from_code(9), Some(GeometryType::MultiPatch));
        assert_eq!(GeometryType::from_code(8), None);
    }

    #[test]
    fn parse_with_and_without_prefix() {
        assert_eq!("esriGeometryPoint".parse(), Ok(GeometryType::Point));
        assert_eq!("ESRIGEOMETRYMULTIPOINT".parse(), Ok(GeometryType::Multipoint));
        assert_eq!("polyline".parse(), Ok(GeometryType::Polyline));
        assert!("esriGeometry".parse::<GeometryType>().is_err());
        assert!("Circle".parse::<GeometryType>().is_err());
    }

    #[test]
    fn every_tag_round_trips_through_its_string() {
        for tag in GeometryType::ALL {
            assert_eq!(tag.type_string().parse(), Ok(tag));
        }
    }
}
