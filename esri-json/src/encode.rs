//! Writing geometries as verbose (object) or compact (array) JSON.

use esri_geometry::{
    Extent, Geometry, MultiPoint, Point, Polygon, Polyline, Size, SpatialReference,
};
use serde_json::{Map, Value};

/// Output form of [`JsonEncode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Named members: `{"x":1,"y":2}`.
    #[default]
    Verbose,
    /// Positional arrays where the value allows it: `[1,2]`. Spatial references shrink to a bare
    /// WKID when possible.
    Compact,
}

/// Types that can be written as JSON.
pub trait JsonEncode {
    /// Builds the JSON value.
    fn encode_json(&self, encoding: Encoding) -> Value;

    /// JSON text without whitespace.
    fn to_json_string(&self, encoding: Encoding) -> String {
        self.encode_json(encoding).to_string()
    }

    /// Compact JSON text. An array of plain values is written without its brackets, so a point
    /// becomes `1,2` and can be used as a request parameter.
    fn to_compact_string(&self) -> String {
        match self.encode_json(Encoding::Compact) {
            Value::Array(items) if items.iter().all(is_scalar) => items
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(","),
            other => other.to_string(),
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Number value. Integral values are written without a fraction and NaN as `null`.
pub(crate) fn number(value: f64) -> Value {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

pub(crate) fn numbers(values: impl IntoIterator<Item = f64>) -> Value {
    Value::Array(values.into_iter().map(number).collect())
}

fn insert_spatial_reference(
    map: &mut Map<String, Value>,
    spatial_reference: Option<&SpatialReference>,
    encoding: Encoding,
) {
    if let Some(sr) = spatial_reference {
        map.insert("spatialReference".into(), sr.encode_json(encoding));
    }
}

impl JsonEncode for SpatialReference {
    fn encode_json(&self, encoding: Encoding) -> Value {
        if let Some(wkt) = self.wkt().filter(|_| self.is_wkt()) {
            let mut map = Map::new();
            map.insert("wkt".into(), Value::from(wkt));
            return Value::Object(map);
        }

        if encoding == Encoding::Compact && self.vcs_wkid().is_none() {
            if let Some(wkid) = self.preferred_wkid() {
                return Value::from(wkid);
            }
        }

        let mut map = Map::new();
        let ids = [
            ("wkid", self.wkid()),
            ("latestWkid", self.latest_wkid()),
            ("vcsWkid", self.vcs_wkid()),
            ("latestVcsWkid", self.latest_vcs_wkid()),
        ];
        for (name, id) in ids {
            if let Some(id) = id {
                map.insert(name.into(), Value::from(id));
            }
        }

        Value::Object(map)
    }
}

fn verbose_point(point: &Point, encoding: Encoding) -> Value {
    let mut map = Map::new();
    map.insert("x".into(), number(point.x()));
    map.insert("y".into(), number(point.y()));
    if let Some(z) = point.z() {
        map.insert("z".into(), number(z));
    }
    if let Some(m) = point.m() {
        map.insert("m".into(), number(m));
    }
    insert_spatial_reference(&mut map, point.spatial_reference(), encoding);

    Value::Object(map)
}

impl JsonEncode for Point {
    fn encode_json(&self, encoding: Encoding) -> Value {
        match encoding {
            Encoding::Compact if self.spatial_reference().is_none() => {
                numbers(self.to_coordinates())
            }
            _ => verbose_point(self, encoding),
        }
    }
}

fn verbose_extent(extent: &Extent, encoding: Encoding) -> Value {
    let mut map = Map::new();
    map.insert("xmin".into(), number(extent.x_min()));
    map.insert("ymin".into(), number(extent.y_min()));
    map.insert("xmax".into(), number(extent.x_max()));
    map.insert("ymax".into(), number(extent.y_max()));
    if let Some(z) = extent.z() {
        map.insert("zmin".into(), number(z.min));
        map.insert("zmax".into(), number(z.max));
    }
    if let Some(m) = extent.m() {
        map.insert("mmin".into(), number(m.min));
        map.insert("mmax".into(), number(m.max));
    }
    insert_spatial_reference(&mut map, extent.spatial_reference(), encoding);

    Value::Object(map)
}

/// Flat array, or a pair of corners with a `null` elevation when only the measure range is set.
fn compact_extent(extent: &Extent) -> Value {
    match (extent.z(), extent.m()) {
        (None, Some(m)) => Value::Array(vec![
            Value::Array(vec![
                number(extent.x_min()),
                number(extent.y_min()),
                Value::Null,
                number(m.min),
            ]),
            Value::Array(vec![
                number(extent.x_max()),
                number(extent.y_max()),
                Value::Null,
                number(m.max),
            ]),
        ]),
        _ => numbers(extent.to_coordinates()),
    }
}

impl JsonEncode for Extent {
    fn encode_json(&self, encoding: Encoding) -> Value {
        match encoding {
            Encoding::Compact if self.spatial_reference().is_none() => compact_extent(self),
            _ => verbose_extent(self, encoding),
        }
    }
}

fn vertices<'a>(points: impl IntoIterator<Item = &'a Point>) -> Value {
    Value::Array(
        points
            .into_iter()
            .map(|p| numbers(p.to_coordinates()))
            .collect(),
    )
}

fn container(
    has_z: bool,
    has_m: bool,
    member: &str,
    items: Value,
    spatial_reference: Option<&SpatialReference>,
    encoding: Encoding,
) -> Value {
    let mut map = Map::new();
    if has_z {
        map.insert("hasZ".into(), Value::Bool(true));
    }
    if has_m {
        map.insert("hasM".into(), Value::Bool(true));
    }
    map.insert(member.into(), items);
    insert_spatial_reference(&mut map, spatial_reference, encoding);

    Value::Object(map)
}

impl JsonEncode for MultiPoint {
    fn encode_json(&self, encoding: Encoding) -> Value {
        container(
            self.has_z(),
            self.has_m(),
            "points",
            vertices(self.points()),
            self.spatial_reference(),
            encoding,
        )
    }
}

impl JsonEncode for Polyline {
    fn encode_json(&self, encoding: Encoding) -> Value {
        let paths = self.paths().iter().map(|p| vertices(p.points())).collect();
        container(
            self.has_z(),
            self.has_m(),
            "paths",
            Value::Array(paths),
            self.spatial_reference(),
            encoding,
        )
    }
}

impl JsonEncode for Polygon {
    fn encode_json(&self, encoding: Encoding) -> Value {
        let rings = self.rings().iter().map(|r| vertices(r.points())).collect();
        container(
            self.has_z(),
            self.has_m(),
            "rings",
            Value::Array(rings),
            self.spatial_reference(),
            encoding,
        )
    }
}

impl JsonEncode for Geometry {
    fn encode_json(&self, encoding: Encoding) -> Value {
        match self {
            Geometry::Point(g) => g.encode_json(encoding),
            Geometry::MultiPoint(g) => g.encode_json(encoding),
            Geometry::Polyline(g) => g.encode_json(encoding),
            Geometry::Polygon(g) => g.encode_json(encoding),
            Geometry::Extent(g) => g.encode_json(encoding),
        }
    }
}

impl JsonEncode for Size {
    fn encode_json(&self, encoding: Encoding) -> Value {
        match encoding {
            Encoding::Verbose => {
                let mut map = Map::new();
                map.insert("w".into(), Value::from(self.width()));
                map.insert("h".into(), Value::from(self.height()));
                Value::Object(map)
            }
            Encoding::Compact => Value::from(self.to_dimensions().to_vec()),
        }
    }
}
