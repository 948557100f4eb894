//! Reading geometries from their verbose (object) and compact (array) JSON forms.
//!
//! Decoding never fails just because a value does not look like the requested geometry: such
//! values decode to `None`. Errors are reserved for recognized shapes with bad contents, such as
//! a non-numeric `x` or a compact array with the wrong number of elements.

use crate::error::CodecError;
use crate::reader::read_json;
use esri_geometry::{
    Extent, Geometry, GeometryError, GeometryType, MultiPoint, Path, Point, Polygon, Polyline,
    Ring, Size, SpatialReference,
};
use serde_json::{Map, Value};

/// Types that can be read from a JSON value.
pub trait JsonDecode: Sized {
    /// Decodes a value. `Ok(None)` means the value is `null` or does not describe `Self`.
    fn decode_json(value: &Value) -> Result<Option<Self>, CodecError>;

    /// Reads JSON text (relaxed syntax allowed) and decodes it.
    fn from_json_str(text: &str) -> Result<Option<Self>, CodecError> {
        Self::decode_json(&read_json(text)?)
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn unexpected(expected: &str, value: &Value) -> CodecError {
    CodecError::format(format!("expected {expected}, got {}", kind(value)))
}

/// Numeric value. Numbers in strings are accepted, `null` reads as NaN.
pub(crate) fn to_number(value: &Value, name: &str) -> Result<f64, CodecError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| CodecError::format(format!("'{name}' is out of range"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| CodecError::format(format!("'{name}' is not a number: '{s}'"))),
        Value::Null => Ok(f64::NAN),
        other => Err(CodecError::format(format!(
            "'{name}' must be a number, got {}",
            kind(other)
        ))),
    }
}

fn optional_number(map: &Map<String, Value>, name: &str) -> Result<Option<f64>, CodecError> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => to_number(value, name).map(Some),
    }
}

fn optional_int(map: &Map<String, Value>, name: &str) -> Result<Option<i32>, CodecError> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => to_int(value, name).map(Some),
    }
}

fn to_int(value: &Value, name: &str) -> Result<i32, CodecError> {
    value
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| CodecError::format(format!("'{name}' must be an integer")))
}

fn optional_flag(map: &Map<String, Value>, name: &str) -> Result<Option<bool>, CodecError> {
    match map.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(flag)) => Ok(Some(*flag)),
        Some(other) => Err(CodecError::format(format!(
            "'{name}' must be a boolean, got {}",
            kind(other)
        ))),
    }
}

/// Every element of a compact array as a number.
pub(crate) fn compact_numbers(items: &[Value]) -> Result<Vec<f64>, CodecError> {
    items.iter().map(compact_number).collect()
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn member_spatial_reference(
    map: &Map<String, Value>,
) -> Result<Option<SpatialReference>, CodecError> {
    match map.get("spatialReference") {
        Some(value) => SpatialReference::decode_json(value),
        None => Ok(None),
    }
}

impl JsonDecode for SpatialReference {
    fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
        match value {
            Value::Null => Ok(None),
            Value::Number(_) => Ok(Some(SpatialReference::from_wkid(to_int(
                value,
                "spatialReference",
            )?))),
            Value::String(wkt) if wkt.trim().is_empty() => Ok(None),
            Value::String(wkt) => Ok(Some(SpatialReference::from(wkt.as_str()))),
            Value::Object(map) => spatial_reference_from_object(map),
            other => Err(unexpected("a spatial reference", other)),
        }
    }
}

fn spatial_reference_from_object(
    map: &Map<String, Value>,
) -> Result<Option<SpatialReference>, CodecError> {
    if let Some(Value::String(wkt)) = map.get("wkt") {
        if !wkt.trim().is_empty() {
            return Ok(Some(SpatialReference::from_wkt(wkt.as_str())));
        }
    }

    let wkid = optional_int(map, "wkid")?;
    let latest_wkid = optional_int(map, "latestWkid")?;
    let vcs_wkid = optional_int(map, "vcsWkid")?;
    let latest_vcs_wkid = optional_int(map, "latestVcsWkid")?;
    if [wkid, latest_wkid, vcs_wkid, latest_vcs_wkid]
        .iter()
        .all(Option::is_none)
    {
        return Ok(None);
    }

    Ok(Some(
        SpatialReference::default()
            .with_wkid(wkid)
            .with_latest_wkid(latest_wkid)
            .with_vcs_wkid(vcs_wkid)
            .with_latest_vcs_wkid(latest_vcs_wkid),
    ))
}

fn compact_number(item: &Value) -> Result<f64, CodecError> {
    match item {
        Value::Number(_) | Value::String(_) => to_number(item, "array element"),
        other => Err(unexpected("a number in compact array", other)),
    }
}

fn optional_compact_number(item: Option<&Value>) -> Result<Option<f64>, CodecError> {
    match item {
        None | Some(Value::Null) => Ok(None),
        Some(item) => compact_number(item).map(Some),
    }
}

/// Reads `[x, y, z?, m?]`. A `null` leaves the ordinate unset.
///
/// With `measure_only` the container declares M without Z: the last value after x and y is the
/// measure and nothing is read as elevation. A measure without elevation cannot be stored and is
/// dropped.
fn vertex(items: &[Value], measure_only: bool) -> Result<Point, CodecError> {
    let [x, y, rest @ ..] = items else {
        return Err(CodecError::format(format!(
            "compact point must have 2 to 4 values, got {}",
            items.len()
        )));
    };
    if rest.len() > 2 {
        return Err(CodecError::format(format!(
            "compact point must have 2 to 4 values, got {}",
            items.len()
        )));
    }

    let (x, y) = (compact_number(x)?, compact_number(y)?);
    let (z, m) = if measure_only {
        (None, optional_compact_number(rest.get(1).or(rest.first()))?)
    } else {
        (
            optional_compact_number(rest.first())?,
            optional_compact_number(rest.get(1))?,
        )
    };

    Ok(match (z, m) {
        (Some(z), Some(m)) => Point::new_zm(x, y, z, m),
        (Some(z), None) => Point::new_z(x, y, z),
        (None, m) => {
            if m.is_some() {
                log::debug!("Measure without elevation dropped from vertex ({x}, {y})");
            }
            Point::new(x, y)
        }
    })
}

fn point_from_compact(items: &[Value]) -> Result<Point, CodecError> {
    vertex(items, false)
}

fn point_from_object(map: &Map<String, Value>) -> Result<Option<Point>, CodecError> {
    let (Some(x), Some(y)) = (map.get("x"), map.get("y")) else {
        return Ok(None);
    };

    let x = to_number(x, "x")?;
    let y = to_number(y, "y")?;
    let point = match (optional_number(map, "z")?, optional_number(map, "m")?) {
        (Some(z), Some(m)) => Point::new_zm(x, y, z, m),
        (Some(z), None) => Point::new_z(x, y, z),
        _ => Point::new(x, y),
    };

    Ok(Some(point))
}

impl JsonDecode for Point {
    fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
        match value {
            Value::Null => Ok(None),
            Value::Array(items) => point_from_compact(items).map(Some),
            Value::Object(map) => {
                let spatial_reference = member_spatial_reference(map)?;
                Ok(point_from_object(map)?.map(|p| p.with_spatial_reference(spatial_reference)))
            }
            other => Err(unexpected("a point", other)),
        }
    }
}

struct Corner {
    x: f64,
    y: f64,
    z: Option<f64>,
    m: Option<f64>,
}

fn corner(value: &Value) -> Result<Corner, CodecError> {
    let Value::Array(items) = value else {
        return Err(unexpected("an extent corner array", value));
    };

    let optional = |index: usize, name: &str| match items.get(index) {
        Some(item) if is_scalar(item) && !item.is_null() => to_number(item, name).map(Some),
        _ => Ok(None),
    };

    match (items.first(), items.get(1)) {
        (Some(x), Some(y)) if is_scalar(x) && is_scalar(y) => Ok(Corner {
            x: to_number(x, "x")?,
            y: to_number(y, "y")?,
            z: optional(2, "z")?,
            m: optional(3, "m")?,
        }),
        _ => Err(CodecError::format("extent corner must start with x and y")),
    }
}

fn extent_from_compact(items: &[Value]) -> Result<Extent, CodecError> {
    if items.iter().all(|item| matches!(item, Value::Array(_))) {
        let [min, max] = items else {
            return Err(CodecError::format(format!(
                "compact extent must have 2 corners, got {}",
                items.len()
            )));
        };

        let (min, max) = (corner(min)?, corner(max)?);
        let mut extent = Extent::new(min.x, min.y, max.x, max.y);
        if let (Some(z_min), Some(z_max)) = (min.z, max.z) {
            extent = extent.with_z(z_min, z_max);
        }
        if let (Some(m_min), Some(m_max)) = (min.m, max.m) {
            extent = extent.with_m(m_min, m_max);
        }

        return Ok(extent);
    }

    Ok(Extent::from_coordinates(&compact_numbers(items)?)?)
}

fn extent_from_object(map: &Map<String, Value>) -> Result<Option<Extent>, CodecError> {
    let (Some(x_min), Some(y_min), Some(x_max), Some(y_max)) = (
        map.get("xmin"),
        map.get("ymin"),
        map.get("xmax"),
        map.get("ymax"),
    ) else {
        return Ok(None);
    };

    let mut extent = Extent::new(
        to_number(x_min, "xmin")?,
        to_number(y_min, "ymin")?,
        to_number(x_max, "xmax")?,
        to_number(y_max, "ymax")?,
    );
    if let (Some(z_min), Some(z_max)) = (optional_number(map, "zmin")?, optional_number(map, "zmax")?)
    {
        extent = extent.with_z(z_min, z_max);
    }
    if let (Some(m_min), Some(m_max)) = (optional_number(map, "mmin")?, optional_number(map, "mmax")?)
    {
        extent = extent.with_m(m_min, m_max);
    }

    Ok(Some(extent))
}

impl JsonDecode for Extent {
    fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
        match value {
            Value::Null => Ok(None),
            Value::Array(items) => extent_from_compact(items).map(Some),
            Value::Object(map) => {
                let spatial_reference = member_spatial_reference(map)?;
                Ok(extent_from_object(map)?.map(|e| e.with_spatial_reference(spatial_reference)))
            }
            other => Err(unexpected("an extent", other)),
        }
    }
}

fn vertices(value: &Value, name: &str, measure_only: bool) -> Result<Vec<Point>, CodecError> {
    let Value::Array(items) = value else {
        return Err(CodecError::format(format!(
            "'{name}' must be an array of coordinate arrays, got {}",
            kind(value)
        )));
    };

    items
        .iter()
        .map(|item| match item {
            Value::Array(coordinates) => vertex(coordinates, measure_only),
            other => Err(unexpected("a coordinate array", other)),
        })
        .collect()
}

fn parts(value: &Value, name: &str, measure_only: bool) -> Result<Vec<Vec<Point>>, CodecError> {
    let Value::Array(items) = value else {
        return Err(CodecError::format(format!(
            "'{name}' must be an array of parts, got {}",
            kind(value)
        )));
    };

    items
        .iter()
        .map(|part| vertices(part, name, measure_only))
        .collect()
}

type Flags = Option<(bool, bool)>;

fn flags(map: &Map<String, Value>) -> Result<Flags, CodecError> {
    Ok(
        match (optional_flag(map, "hasZ")?, optional_flag(map, "hasM")?) {
            (None, None) => None,
            (has_z, has_m) => Some((has_z.unwrap_or(false), has_m.unwrap_or(false))),
        },
    )
}

fn is_measure_only(flags: Flags) -> bool {
    flags == Some((false, true))
}

fn multi_point_from_object(map: &Map<String, Value>) -> Result<Option<MultiPoint>, CodecError> {
    let Some(points) = map.get("points") else {
        return Ok(None);
    };

    let flags = flags(map)?;
    let points = vertices(points, "points", is_measure_only(flags))?;
    Ok(Some(match flags {
        Some((has_z, has_m)) => MultiPoint::new(points, has_z, has_m),
        None => MultiPoint::from_points(points),
    }))
}

fn polyline_from_object(map: &Map<String, Value>) -> Result<Option<Polyline>, CodecError> {
    let Some(paths) = map.get("paths") else {
        return Ok(None);
    };

    let flags = flags(map)?;
    let paths = parts(paths, "paths", is_measure_only(flags))?
        .into_iter()
        .map(Path::new)
        .collect();
    Ok(Some(match flags {
        Some((has_z, has_m)) => Polyline::new(paths, has_z, has_m),
        None => Polyline::from_paths(paths),
    }))
}

fn polygon_from_object(map: &Map<String, Value>) -> Result<Option<Polygon>, CodecError> {
    let Some(rings) = map.get("rings") else {
        return Ok(None);
    };

    let flags = flags(map)?;
    let rings = parts(rings, "rings", is_measure_only(flags))?
        .into_iter()
        .map(Ring::new)
        .collect();
    Ok(Some(match flags {
        Some((has_z, has_m)) => Polygon::new(rings, has_z, has_m),
        None => Polygon::from_rings(rings),
    }))
}

macro_rules! impl_container_decode {
    ($ty:ty, $from_object:ident, $expected:literal) => {
        impl JsonDecode for $ty {
            fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
                match value {
                    Value::Null => Ok(None),
                    Value::Object(map) => {
                        let spatial_reference = member_spatial_reference(map)?;
                        Ok($from_object(map)?
                            .map(|g| g.with_spatial_reference(spatial_reference)))
                    }
                    other => Err(unexpected($expected, other)),
                }
            }
        }
    };
}

impl_container_decode!(MultiPoint, multi_point_from_object, "a multipoint object");
impl_container_decode!(Polyline, polyline_from_object, "a polyline object");
impl_container_decode!(Polygon, polygon_from_object, "a polygon object");

fn geometry_from_compact(items: &[Value]) -> Result<Geometry, CodecError> {
    if items.first().is_some_and(|first| matches!(first, Value::Array(_))) {
        log::trace!("Compact array of arrays read as extent corners");
        return extent_from_compact(items).map(Geometry::from);
    }

    match items.len() {
        2 | 3 => point_from_compact(items).map(Geometry::from),
        4 | 6 | 8 => extent_from_compact(items).map(Geometry::from),
        n => Err(CodecError::format(format!(
            "compact geometry must have 2, 3, 4, 6 or 8 values, got {n}"
        ))),
    }
}

fn geometry_from_object(map: &Map<String, Value>) -> Result<Option<Geometry>, CodecError> {
    if let Some(point) = point_from_object(map)? {
        return Ok(Some(point.into()));
    }
    if let Some(extent) = extent_from_object(map)? {
        return Ok(Some(extent.into()));
    }
    if let Some(polyline) = polyline_from_object(map)? {
        return Ok(Some(polyline.into()));
    }
    if let Some(polygon) = polygon_from_object(map)? {
        return Ok(Some(polygon.into()));
    }
    if let Some(multi_point) = multi_point_from_object(map)? {
        return Ok(Some(multi_point.into()));
    }

    log::debug!(
        "Object with members {:?} is not a recognized geometry",
        map.keys().collect::<Vec<_>>()
    );
    Ok(None)
}

fn with_spatial_reference(geometry: Geometry, sr: Option<SpatialReference>) -> Geometry {
    match geometry {
        Geometry::Point(g) => g.with_spatial_reference(sr).into(),
        Geometry::MultiPoint(g) => g.with_spatial_reference(sr).into(),
        Geometry::Polyline(g) => g.with_spatial_reference(sr).into(),
        Geometry::Polygon(g) => g.with_spatial_reference(sr).into(),
        Geometry::Extent(g) => g.with_spatial_reference(sr).into(),
    }
}

/// Detects the geometry kind from the value's shape.
///
/// Compact arrays: 2 or 3 numbers are a point, 4, 6 or 8 numbers an extent, two arrays the
/// corners of an extent. Objects are probed for point (`x`, `y`), extent (`xmin`, `ymin`, `xmax`,
/// `ymax`), polyline (`paths`), polygon (`rings`) and multipoint (`points`) members, in this order.
impl JsonDecode for Geometry {
    fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
        match value {
            Value::Null => Ok(None),
            Value::Array(items) => geometry_from_compact(items).map(Some),
            Value::Object(map) => {
                let spatial_reference = member_spatial_reference(map)?;
                Ok(geometry_from_object(map)?.map(|g| with_spatial_reference(g, spatial_reference)))
            }
            other => Err(unexpected("a geometry", other)),
        }
    }
}

/// Decodes a value as the geometry kind named by `geometry_type`, e.g. from a service's
/// `geometryType` member.
pub fn decode_geometry_as(
    value: &Value,
    geometry_type: GeometryType,
) -> Result<Option<Geometry>, CodecError> {
    Ok(match geometry_type {
        GeometryType::Point => Point::decode_json(value)?.map(Geometry::from),
        GeometryType::Multipoint => MultiPoint::decode_json(value)?.map(Geometry::from),
        GeometryType::Polyline => Polyline::decode_json(value)?.map(Geometry::from),
        GeometryType::Polygon => Polygon::decode_json(value)?.map(Geometry::from),
        GeometryType::Envelope => Extent::decode_json(value)?.map(Geometry::from),
        _ => {
            return Err(GeometryError::NotImplemented(
                "decoding of this geometry type",
            )
            .into())
        }
    })
}

impl JsonDecode for Size {
    fn decode_json(value: &Value) -> Result<Option<Self>, CodecError> {
        match value {
            Value::Null => Ok(None),
            Value::Number(_) => Ok(Some(Size::square(to_int(value, "size")?))),
            Value::Array(items) => {
                let dimensions = items
                    .iter()
                    .map(|item| to_int(item, "size"))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(Size::from_dimensions(&dimensions)?))
            }
            Value::Object(map) => match (map.get("w"), map.get("h")) {
                (Some(w), Some(h)) => Ok(Some(Size::new(to_int(w, "w")?, to_int(h, "h")?))),
                _ => Ok(None),
            },
            other => Err(unexpected("a size", other)),
        }
    }
}
