//! Parsing of request-style literals: either JSON (detected by a leading `{` or `[`) or a
//! comma-delimited list of ordinates.

use crate::decode::JsonDecode;
use crate::error::CodecError;
use crate::literal::{parse_extent_coordinates, parse_numbers, parse_point_coordinates, ParseStyle};
use esri_geometry::geojson::GeoJsonPoint;
use esri_geometry::{Extent, Geometry, Point, Size, SpatialReference};

/// Types that can be read from a literal string.
pub trait ParseLiteral: Sized {
    /// Parses the literal. `style` limits the number of ordinates in delimited literals, JSON
    /// input is not limited by it.
    ///
    /// Fails with [`CodecError::MissingArgument`] for blank input. JSON that does not describe a
    /// value of this type gives `Ok(None)`.
    fn parse_literal(value: &str, style: ParseStyle) -> Result<Option<Self>, CodecError>;

    /// Parses with the default [`ParseStyle`].
    fn from_literal(value: &str) -> Result<Option<Self>, CodecError> {
        Self::parse_literal(value, ParseStyle::default())
    }
}

enum Literal<'a> {
    Json(&'a str),
    Delimited(&'a str),
}

fn classify<'a>(value: &'a str, json_starts: &[char]) -> Result<Literal<'a>, CodecError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CodecError::MissingArgument);
    }

    if value.starts_with(json_starts) {
        log::trace!("Literal read as JSON");
        Ok(Literal::Json(value))
    } else {
        Ok(Literal::Delimited(value))
    }
}

const ANY_JSON: &[char] = &['{', '['];
const OBJECT_JSON: &[char] = &['{'];

impl ParseLiteral for Point {
    fn parse_literal(value: &str, style: ParseStyle) -> Result<Option<Self>, CodecError> {
        match classify(value, ANY_JSON)? {
            Literal::Json(json) => Point::from_json_str(json),
            Literal::Delimited(text) => Ok(Some(Point::from_coordinates(
                &parse_point_coordinates(text, style)?,
            )?)),
        }
    }
}

impl ParseLiteral for Extent {
    fn parse_literal(value: &str, style: ParseStyle) -> Result<Option<Self>, CodecError> {
        match classify(value, ANY_JSON)? {
            Literal::Json(json) => Extent::from_json_str(json),
            Literal::Delimited(text) => Ok(Some(Extent::from_coordinates(
                &parse_extent_coordinates(text, style)?,
            )?)),
        }
    }
}

impl ParseLiteral for GeoJsonPoint {
    fn parse_literal(value: &str, style: ParseStyle) -> Result<Option<Self>, CodecError> {
        match classify(value, OBJECT_JSON)? {
            Literal::Json(json) => GeoJsonPoint::from_json_str(json),
            Literal::Delimited(text) => Ok(Some(GeoJsonPoint::new(parse_point_coordinates(
                text, style,
            )?)?)),
        }
    }
}

/// An integer is a WKID, other text is WKT.
impl ParseLiteral for SpatialReference {
    fn parse_literal(value: &str, _style: ParseStyle) -> Result<Option<Self>, CodecError> {
        match classify(value, OBJECT_JSON)? {
            Literal::Json(json) => SpatialReference::from_json_str(json),
            Literal::Delimited(text) => Ok(Some(match text.parse::<i32>() {
                Ok(wkid) => SpatialReference::from_wkid(wkid),
                Err(_) => SpatialReference::from_wkt(text),
            })),
        }
    }
}

/// `width,height` or a single side length.
impl ParseLiteral for Size {
    fn parse_literal(value: &str, _style: ParseStyle) -> Result<Option<Self>, CodecError> {
        match classify(value, ANY_JSON)? {
            Literal::Json(json) => Size::from_json_str(json),
            Literal::Delimited(text) => {
                let dimensions = text
                    .split(',')
                    .map(|part| {
                        part.trim().parse::<i32>().map_err(|_| {
                            CodecError::format(format!("'{part}' is not an integer"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Some(Size::from_dimensions(&dimensions)?))
            }
        }
    }
}

/// Two or three delimited values are a point, more are an extent.
impl ParseLiteral for Geometry {
    fn parse_literal(value: &str, style: ParseStyle) -> Result<Option<Self>, CodecError> {
        match classify(value, ANY_JSON)? {
            Literal::Json(json) => Geometry::from_json_str(json),
            Literal::Delimited(text) => {
                let count = parse_numbers(text)?.len();
                Ok(Some(if count <= 3 {
                    Point::from_coordinates(&parse_point_coordinates(text, style)?)?.into()
                } else {
                    Extent::from_coordinates(&parse_extent_coordinates(text, style)?)?.into()
                }))
            }
        }
    }
}

/// Parses a point and assigns `spatial_reference` unless the literal carries its own.
pub fn parse_point(
    value: &str,
    style: ParseStyle,
    spatial_reference: Option<SpatialReference>,
) -> Result<Option<Point>, CodecError> {
    Ok(Point::parse_literal(value, style)?.map(|point| match point.spatial_reference() {
        Some(_) => point,
        None => point.with_spatial_reference(spatial_reference),
    }))
}

/// Parses an extent and assigns `spatial_reference` unless the literal carries its own.
pub fn parse_extent(
    value: &str,
    style: ParseStyle,
    spatial_reference: Option<SpatialReference>,
) -> Result<Option<Extent>, CodecError> {
    Ok(Extent::parse_literal(value, style)?.map(|extent| match extent.spatial_reference() {
        Some(_) => extent,
        None => extent.with_spatial_reference(spatial_reference),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::DataString;
    use assert_matches::assert_matches;
    use esri_geometry::Interval;

    #[test]
    fn data_strings_round_trip() {
        for text in ["1.1,2.2", "1.1,2.2,3.3", "1.1,2.2,3.3,4.4"] {
            let point = Point::parse_literal(text, ParseStyle::Any).unwrap().unwrap();
            assert_eq!(point.to_data_string(), text);
        }

        for text in ["1.1,2.2,3.3,4.4", "1.1,2.2,3.3,4.4,5.5,6.6", "1,2,3,4,5,6,7,8"] {
            let extent = Extent::parse_literal(text, ParseStyle::Any).unwrap().unwrap();
            assert_eq!(extent.to_data_string(), text);
        }
    }

    #[test]
    fn extent_detection() {
        for text in [
            "[1.1,2.2,3.3,4.4]",
            "1.1,2.2,3.3,4.4",
            "{xmin:1.1,ymin:2.2,xmax:3.3,ymax:4.4}",
        ] {
            let extent = Extent::from_literal(text).unwrap().unwrap();
            assert_eq!(extent.x_min(), 1.1, "{text}");
            assert_eq!(extent.y_max(), 4.4, "{text}");
        }
    }

    #[test]
    fn point_detection() {
        let verbose = Point::from_literal("{ x:1.1, y:2.2 }").unwrap().unwrap();
        assert_eq!(verbose, Point::new(1.1, 2.2));

        let compact = Point::from_literal("[3.3, 2.2, 1.1]").unwrap().unwrap();
        assert_eq!(compact, Point::new_z(3.3, 2.2, 1.1));

        let delimited = Point::parse_literal(" 3.3, 2.2, 1.1 ", ParseStyle::AllowZ)
            .unwrap()
            .unwrap();
        assert_eq!(delimited, compact);
    }

    #[test]
    fn invalid_points() {
        for text in ["1,1;2,2", "1.1", "1.1,1.1,1.1,1.1,1.1", "a,b"] {
            assert_matches!(
                Point::parse_literal(text, ParseStyle::Any),
                Err(CodecError::Format(_)),
                "{text}"
            );
            assert_matches!(
                GeoJsonPoint::parse_literal(text, ParseStyle::Any),
                Err(CodecError::Format(_)),
                "{text}"
            );
        }

        for text in ["", "   "] {
            assert_matches!(Point::from_literal(text), Err(CodecError::MissingArgument));
            assert_matches!(
                GeoJsonPoint::from_literal(text),
                Err(CodecError::MissingArgument)
            );
        }
    }

    #[test]
    fn geojson_point_literals() {
        let point = GeoJsonPoint::from_literal("{ type: 'Point', coordinates: [2.2, 1.1] }")
            .unwrap()
            .unwrap();
        assert_eq!(point.coordinates(), &[2.2, 1.1]);

        let point = GeoJsonPoint::parse_literal("1,2,3,4", ParseStyle::Any)
            .unwrap()
            .unwrap();
        assert_eq!(point.m(), Some(4.0));
        assert_eq!(point.to_data_string(), "1,2,3,4");

        assert_matches!(
            GeoJsonPoint::from_literal("[1, 2]"),
            Err(CodecError::Format(_))
        );
    }

    #[test]
    fn spatial_reference_literals() {
        assert_eq!(
            SpatialReference::from_literal("WKT").unwrap(),
            Some(SpatialReference::from_wkt("WKT"))
        );
        assert_eq!(
            SpatialReference::from_literal("1").unwrap().and_then(|sr| sr.wkid()),
            Some(1)
        );
        assert_eq!(
            SpatialReference::from_literal("{ wkid: 4326 }").unwrap(),
            Some(SpatialReference::WGS84)
        );
        assert_eq!(
            SpatialReference::from_literal("{ wkid: 4326, wkt: 'WKT' }")
                .unwrap()
                .and_then(|sr| sr.wkt().map(str::to_owned)),
            Some("WKT".to_owned())
        );
        assert_matches!(
            SpatialReference::from_literal(""),
            Err(CodecError::MissingArgument)
        );
    }

    #[test]
    fn size_literals() {
        assert_eq!(Size::from_literal("400,300").unwrap(), Some(Size::new(400, 300)));
        assert_eq!(Size::from_literal("256").unwrap(), Some(Size::square(256)));
        assert_eq!(Size::from_literal("{ w: 1, h: 2 }").unwrap(), Some(Size::new(1, 2)));
        assert_eq!(Size::new(400, 300).to_data_string(), "400,300");
        assert_matches!(Size::from_literal("1.5,2"), Err(CodecError::Format(_)));
        assert_matches!(Size::from_literal("1,2,3"), Err(CodecError::Format(_)));
    }

    #[test]
    fn geometry_literals() {
        assert_eq!(
            Geometry::parse_literal("1,2,3", ParseStyle::Any).unwrap(),
            Some(Geometry::Point(Point::new_z(1.0, 2.0, 3.0)))
        );
        assert_eq!(
            Geometry::parse_literal("1,2,3,4", ParseStyle::Any).unwrap(),
            Some(Geometry::Extent(Extent::new(1.0, 2.0, 3.0, 4.0)))
        );
        assert_matches!(
            Geometry::parse_literal("1,2,3,4,5", ParseStyle::Any),
            Err(CodecError::Format(_))
        );
    }

    #[test]
    fn default_spatial_reference() {
        let point = parse_point("1,2", ParseStyle::Xy, Some(SpatialReference::WGS84))
            .unwrap()
            .unwrap();
        assert_eq!(point.spatial_reference(), Some(&SpatialReference::WGS84));

        let own = parse_point(
            "{ x: 1, y: 2, spatialReference: 3857 }",
            ParseStyle::Xy,
            Some(SpatialReference::WGS84),
        )
        .unwrap()
        .unwrap();
        assert_eq!(own.spatial_reference(), Some(&SpatialReference::WEB_MERCATOR));

        let extent = parse_extent(
            "[[0, 0, null, 1], [1, 1, null, 2]]",
            ParseStyle::Xy,
            Some(SpatialReference::WGS84),
        )
        .unwrap()
        .unwrap();
        assert_eq!(extent.m(), Some(Interval::new(1.0, 2.0)));
        assert_eq!(extent.spatial_reference(), Some(&SpatialReference::WGS84));
    }
}
