//! Comma-delimited coordinate literals such as `1.1,2.2,3.3`, and their inverse.

use crate::error::CodecError;
use esri_geometry::geojson::GeoJsonPoint;
use esri_geometry::{Extent, Point, Size};

/// Which optional ordinates a delimited literal may carry.
///
/// A measure is only stored together with an elevation, so [`ParseStyle::AllowM`] alone accepts
/// the same ordinate counts as [`ParseStyle::Xy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseStyle {
    /// X and Y only.
    #[default]
    Xy,
    /// X, Y and optionally Z.
    AllowZ,
    /// X, Y and optionally M.
    AllowM,
    /// Any of X, Y, Z and M.
    Any,
}

impl ParseStyle {
    /// Maximum number of ordinates in a point literal.
    pub fn max_point_ordinates(self) -> usize {
        match self {
            ParseStyle::Xy | ParseStyle::AllowM => 2,
            ParseStyle::AllowZ => 3,
            ParseStyle::Any => 4,
        }
    }

    /// Maximum number of ordinates in an extent literal.
    pub fn max_extent_ordinates(self) -> usize {
        self.max_point_ordinates() * 2
    }
}

/// Splits a literal on commas and parses every part as a number.
pub fn parse_numbers(value: &str) -> Result<Vec<f64>, CodecError> {
    value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| CodecError::format(format!("'{part}' is not a number")))
        })
        .collect()
}

/// Parses a point literal: 2 up to [`ParseStyle::max_point_ordinates`] numbers.
pub fn parse_point_coordinates(value: &str, style: ParseStyle) -> Result<Vec<f64>, CodecError> {
    let max = style.max_point_ordinates();
    let parts = value.split(',').count();
    if parts < 2 || parts > max {
        return Err(CodecError::format(format!(
            "point literal '{value}' must have 2 to {max} values"
        )));
    }

    parse_numbers(value)
}

/// Parses an extent literal: 4, 6 or 8 numbers, up to [`ParseStyle::max_extent_ordinates`].
pub fn parse_extent_coordinates(value: &str, style: ParseStyle) -> Result<Vec<f64>, CodecError> {
    let max = style.max_extent_ordinates();
    let parts = value.split(',').count();
    if parts < 4 || parts > max || parts % 2 != 0 {
        return Err(CodecError::format(format!(
            "extent literal '{value}' must have an even number of values from 4 to {max}"
        )));
    }

    parse_numbers(value)
}

/// Joins numbers with commas.
pub fn join_numbers<T: ToString>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Delimited text form, the inverse of literal parsing.
pub trait DataString {
    /// Values joined by commas, e.g. `1.1,2.2`.
    fn to_data_string(&self) -> String;
}

impl DataString for Point {
    fn to_data_string(&self) -> String {
        join_numbers(self.to_coordinates())
    }
}

impl DataString for Extent {
    fn to_data_string(&self) -> String {
        join_numbers(self.to_coordinates())
    }
}

impl DataString for GeoJsonPoint {
    fn to_data_string(&self) -> String {
        join_numbers(self.coordinates().iter())
    }
}

impl DataString for Size {
    fn to_data_string(&self) -> String {
        join_numbers(self.to_dimensions())
    }
}
