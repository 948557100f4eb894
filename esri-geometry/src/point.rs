use crate::cartesian::CartesianPoint2d;
use crate::error::GeometryError;
use crate::extent::Extent;
use crate::size::Size;
use crate::spatial_reference::SpatialReference;
use approx::AbsDiffEq;
use std::ops::{Add, Div, Mul, Sub};

/// Optional ordinates of a point beyond x and y.
///
/// A measure is only carried together with an elevation, so the position of an
/// ordinate in a coordinate array (`[x, y, z, m]`) is never ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Ordinates {
    /// Planar point.
    #[default]
    Xy,
    /// Point with elevation.
    Xyz {
        /// Elevation.
        z: f64,
    },
    /// Point with elevation and measure.
    Xyzm {
        /// Elevation.
        z: f64,
        /// Measure.
        m: f64,
    },
}

impl Ordinates {
    /// Number of ordinates including x and y.
    pub fn dimensions(&self) -> usize {
        match self {
            Ordinates::Xy => 2,
            Ordinates::Xyz { .. } => 3,
            Ordinates::Xyzm { .. } => 4,
        }
    }
}

/// A point with optional elevation and measure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Point {
    x: f64,
    y: f64,
    ordinates: Ordinates,
    spatial_reference: Option<SpatialReference>,
}

impl Point {
    /// Creates a planar point.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ordinates: Ordinates::Xy,
            spatial_reference: None,
        }
    }

    /// Creates a point with elevation.
    pub fn new_z(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y).with_ordinates(Ordinates::Xyz { z })
    }

    /// Creates a point with elevation and measure.
    pub fn new_zm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self::new(x, y).with_ordinates(Ordinates::Xyzm { z, m })
    }

    /// Creates a point from an `[x, y, z?, m?]` coordinate array.
    ///
    /// Ordinates after the fourth are ignored. Fewer than two is an error.
    pub fn from_coordinates(coordinates: &[f64]) -> Result<Self, GeometryError> {
        match *coordinates {
            [x, y] => Ok(Self::new(x, y)),
            [x, y, z] => Ok(Self::new_z(x, y, z)),
            [x, y, z, m, ..] => Ok(Self::new_zm(x, y, z, m)),
            _ => Err(GeometryError::Format(format!(
                "point needs at least 2 ordinates, got {}",
                coordinates.len()
            ))),
        }
    }

    /// Replaces the optional ordinates.
    pub fn with_ordinates(mut self, ordinates: Ordinates) -> Self {
        self.ordinates = ordinates;
        self
    }

    /// Sets the spatial reference.
    pub fn with_spatial_reference(
        mut self,
        spatial_reference: impl Into<Option<SpatialReference>>,
    ) -> Self {
        self.spatial_reference = spatial_reference.into();
        self
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Elevation.
    pub fn z(&self) -> Option<f64> {
        match self.ordinates {
            Ordinates::Xy => None,
            Ordinates::Xyz { z } | Ordinates::Xyzm { z, .. } => Some(z),
        }
    }

    /// Measure.
    pub fn m(&self) -> Option<f64> {
        match self.ordinates {
            Ordinates::Xyzm { m, .. } => Some(m),
            _ => None,
        }
    }

    /// Optional ordinates.
    pub fn ordinates(&self) -> Ordinates {
        self.ordinates
    }

    /// True if the point has elevation.
    pub fn has_z(&self) -> bool {
        self.z().is_some()
    }

    /// True if the point has a measure.
    pub fn has_m(&self) -> bool {
        self.m().is_some()
    }

    /// Spatial reference of the point.
    pub fn spatial_reference(&self) -> Option<&SpatialReference> {
        self.spatial_reference.as_ref()
    }

    /// Coordinates as `[x, y]`, `[x, y, z]` or `[x, y, z, m]`.
    pub fn to_coordinates(&self) -> Vec<f64> {
        match self.ordinates {
            Ordinates::Xy => vec![self.x, self.y],
            Ordinates::Xyz { z } => vec![self.x, self.y, z],
            Ordinates::Xyzm { z, m } => vec![self.x, self.y, z, m],
        }
    }

    /// Degenerate extent of the point, keeping its dimensionality.
    pub fn extent(&self) -> Extent {
        let mut extent = Extent::new(self.x, self.y, self.x, self.y)
            .with_spatial_reference(self.spatial_reference.clone());
        if let Some(z) = self.z() {
            extent = extent.with_z(z, z);
        }
        if let Some(m) = self.m() {
            extent = extent.with_m(m, m);
        }

        extent
    }

    /// Center of a point is the point itself.
    pub fn center(&self) -> Point {
        self.clone()
    }

    fn zip_ordinates(&self, other: &Point, op: impl Fn(f64, f64) -> f64) -> Ordinates {
        let other_z = other.z().unwrap_or(0.0);
        let other_m = other.m().unwrap_or(0.0);
        match self.ordinates {
            Ordinates::Xy => Ordinates::Xy,
            Ordinates::Xyz { z } => Ordinates::Xyz { z: op(z, other_z) },
            Ordinates::Xyzm { z, m } => Ordinates::Xyzm {
                z: op(z, other_z),
                m: op(m, other_m),
            },
        }
    }

    fn scale_ordinates(&self, op: impl Fn(f64) -> f64) -> Ordinates {
        match self.ordinates {
            Ordinates::Xy => Ordinates::Xy,
            Ordinates::Xyz { z } => Ordinates::Xyz { z: op(z) },
            Ordinates::Xyzm { z, m } => Ordinates::Xyzm { z: op(z), m: op(m) },
        }
    }
}

impl CartesianPoint2d for Point {
    type Num = f64;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// Componentwise sum. The result has the left operand's dimensionality and spatial reference;
/// ordinates missing on the right count as zero.
impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            ordinates: self.zip_ordinates(&rhs, |a, b| a + b),
            spatial_reference: self.spatial_reference,
        }
    }
}

/// Componentwise difference, with the same rules as the sum.
impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            ordinates: self.zip_ordinates(&rhs, |a, b| a - b),
            spatial_reference: self.spatial_reference,
        }
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point {
            x: self.x * rhs,
            y: self.y * rhs,
            ordinates: self.scale_ordinates(|v| v * rhs),
            spatial_reference: self.spatial_reference,
        }
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point {
            x: self.x / rhs,
            y: self.y / rhs,
            ordinates: self.scale_ordinates(|v| v / rhs),
            spatial_reference: self.spatial_reference,
        }
    }
}

impl Add<Size> for Point {
    type Output = Point;

    fn add(mut self, rhs: Size) -> Point {
        self.x += f64::from(rhs.width());
        self.y += f64::from(rhs.height());
        self
    }
}

impl Sub<Size> for Point {
    type Output = Point;

    fn sub(mut self, rhs: Size) -> Point {
        self.x -= f64::from(rhs.width());
        self.y -= f64::from(rhs.height());
        self
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let ordinates_eq = match (self.ordinates, other.ordinates) {
            (Ordinates::Xy, Ordinates::Xy) => true,
            (Ordinates::Xyz { z: a }, Ordinates::Xyz { z: b }) => a.abs_diff_eq(&b, epsilon),
            (Ordinates::Xyzm { z: az, m: am }, Ordinates::Xyzm { z: bz, m: bm }) => {
                az.abs_diff_eq(&bz, epsilon) && am.abs_diff_eq(&bm, epsilon)
            }
            _ => false,
        };

        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && ordinates_eq
            && self.spatial_reference == other.spatial_reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    #[test]
    fn coordinates_follow_dimensionality() {
        assert_eq!(Point::new(1.1, 2.2).to_coordinates(), vec![1.1, 2.2]);
        assert_eq!(Point::new_z(1.1, 2.2, 3.3).to_coordinates(), vec![1.1, 2.2, 3.3]);
        assert_eq!(
            Point::new_zm(1.1, 2.2, 3.3, 4.4).to_coordinates(),
            vec![1.1, 2.2, 3.3, 4.4]
        );
    }

    #[test]
    fn from_coordinates() {
        let point = Point::from_coordinates(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(point.z(), Some(3.0));
        assert_eq!(point.m(), None);

        let point = Point::from_coordinates(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(point.m(), Some(4.0));

        assert_matches!(
            Point::from_coordinates(&[1.0]),
            Err(GeometryError::Format(_))
        );
    }

    #[test]
    fn arithmetic_keeps_left_dimensionality() {
        let a = Point::new_z(1.0, 2.0, 3.0).with_spatial_reference(SpatialReference::WGS84);
        let b = Point::new(1.0, 1.0);

        let sum = a.clone() + b.clone();
        assert_eq!(sum.to_coordinates(), vec![2.0, 3.0, 3.0]);
        assert_eq!(sum.spatial_reference(), Some(&SpatialReference::WGS84));

        let diff = b - a.clone();
        assert_eq!(diff.to_coordinates(), vec![0.0, -1.0]);
        assert_eq!(diff.spatial_reference(), None);

        assert_eq!((a.clone() * 2.0).to_coordinates(), vec![2.0, 4.0, 6.0]);
        assert_eq!((a / 2.0).to_coordinates(), vec![0.5, 1.0, 1.5]);
    }

    #[test]
    fn offset_by_size() {
        let point = Point::new(1.0, 1.0) + Size::new(2, 3);
        assert_eq!(point, Point::new(3.0, 4.0));
        assert_eq!(point - Size::new(1, 1), Point::new(2.0, 3.0));
    }

    #[test]
    fn equality_is_exact() {
        assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
        assert_ne!(Point::new(1.0, 2.0), Point::new_z(1.0, 2.0, 0.0));
        assert_ne!(
            Point::new(1.0, 2.0),
            Point::new(1.0, 2.0).with_spatial_reference(SpatialReference::WGS84)
        );
        assert_abs_diff_eq!(Point::new(1.0, 2.0), Point::new(1.0 + 1e-9, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn point_extent_is_degenerate() {
        let extent = Point::new_z(1.0, 2.0, 3.0).extent();
        assert_eq!(extent.x_min(), 1.0);
        assert_eq!(extent.y_max(), 2.0);
        assert_eq!(extent.z_min(), Some(3.0));
        assert!(extent.is_empty());
    }
}
