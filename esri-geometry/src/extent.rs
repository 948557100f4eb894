use crate::error::GeometryError;
use crate::geojson::GeoJsonPolygon;
use crate::point::Point;
use crate::spatial_reference::SpatialReference;
use crate::tolerance::Tolerance;
use serde::{Deserialize, Serialize};

/// Closed range of an ordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Interval {
    /// Creates a new interval.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `max - min`.
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// Smallest interval containing both. A NaN bound on one side yields the other side's bound.
    pub fn merge(&self, other: &Interval) -> Interval {
        Interval {
            min: merge_min(self.min, other.min),
            max: merge_max(self.max, other.max),
        }
    }
}

fn merge_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b < a {
        b
    } else {
        a
    }
}

fn merge_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b > a {
        b
    } else {
        a
    }
}

/// Axis-aligned bounding box with optional elevation and measure ranges.
///
/// Z and M ranges are independent of each other, and each is either fully present or absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Extent {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
    z: Option<Interval>,
    m: Option<Interval>,
    spatial_reference: Option<SpatialReference>,
}

impl Default for Extent {
    fn default() -> Self {
        Self::empty()
    }
}

impl Extent {
    /// Creates a planar extent.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
            z: None,
            m: None,
            spatial_reference: None,
        }
    }

    /// The `(0, 0, 0, 0)` extent.
    pub fn empty() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Extent with all bounds NaN. Merging it with another extent gives the other extent's bounds.
    pub fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }

    /// Creates an extent from `[xmin, ymin, xmax, ymax]`, `[xmin, ymin, zmin, xmax, ymax, zmax]` or
    /// `[xmin, ymin, zmin, mmin, xmax, ymax, zmax, mmax]`.
    pub fn from_coordinates(coordinates: &[f64]) -> Result<Self, GeometryError> {
        match *coordinates {
            [x_min, y_min, x_max, y_max] => Ok(Self::new(x_min, y_min, x_max, y_max)),
            [x_min, y_min, z_min, x_max, y_max, z_max] => {
                Ok(Self::new(x_min, y_min, x_max, y_max).with_z(z_min, z_max))
            }
            [x_min, y_min, z_min, m_min, x_max, y_max, z_max, m_max] => {
                Ok(Self::new(x_min, y_min, x_max, y_max)
                    .with_z(z_min, z_max)
                    .with_m(m_min, m_max))
            }
            _ => Err(GeometryError::Format(format!(
                "extent needs 4, 6 or 8 ordinates, got {}",
                coordinates.len()
            ))),
        }
    }

    /// Sets the elevation range.
    pub fn with_z(mut self, z_min: f64, z_max: f64) -> Self {
        self.z = Some(Interval::new(z_min, z_max));
        self
    }

    /// Sets the measure range.
    pub fn with_m(mut self, m_min: f64, m_max: f64) -> Self {
        self.m = Some(Interval::new(m_min, m_max));
        self
    }

    /// Replaces the elevation range.
    pub fn with_z_interval(mut self, z: Option<Interval>) -> Self {
        self.z = z;
        self
    }

    /// Replaces the measure range.
    pub fn with_m_interval(mut self, m: Option<Interval>) -> Self {
        self.m = m;
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

    /// Minimum x.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Minimum y.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Maximum x.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Maximum y.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Elevation range.
    pub fn z(&self) -> Option<Interval> {
        self.z
    }

    /// Measure range.
    pub fn m(&self) -> Option<Interval> {
        self.m
    }

    /// Minimum elevation.
    pub fn z_min(&self) -> Option<f64> {
        self.z.map(|z| z.min)
    }

    /// Maximum elevation.
    pub fn z_max(&self) -> Option<f64> {
        self.z.map(|z| z.max)
    }

    /// Minimum measure.
    pub fn m_min(&self) -> Option<f64> {
        self.m.map(|m| m.min)
    }

    /// Maximum measure.
    pub fn m_max(&self) -> Option<f64> {
        self.m.map(|m| m.max)
    }

    /// Spatial reference.
    pub fn spatial_reference(&self) -> Option<&SpatialReference> {
        self.spatial_reference.as_ref()
    }

    /// `x_max - x_min`.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// `y_max - y_min`.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Elevation span.
    pub fn depth(&self) -> Option<f64> {
        self.z.map(|z| z.length())
    }

    /// Measure span.
    pub fn distance(&self) -> Option<f64> {
        self.m.map(|m| m.length())
    }

    /// True when width or height is zero within tolerance.
    pub fn is_empty(&self) -> bool {
        self.x_max.is_close(self.x_min) || self.y_max.is_close(self.y_min)
    }

    /// Lower corner. Carries Z (and M when Z is present) of the extent.
    pub fn min(&self) -> Point {
        self.corner(self.x_min, self.y_min, self.z_min(), self.m_min())
    }

    /// Upper corner.
    pub fn max(&self) -> Point {
        self.corner(self.x_max, self.y_max, self.z_max(), self.m_max())
    }

    fn corner(&self, x: f64, y: f64, z: Option<f64>, m: Option<f64>) -> Point {
        let point = match (z, m) {
            (Some(z), Some(m)) => Point::new_zm(x, y, z, m),
            (Some(z), None) => Point::new_z(x, y, z),
            _ => Point::new(x, y),
        };
        point.with_spatial_reference(self.spatial_reference.clone())
    }

    /// Midpoint of the planar box.
    pub fn center(&self) -> Point {
        Point::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
        .with_spatial_reference(self.spatial_reference.clone())
    }

    /// The two corners of the extent.
    pub fn bounding_points(&self) -> [Point; 2] {
        [self.min(), self.max()]
    }

    /// Flat ordinate array: 8 values if both Z and M are present, 6 with Z only, 4 otherwise.
    pub fn to_coordinates(&self) -> Vec<f64> {
        match (self.z, self.m) {
            (Some(z), Some(m)) => vec![
                self.x_min, self.y_min, z.min, m.min, self.x_max, self.y_max, z.max, m.max,
            ],
            (Some(z), None) => vec![self.x_min, self.y_min, z.min, self.x_max, self.y_max, z.max],
            _ => vec![self.x_min, self.y_min, self.x_max, self.y_max],
        }
    }

    /// Smallest extent containing both.
    ///
    /// NaN bounds are treated as unset. A Z or M range present on only one side is kept as is.
    /// Fails if both extents have spatial references and they differ. The result takes this
    /// extent's spatial reference, or the other's if this one has none.
    pub fn union(&self, other: &Extent) -> Result<Extent, GeometryError> {
        if let (Some(a), Some(b)) = (&self.spatial_reference, &other.spatial_reference) {
            if a != b {
                return Err(GeometryError::InvalidOperation(format!(
                    "cannot union extents in different spatial references ({a} and {b})"
                )));
            }
        }

        let merge_optional = |a: Option<Interval>, b: Option<Interval>| match (a, b) {
            (Some(a), Some(b)) => Some(a.merge(&b)),
            (a, b) => a.or(b),
        };

        Ok(Extent {
            x_min: merge_min(self.x_min, other.x_min),
            y_min: merge_min(self.y_min, other.y_min),
            x_max: merge_max(self.x_max, other.x_max),
            y_max: merge_max(self.y_max, other.y_max),
            z: merge_optional(self.z, other.z),
            m: merge_optional(self.m, other.m),
            spatial_reference: self
                .spatial_reference
                .clone()
                .or_else(|| other.spatial_reference.clone()),
        })
    }

    /// Union of all the given extents. `None` for an empty iterator.
    pub fn union_all<'a>(
        extents: impl IntoIterator<Item = &'a Extent>,
    ) -> Result<Option<Extent>, GeometryError> {
        let mut iter = extents.into_iter();
        let Some(first) = iter.next() else {
            return Ok(None);
        };

        iter.try_fold(first.clone(), |acc, next| acc.union(next))
            .map(Some)
    }

    /// Polygon with the closed ring `min → (xmax, ymin) → max → (xmin, ymax) → min`.
    pub fn to_geojson(&self) -> GeoJsonPolygon {
        GeoJsonPolygon {
            coordinates: vec![vec![
                vec![self.x_min, self.y_min],
                vec![self.x_max, self.y_min],
                vec![self.x_max, self.y_max],
                vec![self.x_min, self.y_max],
                vec![self.x_min, self.y_min],
            ]],
        }
    }
}

/// Extent of a sequence of points.
///
/// The first present point decides whether Z and M ranges are tracked and which spatial reference
/// the result has. `None` items are skipped. An empty sequence gives [`Extent::empty`].
pub fn extent_of_points<'a, I, P>(points: I) -> Extent
where
    I: IntoIterator<Item = P>,
    P: Into<Option<&'a Point>>,
{
    let mut iter = points.into_iter().filter_map(Into::into);
    let Some(first) = iter.next() else {
        return Extent::empty();
    };

    iter.fold(first.extent(), |mut extent, point| {
        extent.x_min = merge_min(extent.x_min, point.x());
        extent.y_min = merge_min(extent.y_min, point.y());
        extent.x_max = merge_max(extent.x_max, point.x());
        extent.y_max = merge_max(extent.y_max, point.y());
        if let (Some(z), Some(range)) = (point.z(), extent.z.as_mut()) {
            *range = range.merge(&Interval::new(z, z));
        }
        if let (Some(m), Some(range)) = (point.m(), extent.m.as_mut()) {
            *range = range.merge(&Interval::new(m, m));
        }
        extent
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn from_coordinates_layouts() {
        let extent = Extent::from_coordinates(&[1.1, 2.2, 3.3, 4.4]).unwrap();
        assert_eq!(extent.x_min(), 1.1);
        assert_eq!(extent.y_max(), 4.4);
        assert_eq!(extent.z(), None);

        let extent = Extent::from_coordinates(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(extent.z(), Some(Interval::new(3.0, 6.0)));
        assert_eq!(extent.x_max(), 4.0);

        let extent =
            Extent::from_coordinates(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
        assert_eq!(extent.z(), Some(Interval::new(3.0, 7.0)));
        assert_eq!(extent.m(), Some(Interval::new(4.0, 8.0)));
        assert_eq!(extent.to_coordinates(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

        assert_matches!(
            Extent::from_coordinates(&[1.0, 2.0, 3.0]),
            Err(GeometryError::Format(_))
        );
    }

    #[test]
    fn dimensions() {
        let extent = Extent::new(1.0, 2.0, 4.0, 8.0).with_z(0.0, 10.0);
        assert_eq!(extent.width(), 3.0);
        assert_eq!(extent.height(), 6.0);
        assert_eq!(extent.depth(), Some(10.0));
        assert_eq!(extent.distance(), None);
        assert_eq!(extent.center(), Point::new(2.5, 5.0));
        assert_eq!(extent.min(), Point::new_z(1.0, 2.0, 0.0));
        assert_eq!(extent.max(), Point::new_z(4.0, 8.0, 10.0));
    }

    #[test]
    fn empty_within_tolerance() {
        assert!(Extent::empty().is_empty());
        let x = 0.1 + 0.2;
        assert!(Extent::new(0.3, 0.0, x, 1.0).is_empty());
        assert!(!Extent::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn union_with_nan_accumulator() {
        let extent = Extent::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Extent::nan().union(&extent).unwrap(), extent);
        assert_eq!(extent.union(&Extent::nan()).unwrap(), extent);
    }

    #[test]
    fn union_keeps_one_sided_ranges() {
        let with_z = Extent::new(0.0, 0.0, 1.0, 1.0).with_z(2.0, 3.0);
        let union = Extent::nan().union(&with_z).unwrap();
        assert_eq!(union.z(), Some(Interval::new(2.0, 3.0)));
        assert_eq!(union.m(), None);

        let with_m = Extent::new(-1.0, -1.0, 0.5, 0.5).with_m(10.0, 20.0);
        let union = with_z.union(&with_m).unwrap();
        assert_eq!(union, Extent::new(-1.0, -1.0, 1.0, 1.0).with_z(2.0, 3.0).with_m(10.0, 20.0));
    }

    #[test]
    fn union_spatial_references() {
        let a = Extent::new(0.0, 0.0, 1.0, 1.0).with_spatial_reference(SpatialReference::WGS84);
        let b = Extent::new(2.0, -1.0, 3.0, 0.5);
        let union = a.union(&b).unwrap();
        assert_eq!(union, Extent::new(0.0, -1.0, 3.0, 1.0).with_spatial_reference(SpatialReference::WGS84));
        assert_eq!(b.union(&a).unwrap().spatial_reference(), Some(&SpatialReference::WGS84));

        let c = b.with_spatial_reference(SpatialReference::WEB_MERCATOR);
        assert_matches!(a.union(&c), Err(GeometryError::InvalidOperation(_)));
    }

    #[test]
    fn union_all() {
        let extents = [
            Extent::new(0.0, 0.0, 1.0, 1.0),
            Extent::new(-1.0, 0.5, 0.5, 3.0),
            Extent::new(0.0, -2.0, 0.1, 0.0),
        ];
        assert_eq!(
            Extent::union_all(&extents).unwrap(),
            Some(Extent::new(-1.0, -2.0, 1.0, 3.0))
        );
        assert_eq!(Extent::union_all(Vec::<&Extent>::new()).unwrap(), None);
    }

    #[test]
    fn geojson_ring() {
        let polygon = Extent::new(0.0, 1.0, 2.0, 3.0).to_geojson();
        assert_eq!(
            polygon.coordinates,
            vec![vec![
                vec![0.0, 1.0],
                vec![2.0, 1.0],
                vec![2.0, 3.0],
                vec![0.0, 3.0],
                vec![0.0, 1.0],
            ]]
        );
    }

    #[test]
    fn extent_of_points_follows_first_point() {
        let points = [
            Point::new_z(1.0, 5.0, 10.0).with_spatial_reference(SpatialReference::WGS84),
            Point::new(-1.0, 2.0),
            Point::new_z(3.0, 4.0, -10.0),
        ];
        let extent = extent_of_points(&points);
        assert_eq!(
            extent,
            Extent::new(-1.0, 2.0, 3.0, 5.0)
                .with_z(-10.0, 10.0)
                .with_spatial_reference(SpatialReference::WGS84)
        );

        let planar = extent_of_points([Point::new(0.0, 0.0), Point::new_zm(1.0, 1.0, 1.0, 1.0)].iter());
        assert_eq!(planar, Extent::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn extent_of_points_skips_absent() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(2.0, 3.0);
        let extent = extent_of_points([None, Some(&a), None, Some(&b)]);
        assert_eq!(extent, Extent::new(1.0, 1.0, 2.0, 3.0));

        assert_eq!(extent_of_points(Vec::<&Point>::new()), Extent::empty());
    }
}
