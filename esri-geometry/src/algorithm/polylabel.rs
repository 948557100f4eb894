//! Pole of inaccessibility search.
//!
//! The pole is the interior point of a polygon that is farthest from its boundary. The search
//! covers the exterior ring's bounding box with square cells and refines the most promising ones
//! first, pruning every cell that cannot beat the best distance found so far by more than the
//! requested precision.
//!
//! Cells are kept in a [`BinaryHeap`] ordered by their potential (the best distance any point of
//! the cell can reach), so each step pops the best candidate in `O(log n)`. Cells with equal
//! potential are processed in insertion order, which keeps the result deterministic.

use crate::cartesian::CartesianPoint2d;
use crate::error::GeometryError;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::tolerance::Tolerance;
use nalgebra::{Point2, Vector2};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Bounding boxes with a side smaller than this are not searched; their lower corner is returned.
pub const MIN_CELL_SIZE: f64 = 0.1;

/// Pole search configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylabelOptions {
    precision: f64,
    max_probes: Option<usize>,
}

impl Default for PolylabelOptions {
    fn default() -> Self {
        Self {
            precision: 1.0,
            max_probes: None,
        }
    }
}

impl PolylabelOptions {
    /// Maximum difference between the returned distance and the true optimum. Default is `1.0`.
    /// Must be positive and finite.
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Sets the precision.
    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the precision.
    pub fn set_precision(&mut self, precision: f64) {
        self.precision = precision;
    }

    /// Maximum number of cells taken from the queue. When reached, the search stops and returns
    /// the best point found so far. Default is no limit.
    pub fn max_probes(&self) -> Option<usize> {
        self.max_probes
    }

    /// Sets the probe budget.
    pub fn with_max_probes(mut self, max_probes: impl Into<Option<usize>>) -> Self {
        self.max_probes = max_probes.into();
        self
    }

    /// Sets the probe budget.
    pub fn set_max_probes(&mut self, max_probes: impl Into<Option<usize>>) {
        self.max_probes = max_probes.into();
    }
}

/// Result of the pole search.
#[derive(Debug, Clone, PartialEq)]
pub struct Pole {
    /// The pole, in the polygon's spatial reference.
    pub point: Point,
    /// Signed distance from the pole to the nearest boundary edge (negative if outside).
    pub distance: f64,
    /// Number of cells taken from the queue.
    pub probes: usize,
    /// False if the search was stopped by the probe budget.
    pub converged: bool,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    center: Point2<f64>,
    half_size: f64,
    distance: f64,
    potential: f64,
    order: u64,
}

impl Cell {
    fn new(center: Point2<f64>, half_size: f64, polygon: &Polygon, order: u64) -> Self {
        let distance = signed_distance(&center, polygon);
        Self {
            center,
            half_size,
            distance,
            potential: distance + half_size * std::f64::consts::SQRT_2,
            order,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        self.potential
            .total_cmp(&other.potential)
            .then_with(|| other.order.cmp(&self.order))
    }
}

struct CellQueue<'a> {
    polygon: &'a Polygon,
    heap: BinaryHeap<Cell>,
    next_order: u64,
}

impl<'a> CellQueue<'a> {
    fn new(polygon: &'a Polygon) -> Self {
        Self {
            polygon,
            heap: BinaryHeap::new(),
            next_order: 0,
        }
    }

    fn cell(&mut self, center: Point2<f64>, half_size: f64) -> Cell {
        let cell = Cell::new(center, half_size, self.polygon, self.next_order);
        self.next_order += 1;
        cell
    }

    fn push(&mut self, center: Point2<f64>, half_size: f64) {
        let cell = self.cell(center, half_size);
        self.heap.push(cell);
    }
}

/// Signed distance from the point to the nearest edge of any ring, positive inside the polygon.
///
/// Inside is decided by the even-odd rule over all rings.
pub fn signed_distance(point: &impl CartesianPoint2d<Num = f64>, polygon: &Polygon) -> f64 {
    let mut inside = false;
    let mut min_distance_sq = f64::INFINITY;

    for segment in polygon.rings().iter().flat_map(|ring| ring.iter_segments()) {
        if segment.crosses_ray_from(point) {
            inside = !inside;
        }
        min_distance_sq = min_distance_sq.min(segment.distance_to_point_sq(point));
    }

    let distance = min_distance_sq.sqrt();
    if inside {
        distance
    } else {
        -distance
    }
}

/// Area-weighted centroid of the exterior ring, or its first vertex if the ring has no area.
fn centroid(polygon: &Polygon) -> Option<Point2<f64>> {
    let ring = polygon.exterior()?;
    let first = ring.points().first()?;

    let mut area = 0.0;
    let mut sum = Vector2::new(0.0, 0.0);
    for segment in ring.iter_segments() {
        let (a, b) = (segment.0, segment.1);
        let f = a.x() * b.y() - b.x() * a.y();
        sum += Vector2::new(a.x() + b.x(), a.y() + b.y()) * f;
        area += f * 3.0;
    }

    if area.is_close_to_zero() {
        Some(Point2::new(first.x(), first.y()))
    } else {
        Some(Point2::from(sum / area))
    }
}

/// Finds the pole of inaccessibility of the polygon with the given precision.
pub fn polylabel(polygon: &Polygon, precision: f64) -> Result<Point, GeometryError> {
    find_pole(polygon, &PolylabelOptions::default().with_precision(precision)).map(|p| p.point)
}

/// Finds the pole of inaccessibility of the polygon.
///
/// The search area is the bounding box of the exterior ring; holes and additional rings take part
/// in the distance computation. If the box is smaller than [`MIN_CELL_SIZE`] in either direction,
/// its lower corner is returned without searching.
///
/// Fails with [`GeometryError::InvalidOperation`] unless the precision is a positive finite
/// number.
pub fn find_pole(polygon: &Polygon, options: &PolylabelOptions) -> Result<Pole, GeometryError> {
    if !options.precision.is_positive_number() {
        return Err(GeometryError::InvalidOperation(format!(
            "pole precision must be a positive number, got {}",
            options.precision
        )));
    }

    let exterior = polygon.exterior().ok_or(GeometryError::EmptyGeometry)?;
    let extent = exterior.extent();
    let min = extent.min();
    let cell_size = extent.width().min(extent.height());

    let into_pole = |center: Point2<f64>, distance: f64, probes: usize, converged: bool| Pole {
        point: Point::new(center.x, center.y)
            .with_spatial_reference(polygon.spatial_reference().cloned()),
        distance,
        probes,
        converged,
    };

    if cell_size.is_nan() || cell_size < MIN_CELL_SIZE {
        let corner = Point2::new(min.x(), min.y());
        return Ok(into_pole(corner, signed_distance(&corner, polygon), 0, true));
    }

    let mut queue = CellQueue::new(polygon);
    let half_size = cell_size / 2.0;

    let mut x = extent.x_min();
    while x < extent.x_max() {
        let mut y = extent.y_min();
        while y < extent.y_max() {
            queue.push(Point2::new(x + half_size, y + half_size), half_size);
            y += cell_size;
        }
        x += cell_size;
    }

    let mut best = match centroid(polygon) {
        Some(center) => queue.cell(center, 0.0),
        None => return Err(GeometryError::EmptyGeometry),
    };

    let box_center = min.clone() + (extent.max() - min) / 2.0;
    let box_cell = queue.cell(Point2::new(box_center.x(), box_center.y()), 0.0);
    if box_cell.distance > best.distance {
        best = box_cell;
    }

    let mut probes = 0;
    let mut converged = true;
    while let Some(cell) = queue.heap.pop() {
        probes += 1;

        if cell.distance > best.distance {
            log::trace!(
                "New best pole candidate at ({}, {}), distance {}",
                cell.center.x,
                cell.center.y,
                cell.distance
            );
            best = cell;
        }

        if cell.potential - best.distance <= options.precision {
            continue;
        }

        if options.max_probes.is_some_and(|max| probes >= max) {
            log::warn!(
                "Pole search stopped after {probes} probes with {} cells left",
                queue.heap.len()
            );
            converged = false;
            break;
        }

        let h = cell.half_size / 2.0;
        for offset in [
            Vector2::new(-h, -h),
            Vector2::new(h, -h),
            Vector2::new(-h, h),
            Vector2::new(h, h),
        ] {
            queue.push(cell.center + offset, h);
        }
    }

    log::debug!(
        "Pole search finished after {probes} probes, distance {}",
        best.distance
    );

    Ok(into_pole(best.center, best.distance, probes, converged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::Ring;
    use crate::spatial_reference::SpatialReference;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn ring(coordinates: &[(f64, f64)]) -> Ring {
        coordinates.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    fn square(x_min: f64, y_min: f64, side: f64) -> Ring {
        ring(&[
            (x_min, y_min),
            (x_min + side, y_min),
            (x_min + side, y_min + side),
            (x_min, y_min + side),
            (x_min, y_min),
        ])
    }

    #[test]
    fn square_pole_is_its_center() {
        let half_side = 10.0;
        let polygon = Polygon::from_rings(vec![square(-half_side, -half_side, 2.0 * half_side)]);
        let pole = find_pole(&polygon, &PolylabelOptions::default()).unwrap();

        assert_abs_diff_eq!(pole.point, Point::new(0.0, 0.0), epsilon = 1.0);
        assert_abs_diff_eq!(pole.distance, half_side, epsilon = 1.0);
        assert!(pole.converged);
    }

    #[test]
    fn pole_avoids_holes() {
        let polygon = Polygon::from_rings(vec![square(0.0, 0.0, 10.0), square(3.0, 3.0, 4.0)]);
        let pole = find_pole(&polygon, &PolylabelOptions::default().with_precision(0.1)).unwrap();

        assert!(pole.distance > 1.4);
        assert!(signed_distance(&pole.point, &polygon) > 0.0);
        let in_hole = (3.0..=7.0).contains(&pole.point.x()) && (3.0..=7.0).contains(&pole.point.y());
        assert!(!in_hole);
    }

    #[test]
    fn small_extent_returns_lower_corner() {
        let polygon = Polygon::from_rings(vec![ring(&[
            (2.0, 1.0),
            (12.0, 1.0),
            (12.0, 1.05),
            (2.0, 1.05),
            (2.0, 1.0),
        ])])
        .with_spatial_reference(SpatialReference::WGS84);
        let pole = find_pole(&polygon, &PolylabelOptions::default()).unwrap();

        assert_eq!(
            pole.point,
            Point::new(2.0, 1.0).with_spatial_reference(SpatialReference::WGS84)
        );
        assert_eq!(pole.probes, 0);
    }

    #[test]
    fn probe_budget_stops_search() {
        let polygon = Polygon::from_rings(vec![square(-10.0, -10.0, 20.0)]);
        let options = PolylabelOptions::default().with_max_probes(3);
        let pole = find_pole(&polygon, &options).unwrap();

        assert!(!pole.converged);
        assert_eq!(pole.probes, 3);
        assert!(pole.distance > 0.0);
    }

    #[test]
    fn precision_must_be_positive() {
        let polygon = Polygon::from_rings(vec![square(0.0, 0.0, 10.0)]);
        for precision in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            let options = PolylabelOptions::default().with_precision(precision);
            assert_matches!(
                find_pole(&polygon, &options),
                Err(GeometryError::InvalidOperation(_)),
                "{precision}"
            );
        }
        assert_matches!(
            polylabel(&polygon, -1.0),
            Err(GeometryError::InvalidOperation(_))
        );
    }

    #[test]
    fn polygon_without_rings() {
        assert_matches!(
            find_pole(&Polygon::default(), &PolylabelOptions::default()),
            Err(GeometryError::EmptyGeometry)
        );
    }

    #[test]
    fn distance_sign() {
        let polygon = Polygon::from_rings(vec![square(0.0, 0.0, 4.0)]);
        assert_abs_diff_eq!(signed_distance(&Point::new(1.0, 2.0), &polygon), 1.0);
        assert_abs_diff_eq!(signed_distance(&Point::new(-3.0, 2.0), &polygon), -3.0);
        assert_abs_diff_eq!(signed_distance(&Point2::new(2.0, 7.0), &polygon), -3.0);
    }

    #[test]
    fn polylabel_shortcut() {
        let polygon = Polygon::from_rings(vec![square(0.0, 0.0, 100.0)]);
        let point = polylabel(&polygon, 0.5).unwrap();
        assert_abs_diff_eq!(point, Point::new(50.0, 50.0), epsilon = 0.5);
    }
}
