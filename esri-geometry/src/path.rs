//! Vertex sequences that make up polylines and polygons.

use crate::extent::{extent_of_points, Extent};
use crate::geometry_type::GeometryType;
use crate::point::Point;
use crate::segment::Segment;

macro_rules! point_sequence {
    ($(#[$meta:meta])* $name:ident, $geometry_type:expr, closed = $closed:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            points: Vec<Point>,
        }

        impl $name {
            /// Creates a new sequence from its vertices.
            pub fn new(points: Vec<Point>) -> Self {
                Self { points }
            }

            /// Vertices.
            pub fn points(&self) -> &[Point] {
                &self.points
            }

            /// Consumes the sequence and returns its vertices.
            pub fn into_points(self) -> Vec<Point> {
                self.points
            }

            /// Number of vertices.
            pub fn len(&self) -> usize {
                self.points.len()
            }

            /// True if there are no vertices.
            pub fn is_empty(&self) -> bool {
                self.points.is_empty()
            }

            /// Type tag.
            pub fn geometry_type(&self) -> GeometryType {
                $geometry_type
            }

            /// Bounding box of the vertices.
            pub fn extent(&self) -> Extent {
                extent_of_points(&self.points)
            }

            /// Edges of the sequence.
            pub fn iter_segments(&self) -> impl Iterator<Item = Segment<'_, Point>> {
                let closing = if $closed {
                    self.points.last().zip(self.points.first())
                } else {
                    None
                };

                closing
                    .into_iter()
                    .chain(self.points.windows(2).map(|w| (&w[0], &w[1])))
                    .map(|(a, b)| Segment(a, b))
            }

            /// Vertex coordinate arrays.
            pub fn to_coordinates(&self) -> Vec<Vec<f64>> {
                self.points.iter().map(Point::to_coordinates).collect()
            }
        }

        impl From<Vec<Point>> for $name {
            fn from(points: Vec<Point>) -> Self {
                Self::new(points)
            }
        }

        impl FromIterator<Point> for $name {
            fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
                Self::new(iter.into_iter().collect())
            }
        }
    };
}

point_sequence!(
    /// Open vertex sequence, one part of a polyline.
    Path,
    GeometryType::Path,
    closed = false
);

point_sequence!(
    /// Closed vertex sequence, one part of a polygon.
    ///
    /// The edge from the last vertex back to the first one is implied, so a ring that repeats its
    /// first vertex at the end just gets a zero-length closing edge.
    Ring,
    GeometryType::Ring,
    closed = true
);

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        ]
    }

    #[test]
    fn path_is_open() {
        let path = Path::new(triangle());
        assert_eq!(path.iter_segments().count(), 2);
        assert_eq!(path.geometry_type(), GeometryType::Path);
    }

    #[test]
    fn ring_is_closed() {
        let ring = Ring::new(triangle());
        let segments: Vec<_> = ring.iter_segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment(&Point::new(0.0, 3.0), &Point::new(0.0, 0.0)));
    }

    #[test]
    fn single_vertex_ring() {
        let ring: Ring = vec![Point::new(1.0, 1.0)].into();
        assert_eq!(ring.iter_segments().count(), 1);
        assert!(Ring::default().iter_segments().next().is_none());
    }

    #[test]
    fn extent_and_coordinates() {
        let path: Path = triangle().into_iter().collect();
        assert_eq!(path.extent(), Extent::new(0.0, 0.0, 4.0, 3.0));
        assert_eq!(path.to_coordinates()[2], vec![0.0, 3.0]);
    }
}
