use crate::error::GeometryError;
use crate::point::Point;

/// GeoJSON point: a position of 2 to 4 ordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonPoint {
    coordinates: Vec<f64>,
}

impl GeoJsonPoint {
    /// Creates a point from its position. Fails unless the position has 2 to 4 ordinates.
    pub fn new(coordinates: Vec<f64>) -> Result<Self, GeometryError> {
        if !(2..=4).contains(&coordinates.len()) {
            return Err(GeometryError::Format(format!(
                "GeoJSON point needs 2 to 4 ordinates, got {}",
                coordinates.len()
            )));
        }

        Ok(Self { coordinates })
    }

    /// The position.
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// X (longitude).
    pub fn x(&self) -> f64 {
        self.coordinates[0]
    }

    /// Y (latitude).
    pub fn y(&self) -> f64 {
        self.coordinates[1]
    }

    /// Elevation.
    pub fn z(&self) -> Option<f64> {
        self.coordinates.get(2).copied()
    }

    /// Measure.
    pub fn m(&self) -> Option<f64> {
        self.coordinates.get(3).copied()
    }

    /// Sets or removes the elevation. Removing it also removes the measure.
    pub fn set_z(&mut self, z: Option<f64>) {
        match z {
            Some(z) => {
                if self.coordinates.len() < 3 {
                    self.coordinates.resize(3, 0.0);
                }
                self.coordinates[2] = z;
            }
            None => self.coordinates.truncate(2),
        }
    }

    /// Sets or removes the measure. A measure can only be set on a point with elevation.
    pub fn set_m(&mut self, m: Option<f64>) -> Result<(), GeometryError> {
        match m {
            Some(m) => {
                if self.coordinates.len() < 3 {
                    return Err(GeometryError::InvalidOperation(
                        "measure requires elevation on a GeoJSON point".into(),
                    ));
                }
                self.coordinates.resize(4, 0.0);
                self.coordinates[3] = m;
            }
            None => self.coordinates.truncate(3),
        }

        Ok(())
    }

    /// Converts to an ArcGIS point without spatial reference.
    pub fn to_spatial(&self) -> Point {
        match *self.coordinates.as_slice() {
            [x, y, z, m] => Point::new_zm(x, y, z, m),
            [x, y, z] => Point::new_z(x, y, z),
            _ => Point::new(self.x(), self.y()),
        }
    }
}

impl From<&Point> for GeoJsonPoint {
    fn from(point: &Point) -> Self {
        Self {
            coordinates: point.to_coordinates(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn ordinate_count_is_validated() {
        assert!(GeoJsonPoint::new(vec![1.0, 2.0]).is_ok());
        assert!(GeoJsonPoint::new(vec![1.0, 2.0, 3.0, 4.0]).is_ok());
        assert_matches!(GeoJsonPoint::new(vec![1.0]), Err(GeometryError::Format(_)));
        assert_matches!(
            GeoJsonPoint::new(vec![1.0; 5]),
            Err(GeometryError::Format(_))
        );
    }

    #[test]
    fn resizing_ordinates() {
        let mut point = GeoJsonPoint::new(vec![2.2, 1.1]).unwrap();
        assert_eq!(point.z(), None);

        point.set_z(Some(3.3));
        point.set_m(Some(4.4)).unwrap();
        assert_eq!(point.coordinates(), &[2.2, 1.1, 3.3, 4.4]);

        point.set_m(None).unwrap();
        assert_eq!(point.coordinates(), &[2.2, 1.1, 3.3]);

        point.set_z(None);
        assert_eq!(point.coordinates(), &[2.2, 1.1]);
        assert_matches!(
            point.set_m(Some(1.0)),
            Err(GeometryError::InvalidOperation(_))
        );
    }

    #[test]
    fn to_spatial() {
        let point = GeoJsonPoint::new(vec![2.2, 1.1, 3.3]).unwrap();
        assert_eq!(point.to_spatial(), Point::new_z(2.2, 1.1, 3.3));
        assert_eq!(GeoJsonPoint::from(&Point::new(1.0, 2.0)).coordinates(), &[1.0, 2.0]);
    }
}
