use super::{convert_positions, Position};
use crate::error::GeometryError;
use crate::path::Ring;
use crate::polygon::Polygon;

/// GeoJSON polygon: the exterior ring followed by holes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoJsonPolygon {
    /// Rings.
    pub coordinates: Vec<Vec<Position>>,
}

impl GeoJsonPolygon {
    /// Converts to a polygon with the same rings.
    pub fn to_spatial(&self) -> Result<Polygon, GeometryError> {
        let rings = self
            .coordinates
            .iter()
            .map(|ring| convert_positions(ring).map(Ring::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polygon::from_rings(rings))
    }
}

/// GeoJSON multi polygon.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoJsonMultiPolygon {
    /// Member polygons.
    pub coordinates: Vec<Vec<Vec<Position>>>,
}

impl GeoJsonMultiPolygon {
    /// Converts the first member polygon. Other members are dropped with a warning; use
    /// [`GeoJsonMultiPolygon::to_polygons`] to keep them. An empty multi polygon gives an empty polygon.
    pub fn to_spatial(&self) -> Result<Polygon, GeometryError> {
        if self.coordinates.len() > 1 {
            log::warn!(
                "Multi polygon with {} members converted to a single polygon, only the first one is kept",
                self.coordinates.len()
            );
        }

        match self.coordinates.first() {
            Some(first) => GeoJsonPolygon {
                coordinates: first.clone(),
            }
            .to_spatial(),
            None => Ok(Polygon::default()),
        }
    }

    /// Converts every member polygon.
    pub fn to_polygons(&self) -> Result<Vec<Polygon>, GeometryError> {
        self.coordinates
            .iter()
            .map(|rings| {
                GeoJsonPolygon {
                    coordinates: rings.clone(),
                }
                .to_spatial()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(offset: f64) -> Vec<Vec<f64>> {
        vec![
            vec![offset, offset],
            vec![offset + 1.0, offset],
            vec![offset + 1.0, offset + 1.0],
            vec![offset, offset + 1.0],
            vec![offset, offset],
        ]
    }

    #[test]
    fn polygon_keeps_holes() {
        let polygon = GeoJsonPolygon {
            coordinates: vec![square(0.0), square(0.25)],
        };
        let converted = polygon.to_spatial().unwrap();
        assert_eq!(converted.rings().len(), 2);
        assert_eq!(converted.rings()[0].len(), 5);
    }

    #[test]
    fn multi_polygon_keeps_first_member() {
        let multi = GeoJsonMultiPolygon {
            coordinates: vec![vec![square(0.0)], vec![square(10.0)]],
        };
        let polygon = multi.to_spatial().unwrap();
        assert_eq!(polygon.rings().len(), 1);
        assert_eq!(polygon.extent().x_max(), 1.0);

        assert_eq!(multi.to_polygons().unwrap().len(), 2);
    }

    #[test]
    fn single_member_multi_polygon() {
        let multi = GeoJsonMultiPolygon {
            coordinates: vec![vec![square(5.0)]],
        };
        assert_eq!(multi.to_spatial().unwrap().extent().x_min(), 5.0);
        assert!(GeoJsonMultiPolygon::default().to_spatial().unwrap().rings().is_empty());
    }
}
