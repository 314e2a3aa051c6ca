use std::fmt;

use geo::BoundingRect;
use serde::Deserialize;

use super::error::{Result, SearchFeaturesError};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WgsBoundingBox {
    pub left_lon: f64,
    pub right_lon: f64,
    pub bottom_lat: f64,
    pub top_lat: f64,
}

impl WgsBoundingBox {
    /// Bounding box of a GeoJSON polygon. Only the outer ring is considered since holes always lie
    /// within it.
    pub fn from_polygon(polygon: &geojson::PolygonType) -> Result<Self> {
        let outer_ring = polygon
            .first()
            .filter(|ring| !ring.is_empty())
            .ok_or_else(|| {
                SearchFeaturesError::InvalidGeometry("Polygon has no coordinates".into())
            })?;

        let mut bbox = WgsBoundingBox {
            left_lon: f64::INFINITY,
            right_lon: f64::NEG_INFINITY,
            bottom_lat: f64::INFINITY,
            top_lat: f64::NEG_INFINITY,
        };
        for position in outer_ring {
            let (lon, lat) = match position.as_slice() {
                [lon, lat, ..] => (*lon, *lat),
                _ => {
                    return Err(SearchFeaturesError::InvalidGeometry(format!(
                        "Position {:?} has less than two coordinates",
                        position
                    )))
                }
            };
            bbox.left_lon = bbox.left_lon.min(lon);
            bbox.right_lon = bbox.right_lon.max(lon);
            bbox.bottom_lat = bbox.bottom_lat.min(lat);
            bbox.top_lat = bbox.top_lat.max(lat);
        }
        Ok(bbox)
    }
}

/// Formats as `lon_min, lat_min, lon_max, lat_max`, the order imagery search APIs expect.
impl fmt::Display for WgsBoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.left_lon, self.bottom_lat, self.right_lon, self.top_lat
        )
    }
}

/// Replace a geometry by the axis-aligned rectangle spanning its extent. Returns `None` for empty
/// geometries, which have no extent.
pub fn geometry_to_bbox_polygon(geometry: &geo::Geometry) -> Option<geo::Geometry> {
    geometry
        .bounding_rect()
        .map(|rect| geo::Geometry::Polygon(rect.to_polygon()))
}

#[cfg(test)]
mod tests {
    use geo::BoundingRect;
    use rstest::rstest;

    use super::{geometry_to_bbox_polygon, WgsBoundingBox};
    use crate::search_features::SearchFeaturesError;

    #[rstest]
    #[case(geo::Geometry::Point(geo::Point::new(5.0, 7.0)))]
    #[case(geo::Geometry::LineString(vec![(0.0, 0.0), (4.0, -1.0), (2.0, 3.5)].into()))]
    #[case(geo::Geometry::Polygon(geo::Polygon::new(
        vec![(0.0, 0.0), (1.0, 2.0), (3.0, 1.0), (0.0, 0.0)].into(),
        vec![],
    )))]
    #[case(geo::Geometry::MultiPoint(vec![(-10.0, 20.0), (30.0, -40.0)].into()))]
    fn test_geometry_to_bbox_polygon_preserves_bounds(#[case] geometry: geo::Geometry) {
        let bbox = geometry_to_bbox_polygon(&geometry).unwrap();
        assert_eq!(bbox.bounding_rect(), geometry.bounding_rect());
        match bbox {
            geo::Geometry::Polygon(polygon) => {
                assert_eq!(polygon.exterior().0.len(), 5);
                assert!(polygon.exterior().is_closed());
                assert!(polygon.interiors().is_empty());
            }
            other => panic!("Expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_geometry_to_bbox_polygon_empty_geometry() {
        let empty = geo::Geometry::MultiPoint(geo::MultiPoint::<f64>(vec![]));
        assert_eq!(geometry_to_bbox_polygon(&empty), None);
    }

    #[test]
    fn test_bbox_from_polygon_ignores_holes() {
        let polygon = vec![
            vec![
                vec![0.0, 0.0],
                vec![0.0, 2.0],
                vec![3.0, 2.0],
                vec![3.0, 0.0],
                vec![0.0, 0.0],
            ],
            vec![vec![1.0, 1.0], vec![1.0, 1.5], vec![2.0, 1.0], vec![1.0, 1.0]],
        ];
        let bbox = WgsBoundingBox::from_polygon(&polygon).unwrap();
        assert_eq!(bbox.to_string(), "0, 0, 3, 2");
    }

    #[test]
    fn test_bbox_display_keeps_fractional_digits() {
        let bbox = WgsBoundingBox {
            left_lon: -122.5,
            right_lon: -122.25,
            bottom_lat: 37.125,
            top_lat: 37.75,
        };
        assert_eq!(bbox.to_string(), "-122.5, 37.125, -122.25, 37.75");
    }

    #[test]
    fn test_bbox_from_empty_polygon() {
        let polygon: geojson::PolygonType = vec![vec![]];
        assert!(matches!(
            WgsBoundingBox::from_polygon(&polygon),
            Err(SearchFeaturesError::InvalidGeometry(_))
        ));
    }
}
