use crate::crs::crs_utils::EpsgCode;

/// A single row of a feature layer. Rows without a geometry are kept so that row indices stay
/// stable.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Option<geo::Geometry>,
    pub properties: geojson::JsonObject,
}

impl From<geo::Geometry> for Feature {
    fn from(value: geo::Geometry) -> Self {
        Self {
            geometry: Some(value),
            properties: geojson::JsonObject::new(),
        }
    }
}

/// Features read from a single layer, together with the CRS their coordinates are expressed in.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub epsg: EpsgCode,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>, epsg: EpsgCode) -> Self {
        Self { features, epsg }
    }
}
