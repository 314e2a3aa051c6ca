use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    crs::{crs_utils::EPSG_4326, reprojection::project_features_to_wgs84},
    geofile::{self, feature::FeatureCollection, geojson::features_to_geojson},
};

use super::{
    bounding_box::{geometry_to_bbox_polygon, WgsBoundingBox},
    error::{Result, SearchFeaturesError},
};

/// Prepares features for an imagery search and order API: reprojects them to WGS 84, optionally
/// reduces them to bounding boxes and serializes them to GeoJSON.
///
/// The usual entry point is [`FeatureSearchPreparer::process`], the individual steps can be
/// called on their own as well.
pub struct FeatureSearchPreparer {
    features_filepath: Option<PathBuf>,
    bounding_box: bool,
    collection: FeatureCollection,
    json_data: Option<geojson::FeatureCollection>,
}

/// JSON equality, except that numbers compare by value so that `7` matches `7.0`.
fn property_matches(property: &serde_json::Value, value: &serde_json::Value) -> bool {
    match (property.as_f64(), value.as_f64()) {
        (Some(property), Some(value)) => property == value,
        _ => property == value,
    }
}

fn geojson_type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

impl FeatureSearchPreparer {
    /// Read the features of a vector file. Fails with `FileFormat` if the file does not exist,
    /// cannot be parsed or has no CRS.
    pub fn load(features_filepath: &Path, bounding_box: bool) -> Result<Self> {
        log::info!("Reading features from {:?}", features_filepath);
        let collection = geofile::read_features_from_geofile(features_filepath).map_err(|err| {
            SearchFeaturesError::FileFormat {
                path: features_filepath.to_path_buf(),
                reason: format!("{:#}", err),
            }
        })?;
        log::info!(
            "Read {} features in EPSG:{}",
            collection.features.len(),
            collection.epsg
        );
        Ok(Self {
            features_filepath: Some(features_filepath.to_path_buf()),
            ..Self::from_features(collection, bounding_box)
        })
    }

    pub fn from_features(collection: FeatureCollection, bounding_box: bool) -> Self {
        Self {
            features_filepath: None,
            bounding_box,
            collection,
            json_data: None,
        }
    }

    pub fn features_filepath(&self) -> Option<&Path> {
        self.features_filepath.as_deref()
    }

    pub fn features(&self) -> &FeatureCollection {
        &self.collection
    }

    /// The GeoJSON document produced by the last call to `serialize`.
    pub fn json_data(&self) -> Option<&geojson::FeatureCollection> {
        self.json_data.as_ref()
    }

    pub fn reproject_to_geographic(&mut self) -> Result<()> {
        project_features_to_wgs84(&mut self.collection)
            .map_err(|err| SearchFeaturesError::Reprojection(format!("{:#}", err)))?;
        debug_assert_eq!(self.collection.epsg, EPSG_4326);
        Ok(())
    }

    /// Replace every geometry by its bounding rectangle if bounding boxes were requested.
    pub fn simplify_to_bounding_boxes(&mut self) {
        if !self.bounding_box {
            return;
        }
        let num_empty = self
            .collection
            .features
            .par_iter_mut()
            .filter_map(|feature| {
                let bbox = feature.geometry.as_ref().and_then(geometry_to_bbox_polygon);
                match bbox {
                    Some(bbox) => {
                        feature.geometry = Some(bbox);
                        None
                    }
                    None => Some(()),
                }
            })
            .count();
        if num_empty > 0 {
            log::warn!(
                "{} features have a null or empty geometry and were left unchanged.",
                num_empty
            );
        }
    }

    pub fn serialize(&mut self) -> &geojson::FeatureCollection {
        if self.collection.epsg != EPSG_4326 {
            log::warn!(
                "Serializing features in EPSG:{}, the GeoJSON will not be in WGS 84",
                self.collection.epsg
            );
        }
        self.json_data
            .insert(features_to_geojson(&self.collection.features))
    }

    /// First feature of the serialized document whose property `column` equals `value`.
    pub fn filter_by_property(
        &self,
        column: &str,
        value: &serde_json::Value,
    ) -> Option<&geojson::Feature> {
        self.json_data.as_ref()?.features.iter().find(|feature| {
            feature
                .properties
                .as_ref()
                .and_then(|properties| properties.get(column))
                .is_some_and(|property| property_matches(property, value))
        })
    }

    /// Bounding box string `lon_min, lat_min, lon_max, lat_max` of a polygon feature.
    pub fn feature_to_bbox_string(feature: &geojson::Feature) -> Result<String> {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| SearchFeaturesError::InvalidGeometryType("null".to_string()))?;
        match &geometry.value {
            geojson::Value::Polygon(polygon) => {
                Ok(WgsBoundingBox::from_polygon(polygon)?.to_string())
            }
            other => Err(SearchFeaturesError::InvalidGeometryType(
                geojson_type_name(other).to_string(),
            )),
        }
    }

    pub fn process(&mut self) -> Result<&geojson::FeatureCollection> {
        self.reproject_to_geographic()?;
        self.simplify_to_bounding_boxes();
        Ok(self.serialize())
    }
}
