use anyhow::{anyhow, Context};
use gdal::vector::{FieldValue, LayerAccess};
use std::path::Path;

use crate::crs::crs_utils::spatial_ref_to_epsg;

use super::feature::{Feature, FeatureCollection};

fn field_value_to_json(value: Option<FieldValue>) -> serde_json::Value {
    match value {
        None => serde_json::Value::Null,
        Some(FieldValue::IntegerValue(value)) => value.into(),
        Some(FieldValue::Integer64Value(value)) => value.into(),
        Some(FieldValue::RealValue(value)) => value.into(),
        Some(FieldValue::StringValue(value)) => value.into(),
        // Lists and dates are passed on as their GDAL string representation.
        Some(other) => other
            .into_string()
            .map(serde_json::Value::from)
            .unwrap_or(serde_json::Value::Null),
    }
}

pub fn read_features_from_geofile(filepath: &Path) -> anyhow::Result<FeatureCollection> {
    gdal::DriverManager::register_all();
    let mut open_options = gdal::DatasetOptions::default();
    open_options.open_flags = gdal::GdalOpenFlags::GDAL_OF_VECTOR;
    let dataset = gdal::Dataset::open_ex(filepath, open_options)
        .with_context(|| format!("Opening {:?} with GDAL", filepath))?;

    let layer_count = dataset.layer_count();
    if 0 == layer_count || 1 < layer_count {
        return Err(anyhow!(
            "Found {} layers, only one layer is supported.",
            layer_count
        ));
    }
    let mut layer = dataset.layer(0)?;
    let mut spatial_ref = layer
        .spatial_ref()
        .map_err(|err| anyhow!("Layer of {:?} has no CRS, {}", filepath, err))?;
    let epsg = spatial_ref_to_epsg(&mut spatial_ref)
        .with_context(|| format!("Determining EPSG code of {:?}", filepath))?;
    log::debug!("Reading {:?} in EPSG:{}", filepath, epsg);

    let mut features = Vec::new();
    let mut num_without_geometry = 0;
    for (index, gdal_feature) in layer.features().enumerate() {
        // An empty geometry is still a geometry, only a missing one is reported as null.
        let has_geometry =
            unsafe { !gdal_sys::OGR_F_GetGeometryRef(gdal_feature.c_feature()).is_null() };
        let geometry = if has_geometry {
            Some(
                gdal_feature
                    .geometry()
                    .to_geo()
                    .with_context(|| format!("Converting geometry of feature {}", index))?,
            )
        } else {
            num_without_geometry += 1;
            None
        };
        let properties: geojson::JsonObject = gdal_feature
            .fields()
            .map(|(name, value)| (name, field_value_to_json(value)))
            .collect();
        features.push(Feature {
            geometry,
            properties,
        });
    }
    if num_without_geometry > 0 {
        log::warn!(
            "{} out of {} features read have no geometry.",
            num_without_geometry,
            features.len()
        )
    }
    Ok(FeatureCollection::new(features, epsg))
}
