use std::{fs, io, path::Path, str::FromStr};

use anyhow::{anyhow, Context};

use crate::crs::crs_utils::{parse_crs_name, EPSG_4326};

use super::feature::{Feature, FeatureCollection};

pub fn is_geojson_path(filepath: &Path) -> bool {
    filepath
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| {
            extension.eq_ignore_ascii_case("geojson") || extension.eq_ignore_ascii_case("json")
        })
        .unwrap_or(false)
}

/// Read a GeoJSON file. Without a legacy `crs` member the coordinates are taken to be WGS 84,
/// as RFC 7946 requires.
pub fn read_features_from_geojson(filepath: &Path) -> anyhow::Result<FeatureCollection> {
    let contents = fs::read_to_string(filepath)?;
    let geojson = geojson::GeoJson::from_str(&contents)
        .with_context(|| format!("Parsing GeoJSON from {:?}", filepath))?;

    let (features, foreign_members) = match geojson {
        geojson::GeoJson::FeatureCollection(collection) => {
            (collection.features, collection.foreign_members)
        }
        geojson::GeoJson::Feature(feature) => (vec![feature], None),
        geojson::GeoJson::Geometry(geometry) => (vec![geojson::Feature::from(geometry)], None),
    };

    let epsg = match foreign_members.as_ref().and_then(|members| members.get("crs")) {
        Some(crs) => {
            let name = crs
                .pointer("/properties/name")
                .and_then(|name| name.as_str())
                .ok_or_else(|| anyhow!("The crs member of {:?} has no name", filepath))?;
            parse_crs_name(name).ok_or_else(|| anyhow!("Unsupported CRS name '{}'", name))?
        }
        None => EPSG_4326,
    };

    let num_features = features.len();
    let mut result = Vec::with_capacity(num_features);
    let mut num_without_geometry = 0;
    for (index, feature) in features.into_iter().enumerate() {
        let geometry = match feature.geometry {
            Some(geometry) => Some(
                geo::Geometry::<f64>::try_from(geometry.value)
                    .with_context(|| format!("Converting geometry of feature {}", index))?,
            ),
            None => {
                num_without_geometry += 1;
                None
            }
        };
        result.push(Feature {
            geometry,
            properties: feature.properties.unwrap_or_default(),
        });
    }
    if num_without_geometry > 0 {
        log::warn!(
            "{} out of {} features read have no geometry.",
            num_without_geometry,
            num_features
        )
    }
    Ok(FeatureCollection::new(result, epsg))
}

/// Build the GeoJSON representation of features. Features get their row index as id, features
/// without a geometry are written with a null geometry.
pub fn features_to_geojson(features: &[Feature]) -> geojson::FeatureCollection {
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| geojson::Feature {
            bbox: None,
            geometry: feature
                .geometry
                .as_ref()
                .map(|geometry| geojson::Geometry::new(geojson::Value::from(geometry))),
            id: Some(geojson::feature::Id::String(index.to_string())),
            properties: Some(feature.properties.clone()),
            foreign_members: None,
        })
        .collect()
}

pub fn write_geojson_to_file(
    feature_collection: &geojson::FeatureCollection,
    output_filepath: &Path,
) -> io::Result<()> {
    let geojson_contents = geojson::GeoJson::from(feature_collection.clone());
    fs::write(output_filepath, geojson_contents.to_string())
}
