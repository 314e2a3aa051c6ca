pub mod feature;
#[cfg(feature = "gdal")]
pub mod gdal_geofile;
pub mod geojson;

use std::path::Path;

use anyhow::anyhow;

use self::feature::FeatureCollection;

/// Read all features of a vector file. GeoJSON is parsed directly, every other format goes
/// through GDAL.
pub fn read_features_from_geofile(filepath: &Path) -> anyhow::Result<FeatureCollection> {
    if !filepath.exists() {
        return Err(anyhow!("File {:?} does not exist", filepath));
    }
    if self::geojson::is_geojson_path(filepath) {
        return self::geojson::read_features_from_geojson(filepath);
    }
    read_features_with_gdal(filepath)
}

#[cfg(feature = "gdal")]
fn read_features_with_gdal(filepath: &Path) -> anyhow::Result<FeatureCollection> {
    gdal_geofile::read_features_from_geofile(filepath)
}

#[cfg(not(feature = "gdal"))]
fn read_features_with_gdal(filepath: &Path) -> anyhow::Result<FeatureCollection> {
    Err(anyhow!(
        "Cannot read {:?}, only GeoJSON is supported without the gdal feature",
        filepath
    ))
}
