use anyhow::anyhow;

use crate::geofile::feature::FeatureCollection;

use super::crs_utils::{EpsgCode, EPSG_4326};

/// Reproject all features into the CRS indicated by `to_epsg`. Nothing happens if the features
/// are already in that CRS, so calling this repeatedly is safe.
#[cfg(feature = "proj")]
pub fn project_features(
    collection: &mut FeatureCollection,
    to_epsg: EpsgCode,
) -> anyhow::Result<()> {
    use indicatif::ProgressBar;
    use proj::Transform;

    use super::crs_utils::epsg_code_to_authority_string;

    if collection.epsg == to_epsg {
        log::debug!("Features already in EPSG:{}, not reprojecting", to_epsg);
        return Ok(());
    }
    log::info!(
        "Projecting {} features from EPSG:{} to EPSG:{}",
        collection.features.len(),
        collection.epsg,
        to_epsg
    );
    // new_known_crs normalizes the axis order to lon/lat for geographic systems.
    let projection = proj::Proj::new_known_crs(
        &epsg_code_to_authority_string(collection.epsg),
        &epsg_code_to_authority_string(to_epsg),
        None,
    )?;

    let bar = ProgressBar::new(collection.features.len() as u64);
    for feature in collection.features.iter_mut() {
        if let Some(geometry) = feature.geometry.as_mut() {
            geometry
                .transform(&projection)
                .map_err(|err| anyhow!("Could not project geometry, {}", err))?;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    collection.epsg = to_epsg;
    Ok(())
}

#[cfg(not(feature = "proj"))]
pub fn project_features(
    collection: &mut FeatureCollection,
    to_epsg: EpsgCode,
) -> anyhow::Result<()> {
    if collection.epsg == to_epsg {
        return Ok(());
    }
    Err(anyhow!(
        "Cannot project from EPSG:{} to EPSG:{} without the proj feature",
        collection.epsg,
        to_epsg
    ))
}

pub fn project_features_to_wgs84(collection: &mut FeatureCollection) -> anyhow::Result<()> {
    project_features(collection, EPSG_4326)
}
