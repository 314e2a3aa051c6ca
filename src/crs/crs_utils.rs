pub type EpsgCode = u32;

/// WGS 84 geographic longitude/latitude.
pub const EPSG_4326: EpsgCode = 4326;

pub fn epsg_code_to_authority_string(code: EpsgCode) -> String {
    format!("EPSG:{}", code)
}

/// Parse the CRS names found in the legacy GeoJSON `crs` member.
///
/// Supported forms are `EPSG:<code>`, `urn:ogc:def:crs:EPSG::<code>` (and the versioned
/// `urn:ogc:def:crs:EPSG:<version>:<code>`) and the OGC CRS84 URN, which is lon/lat WGS 84.
pub fn parse_crs_name(name: &str) -> Option<EpsgCode> {
    let name = name.trim();
    if name.eq_ignore_ascii_case("urn:ogc:def:crs:OGC:1.3:CRS84")
        || name.eq_ignore_ascii_case("urn:ogc:def:crs:OGC::CRS84")
        || name.eq_ignore_ascii_case("CRS84")
    {
        return Some(EPSG_4326);
    }
    let upper = name.to_ascii_uppercase();
    if let Some(code) = upper.strip_prefix("EPSG:") {
        return code.parse().ok();
    }
    if let Some(rest) = upper.strip_prefix("URN:OGC:DEF:CRS:EPSG:") {
        // Whatever sits between the authority and the code is a (possibly empty) version.
        return rest.rsplit(':').next().and_then(|code| code.parse().ok());
    }
    None
}

#[cfg(feature = "gdal")]
pub fn spatial_ref_to_epsg(
    spatial_ref: &mut gdal::spatial_ref::SpatialRef,
) -> anyhow::Result<EpsgCode> {
    use anyhow::anyhow;

    // Shapefile .prj files usually carry no authority, let GDAL match them against its database.
    if spatial_ref.auth_code().is_err() {
        spatial_ref.auto_identify_epsg()?;
    }
    let code = spatial_ref.auth_code()?;
    EpsgCode::try_from(code).map_err(|_| anyhow!("Invalid EPSG code {}", code))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{epsg_code_to_authority_string, parse_crs_name, EpsgCode};

    #[rstest]
    #[case("EPSG:3857", Some(3857))]
    #[case("epsg:32633", Some(32633))]
    #[case("urn:ogc:def:crs:EPSG::2154", Some(2154))]
    #[case("urn:ogc:def:crs:EPSG:6.6:4326", Some(4326))]
    #[case("urn:ogc:def:crs:OGC:1.3:CRS84", Some(4326))]
    #[case("urn:ogc:def:crs:EPSG::", None)]
    #[case("WGS 84", None)]
    fn test_parse_crs_name(#[case] name: &str, #[case] expected: Option<EpsgCode>) {
        assert_eq!(parse_crs_name(name), expected);
    }

    #[test]
    fn test_epsg_code_to_authority_string() {
        assert_eq!(epsg_code_to_authority_string(32654), "EPSG:32654");
    }
}
