use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchFeaturesError {
    #[error("Could not read features from {path:?}: {reason}")]
    FileFormat { path: PathBuf, reason: String },

    #[error("The geometry type must be 'Polygon', got '{0}'.")]
    InvalidGeometryType(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Reprojection failed: {0}")]
    Reprojection(String),
}

pub type Result<T> = std::result::Result<T, SearchFeaturesError>;
