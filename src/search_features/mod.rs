pub mod bounding_box;
pub mod error;
pub mod preparer;

pub use error::SearchFeaturesError;
pub use preparer::FeatureSearchPreparer;
