use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("The search result table has no rows")]
    EmptyResultTable,

    #[error("Invalid thumbnail URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Could not decode thumbnail: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Could not render thumbnail: {0}")]
    Render(String),

    #[error("Invalid search results: {0}")]
    ResultTable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ThumbnailError>;
