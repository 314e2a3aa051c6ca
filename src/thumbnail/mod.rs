pub mod error;
pub mod fetcher;
pub mod pager;
pub mod renderer;
pub mod results;

pub use error::ThumbnailError;
pub use fetcher::{HttpFetcher, ReqwestFetcher};
pub use pager::ThumbnailPager;
pub use renderer::{ImageRenderer, PngFileRenderer};
pub use results::{SearchResultRow, SearchResultTable};
