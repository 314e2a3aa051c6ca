use url::Url;

use super::{
    error::{Result, ThumbnailError},
    fetcher::HttpFetcher,
    renderer::{decode_thumbnail, ImageRenderer},
    results::{SearchResultRow, SearchResultTable},
};

/// Width in pixels requested from the thumbnail endpoint.
pub const THUMBNAIL_WIDTH: u32 = 2048;

/// Append the display width to a thumbnail link, keeping any query it already has.
pub fn thumbnail_request_url(thumbnail_link: &str) -> Result<Url> {
    let mut url = Url::parse(thumbnail_link).map_err(|source| ThumbnailError::InvalidUrl {
        url: thumbnail_link.to_string(),
        source,
    })?;
    url.query_pairs_mut()
        .append_pair("width", &THUMBNAIL_WIDTH.to_string());
    Ok(url)
}

/// Steps through a search result table, showing one thumbnail per call to
/// [`ThumbnailPager::advance_and_show`] and wrapping around after the last row.
///
/// The cursor only moves once a thumbnail was fetched and rendered, a failed row is retried on
/// the next call.
pub struct ThumbnailPager<F: HttpFetcher, R: ImageRenderer> {
    table: SearchResultTable,
    fetcher: F,
    renderer: R,
    current_row: usize,
    max_row: usize,
    current_link: Option<String>,
    current_title: Option<String>,
}

impl<F: HttpFetcher, R: ImageRenderer> ThumbnailPager<F, R> {
    pub fn new(table: SearchResultTable, fetcher: F, renderer: R) -> Result<Self> {
        if table.is_empty() {
            return Err(ThumbnailError::EmptyResultTable);
        }
        let max_row = table.len() - 1;
        Ok(Self {
            table,
            fetcher,
            renderer,
            current_row: 0,
            max_row,
            current_link: None,
            current_title: None,
        })
    }

    pub fn current_row(&self) -> usize {
        self.current_row
    }

    pub fn max_row(&self) -> usize {
        self.max_row
    }

    pub fn current_link(&self) -> Option<&str> {
        self.current_link.as_deref()
    }

    pub fn current_title(&self) -> Option<&str> {
        self.current_title.as_deref()
    }

    #[cfg(test)]
    fn renderer(&self) -> &R {
        &self.renderer
    }

    fn current_result(&self) -> Result<&SearchResultRow> {
        self.table.row(self.current_row).ok_or_else(|| {
            ThumbnailError::ResultTable(format!(
                "Row {} is outside of the {} search results",
                self.current_row,
                self.table.len()
            ))
        })
    }

    pub fn update_link(&mut self) -> Result<&str> {
        let link = self.current_result()?.thumbnail_link.clone();
        Ok(self.current_link.insert(link))
    }

    pub fn update_title(&mut self) -> Result<&str> {
        let title = self.current_result()?.id.clone();
        Ok(self.current_title.insert(title))
    }

    pub async fn fetch_thumbnail(&self, thumbnail_link: &str) -> Result<Vec<u8>> {
        let url = thumbnail_request_url(thumbnail_link)?;
        log::debug!("Fetching thumbnail {}", url);
        self.fetcher.get(url.as_str()).await
    }

    pub fn render_thumbnail(&mut self, image_data: &[u8]) -> Result<()> {
        let image = decode_thumbnail(image_data)?;
        let title = format!("Image ID: {}", self.current_title.as_deref().unwrap_or_default());
        self.renderer.render(&image, &title)
    }

    /// Show the thumbnail of the current row, then move on to the next row.
    pub async fn advance_and_show(&mut self) -> Result<()> {
        log::info!(
            "plotting thumbnail {} of {}..",
            self.current_row + 1,
            self.max_row + 1
        );
        let link = self.update_link()?.to_string();
        let title = self.update_title()?.to_string();
        log::info!("{}", title);

        let image_data = self.fetch_thumbnail(&link).await?;
        self.render_thumbnail(&image_data)?;

        if self.current_row < self.max_row {
            self.current_row += 1;
        } else {
            self.current_row = 0;
        }
        Ok(())
    }
}
