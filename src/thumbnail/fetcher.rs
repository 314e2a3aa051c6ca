use std::future::Future;

use super::error::{Result, ThumbnailError};

/// Fetches raw response bodies over HTTP, so thumbnail paging can run against a mock in tests.
pub trait HttpFetcher: Send + Sync {
    /// Performs a GET request and resolves to the full response body.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// [`HttpFetcher`] backed by an async reqwest client. When an API key is set it is sent as the
/// basic auth user name with an empty password, which is how the imagery API authenticates.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl ReqwestFetcher {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|err| {
                ThumbnailError::Network(format!("Failed to create HTTP client: {}", err))
            })?;
        Ok(Self { client, api_key })
    }
}

impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let mut request = self.client.get(url);
        if let Some(api_key) = &self.api_key {
            request = request.basic_auth(api_key, Some(""));
        }
        let response = request
            .send()
            .await
            .map_err(|err| ThumbnailError::Network(format!("Request failed: {}", err)))?;

        if !response.status().is_success() {
            return Err(ThumbnailError::Network(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|err| ThumbnailError::Network(format!("Failed to read response: {}", err)))
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpFetcher, ReqwestFetcher};
    use crate::thumbnail::ThumbnailError;

    #[tokio::test]
    async fn test_get_connection_refused() {
        // Nothing listens on the discard port on loopback.
        let fetcher = ReqwestFetcher::new(Some("api-key".to_string())).unwrap();
        let result = fetcher.get("http://127.0.0.1:9/thumb?width=2048").await;
        assert!(matches!(result, Err(ThumbnailError::Network(_))));
    }
}
