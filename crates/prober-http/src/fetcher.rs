use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;

/// Downloads the content at a URL.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
  /// Fetch `url` and return the response body as text.
  async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// [`ContentFetcher`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
  client: Client,
}

impl HttpFetcher {
  pub fn new(client: Client) -> Self {
    Self { client }
  }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
  async fn fetch(&self, url: &str) -> Result<String, FetchError> {
    let request_error = |e: reqwest::Error| FetchError::Request {
      url: url.to_string(),
      message: e.to_string(),
    };

    let response = self.client.get(url).send().await.map_err(request_error)?;

    let status = response.status();
    debug!(url = %url, status = status.as_u16(), "fetched content");
    if !status.is_success() {
      return Err(FetchError::Status {
        url: url.to_string(),
        status: status.as_u16(),
      });
    }

    response.text().await.map_err(request_error)
  }
}
