use async_trait::async_trait;
use prober_service::ServiceInfo;
use reqwest::Client;
use tracing::debug;

use crate::description::parse_description;
use crate::error::ResolveError;
use crate::resolver::MetadataResolver;

/// Resolves metadata by fetching a JSON description document from the
/// endpoint URL itself.
#[derive(Debug, Clone)]
pub struct HttpMetadataResolver {
  client: Client,
}

impl HttpMetadataResolver {
  /// Create a resolver that issues requests through `client`.
  ///
  /// Timeouts and the user agent are taken from the client.
  pub fn new(client: Client) -> Self {
    Self { client }
  }
}

#[async_trait]
impl MetadataResolver for HttpMetadataResolver {
  async fn describe(&self, endpoint_id: &str) -> Result<ServiceInfo, ResolveError> {
    let unavailable = |message: String| ResolveError::Unavailable {
      endpoint_id: endpoint_id.to_string(),
      message,
    };

    debug!(endpoint_id = %endpoint_id, "fetching description");

    let response = self
      .client
      .get(endpoint_id)
      .send()
      .await
      .map_err(|e| unavailable(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(unavailable(format!("server responded with status {}", status)));
    }

    let body = response
      .text()
      .await
      .map_err(|e| unavailable(e.to_string()))?;

    parse_description(endpoint_id, &body)
  }
}
