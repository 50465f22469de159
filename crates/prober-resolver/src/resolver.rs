use async_trait::async_trait;
use prober_service::ServiceInfo;

use crate::error::ResolveError;

/// Describes endpoints: service name plus the operations they expose.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
  /// Resolve the metadata for an endpoint.
  ///
  /// Operations are returned in the order the endpoint reports them and
  /// operation names are unique.
  async fn describe(&self, endpoint_id: &str) -> Result<ServiceInfo, ResolveError>;
}

#[async_trait]
impl<T: MetadataResolver + ?Sized> MetadataResolver for Box<T> {
  async fn describe(&self, endpoint_id: &str) -> Result<ServiceInfo, ResolveError> {
    (**self).describe(endpoint_id).await
  }
}
