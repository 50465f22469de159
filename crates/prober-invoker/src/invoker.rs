use async_trait::async_trait;
use prober_service::Value;

use crate::error::InvokeError;

/// Creates invokers bound to one interface of an endpoint.
#[async_trait]
pub trait InvokerFactory: Send + Sync {
  /// Bind to `port_type_name` at `endpoint_id`.
  ///
  /// Fails with [`InvokeError::ProxyCreation`].
  async fn create_invoker(
    &self,
    endpoint_id: &str,
    port_type_name: &str,
  ) -> Result<Box<dyn Invoker>, InvokeError>;
}

/// Calls operations on a bound interface.
#[async_trait]
pub trait Invoker: Send + Sync {
  /// Call `operation` with positional `args`.
  ///
  /// An operation that returns nothing yields [`Value::Null`]. Fails with
  /// [`InvokeError::Invocation`].
  async fn call(&self, operation: &str, args: &[Value]) -> Result<Value, InvokeError>;
}
