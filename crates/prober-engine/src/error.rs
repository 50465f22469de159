//! Error types recorded while probing endpoints.
//!
//! Probing never fails outright. Each of these errors is rendered into the
//! `errors` list of the [`EndpointResult`](prober_service::EndpointResult) it
//! occurred for.

use prober_invoker::InvokeError;
use prober_resolver::ResolveError;
use thiserror::Error;

/// Failures recorded against an endpoint during a test run.
#[derive(Debug, Error)]
pub enum ProbeError {
  /// The endpoint could not be described.
  #[error(transparent)]
  MetadataUnavailable(ResolveError),

  /// No invoker could be bound for an operation's interface.
  #[error(transparent)]
  ProxyCreationFailed(InvokeError),

  /// An operation call failed.
  #[error(transparent)]
  InvocationFailed(InvokeError),

  /// The requested operation is not exposed by the endpoint.
  #[error("operation '{operation}' could not be found for service '{endpoint_id}'")]
  OperationNotFound {
    endpoint_id: String,
    operation: String,
  },
}
