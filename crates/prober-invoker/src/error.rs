//! Invocation errors.

/// Errors that can occur while binding to or calling a remote operation.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
  /// An invoker could not be created for the endpoint's port type.
  #[error("failed to bind to '{port_type_name}' at '{endpoint_id}': {message}")]
  ProxyCreation {
    endpoint_id: String,
    port_type_name: String,
    message: String,
  },

  /// The operation call failed.
  #[error("operation '{operation}' failed: {message}")]
  Invocation { operation: String, message: String },
}
