use thiserror::Error;

/// Errors that can occur while resolving endpoint metadata.
///
/// Every variant means the endpoint's metadata is unavailable.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// The description document could not be retrieved.
  #[error("metadata unavailable for '{endpoint_id}': {message}")]
  Unavailable { endpoint_id: String, message: String },

  /// The description document was retrieved but could not be parsed.
  #[error("malformed description for '{endpoint_id}': {message}")]
  Malformed { endpoint_id: String, message: String },

  /// The description lists the same operation twice.
  #[error("description for '{endpoint_id}' lists operation '{operation}' more than once")]
  DuplicateOperation {
    endpoint_id: String,
    operation: String,
  },
}
