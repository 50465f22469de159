use thiserror::Error;

/// Errors fetching content over HTTP.
#[derive(Debug, Error)]
pub enum FetchError {
  /// The request could not be sent or the body could not be read.
  #[error("request to '{url}' failed: {message}")]
  Request { url: String, message: String },

  /// The server answered with a non-success status.
  #[error("request to '{url}' returned status {status}")]
  Status { url: String, status: u16 },
}

/// Errors testing a REST operation.
#[derive(Debug, Error)]
pub enum RestError {
  /// The request arguments are invalid. Raised before any network access.
  #[error("invalid argument '{argument}': {message}")]
  Argument { argument: String, message: String },

  /// Fetching the operation's content failed.
  #[error(transparent)]
  Http(#[from] FetchError),
}
