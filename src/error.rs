//! Error type returned by every client operation.
//!
//! `ApiError` is `Clone` because a single deduplicated GET fans its result
//! out to every waiting caller.

use thiserror::Error;

/// Errors surfaced by `ApiClient::request` and the endpoint modules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
  /// The transport failed before any response arrived (after retries).
  #[error("network error: {0}")]
  Network(String),

  /// Non-2xx response. `message` is the server's `error`/`message` field
  /// when it sent one, otherwise a generic status line.
  #[error("{message}")]
  Http { status: u16, message: String },

  /// A 2xx response whose body is not JSON.
  #[error("Expected JSON but received: {content_type} | body: {snippet}")]
  UnexpectedContentType {
    content_type: String,
    snippet: String,
  },

  /// The JSON body did not match the expected shape.
  #[error("failed to decode response: {0}")]
  Decode(String),

  /// A request payload could not be serialized.
  #[error("failed to encode request: {0}")]
  Encode(String),

  #[error("Max retries exceeded")]
  MaxRetriesExceeded,
}

impl ApiError {
  /// HTTP status for `Http` errors.
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Http { status, .. } => Some(*status),
      _ => None,
    }
  }

  pub fn is_not_found(&self) -> bool {
    self.status() == Some(404)
  }
}

impl From<serde_json::Error> for ApiError {
  fn from(e: serde_json::Error) -> Self {
    ApiError::Decode(e.to_string())
  }
}
