//! Retry with exponential backoff for transport failures and 5xx responses.

use std::time::Duration;
use tracing::warn;

use super::{HttpRequest, HttpResponse, Transport};
use crate::error::ApiError;

/// Bounded retry schedule: up to `retries` attempts, sleeping
/// `backoff * 2^attempt` between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  pub retries: u32,
  pub backoff: Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      retries: 3,
      backoff: Duration::from_millis(1000),
    }
  }
}

impl RetryPolicy {
  pub fn new(retries: u32, backoff: Duration) -> Self {
    Self { retries, backoff }
  }

  /// Delay before the attempt following `attempt` (zero-based).
  pub fn delay_for(&self, attempt: u32) -> Duration {
    self.backoff.saturating_mul(2u32.saturating_pow(attempt))
  }
}

/// Send `request`, retrying transient failures.
///
/// 4xx responses are returned on the first attempt. A 5xx that survives the
/// last attempt is returned as-is for the caller to interpret; a transport
/// error on the last attempt becomes `ApiError::Network`.
pub async fn fetch_with_retry(
  transport: &dyn Transport,
  request: &HttpRequest,
  policy: RetryPolicy,
) -> Result<HttpResponse, ApiError> {
  for attempt in 0..policy.retries {
    let is_last = attempt + 1 == policy.retries;

    match transport.send(request.clone()).await {
      Ok(response) if response.status >= 500 && !is_last => {
        let delay = policy.delay_for(attempt);
        warn!(
          "{} {} returned {}, retrying in {:?} (attempt {}/{})",
          request.method,
          request.url,
          response.status,
          delay,
          attempt + 1,
          policy.retries
        );
        tokio::time::sleep(delay).await;
      }
      Ok(response) => return Ok(response),
      Err(e) if is_last => return Err(ApiError::Network(e.0)),
      Err(e) => {
        let delay = policy.delay_for(attempt);
        warn!(
          "{} {} failed: {}, retrying in {:?} (attempt {}/{})",
          request.method,
          request.url,
          e,
          delay,
          attempt + 1,
          policy.retries
        );
        tokio::time::sleep(delay).await;
      }
    }
  }

  Err(ApiError::MaxRetriesExceeded)
}
