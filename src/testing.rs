//! Scripted transport for unit tests.

use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

/// Replays queued outcomes in order, then `fallback` (if any) forever.
/// Records every request it receives.
#[derive(Default)]
pub struct ScriptedTransport {
  script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
  fallback: Option<HttpResponse>,
  requests: Mutex<Vec<HttpRequest>>,
  delay: Duration,
}

impl ScriptedTransport {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn respond(self, response: HttpResponse) -> Self {
    self.script.lock().unwrap().push_back(Ok(response));
    self
  }

  pub fn fail(self, message: &str) -> Self {
    self
      .script
      .lock()
      .unwrap()
      .push_back(Err(TransportError(message.to_string())));
    self
  }

  pub fn always(mut self, response: HttpResponse) -> Self {
    self.fallback = Some(response);
    self
  }

  /// Hold every response for `delay` so concurrent callers overlap.
  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = delay;
    self
  }

  pub fn calls(&self) -> usize {
    self.requests.lock().unwrap().len()
  }

  pub fn requests(&self) -> Vec<HttpRequest> {
    self.requests.lock().unwrap().clone()
  }

  pub fn last_request(&self) -> HttpRequest {
    self.requests().pop().expect("no request was sent")
  }
}

impl Transport for ScriptedTransport {
  fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
    Box::pin(async move {
      self.requests.lock().unwrap().push(request);
      if !self.delay.is_zero() {
        tokio::time::sleep(self.delay).await;
      }
      let next = self.script.lock().unwrap().pop_front();
      match next {
        Some(outcome) => outcome,
        None => self
          .fallback
          .clone()
          .ok_or_else(|| TransportError("script exhausted".to_string())),
      }
    })
  }
}

/// 200 response carrying `body` as JSON.
pub fn ok(body: serde_json::Value) -> HttpResponse {
  HttpResponse::json(200, &body)
}

/// JSON body of a recorded request.
pub fn sent_json(request: &HttpRequest) -> serde_json::Value {
  match &request.body {
    crate::http::Body::Json(text) => serde_json::from_str(text).expect("request body is not JSON"),
    other => panic!("expected a JSON body, got {:?}", other),
  }
}
