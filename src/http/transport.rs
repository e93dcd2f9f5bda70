//! The network seam. `ApiClient` only ever talks to a `Transport`, which is
//! chosen once at startup: reqwest for a real server, the in-memory mock
//! backend for demos and tests.

use futures::future::BoxFuture;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::{Body, HttpMethod, HttpRequest, HttpResponse};

/// Failure to obtain any response (connection refused, DNS, TLS, timeout).
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Executes one HTTP round trip. Non-2xx statuses are returned as data.
pub trait Transport: Send + Sync {
  fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>>;
}

/// Transport backed by a shared `reqwest::Client`.
///
/// Relative request URLs (the client's default when no absolute base URL is
/// configured) are resolved against `origin`.
#[derive(Clone)]
pub struct ReqwestTransport {
  client: reqwest::Client,
  origin: Url,
}

impl ReqwestTransport {
  pub fn new(origin: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
    let origin =
      Url::parse(origin).map_err(|e| TransportError(format!("Invalid origin {}: {}", origin, e)))?;

    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder
      .build()
      .map_err(|e| TransportError(format!("Failed to build HTTP client: {}", e)))?;

    Ok(Self { client, origin })
  }

  fn resolve(&self, url: &str) -> Result<Url, TransportError> {
    self
      .origin
      .join(url)
      .map_err(|e| TransportError(format!("Failed to resolve {}: {}", url, e)))
  }

  async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let url = self.resolve(&request.url)?;

    let mut builder = match request.method {
      HttpMethod::Get => self.client.get(url),
      HttpMethod::Post => self.client.post(url),
      HttpMethod::Put => self.client.put(url),
      HttpMethod::Delete => self.client.delete(url),
    };

    for (name, value) in &request.headers {
      builder = builder.header(name.as_str(), value.as_str());
    }

    builder = match request.body {
      Body::Empty => builder,
      Body::Json(text) => builder.body(text),
      Body::Multipart(parts) => builder.multipart(build_form(parts)?),
    };

    let response = builder
      .send()
      .await
      .map_err(|e| TransportError(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
      .headers()
      .iter()
      .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
      .collect();
    let body = response
      .text()
      .await
      .map_err(|e| TransportError(e.to_string()))?;

    Ok(HttpResponse {
      status,
      headers,
      body,
    })
  }
}

fn build_form(parts: Vec<super::FilePart>) -> Result<Form, TransportError> {
  let mut form = Form::new();
  for part in parts {
    let mut p = Part::bytes(part.bytes).file_name(part.file_name);
    if let Some(mime) = part.mime {
      p = p
        .mime_str(&mime)
        .map_err(|e| TransportError(format!("Invalid mime type {}: {}", mime, e)))?;
    }
    form = form.part(part.field, p);
  }
  Ok(form)
}

impl Transport for ReqwestTransport {
  fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
    Box::pin(self.execute(request))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_relative_urls_resolve_against_origin() {
    let transport = ReqwestTransport::new("http://localhost:5000", None).unwrap();
    let url = transport.resolve("/api/moods?include=media").unwrap();
    assert_eq!(url.as_str(), "http://localhost:5000/api/moods?include=media");
  }

  #[test]
  fn test_absolute_urls_ignore_origin() {
    let transport = ReqwestTransport::new("http://localhost:5000", None).unwrap();
    let url = transport.resolve("https://mood.example.com/api/goals").unwrap();
    assert_eq!(url.as_str(), "https://mood.example.com/api/goals");
  }

  #[test]
  fn test_invalid_origin_is_rejected() {
    assert!(ReqwestTransport::new("not a url", None).is_err());
  }
}
