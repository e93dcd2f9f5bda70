//! HTTP plumbing: plain-data requests and responses, the transport seam,
//! URL building and the retry loop.
//!
//! Requests and responses are owned data so the same request can be replayed
//! by the retry loop and so tests can script a transport without sockets.

pub mod retry;
pub mod transport;
pub mod url;

pub use retry::{fetch_with_retry, RetryPolicy};
pub use transport::{ReqwestTransport, Transport, TransportError};

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
  #[default]
  Get,
  Post,
  Put,
  Delete,
}

impl HttpMethod {
  pub fn as_str(&self) -> &'static str {
    match self {
      HttpMethod::Get => "GET",
      HttpMethod::Post => "POST",
      HttpMethod::Put => "PUT",
      HttpMethod::Delete => "DELETE",
    }
  }
}

impl fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A file attached to a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
  /// Form field name (the API always uses `file`)
  pub field: String,
  pub file_name: String,
  pub mime: Option<String>,
  pub bytes: Vec<u8>,
}

impl FilePart {
  pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
    Self {
      field: "file".to_string(),
      file_name: file_name.into(),
      mime: None,
      bytes,
    }
  }

  pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
    self.mime = Some(mime.into());
    self
  }
}

/// Request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
  #[default]
  Empty,
  /// Serialized JSON text
  Json(String),
  /// multipart/form-data; the transport sets the boundary header
  Multipart(Vec<FilePart>),
}

impl Body {
  pub fn is_multipart(&self) -> bool {
    matches!(self, Body::Multipart(_))
  }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
  pub method: HttpMethod,
  /// Absolute URL or origin-relative path, as produced by `url::build_url`
  pub url: String,
  pub headers: Vec<(String, String)>,
  pub body: Body,
}

impl HttpRequest {
  /// Case-insensitive header lookup.
  pub fn header(&self, name: &str) -> Option<&str> {
    find_header(&self.headers, name)
  }
}

/// An HTTP response described as plain data. Every status is data; only a
/// failure to obtain a response at all is an error.
#[derive(Debug, Clone)]
pub struct HttpResponse {
  pub status: u16,
  pub headers: Vec<(String, String)>,
  pub body: String,
}

impl HttpResponse {
  pub fn json(status: u16, body: &serde_json::Value) -> Self {
    Self {
      status,
      headers: vec![("content-type".to_string(), "application/json".to_string())],
      body: body.to_string(),
    }
  }

  pub fn text(status: u16, content_type: &str, body: impl Into<String>) -> Self {
    Self {
      status,
      headers: vec![("content-type".to_string(), content_type.to_string())],
      body: body.into(),
    }
  }

  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  pub fn header(&self, name: &str) -> Option<&str> {
    find_header(&self.headers, name)
  }

  pub fn content_type(&self) -> &str {
    self.header("content-type").unwrap_or("")
  }

  pub fn is_json(&self) -> bool {
    self.content_type().contains("application/json")
  }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
  headers
    .iter()
    .find(|(k, _)| k.eq_ignore_ascii_case(name))
    .map(|(_, v)| v.as_str())
}
