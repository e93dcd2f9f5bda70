//! Request client: URL building, headers, auth, caching, GET deduplication
//! and response validation on top of a `Transport`.

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, error};

use crate::cache::{ttl_for, ResponseCache, DEFAULT_MAX_ENTRIES};
use crate::error::ApiError;
use crate::http::url::{build_url, normalize_base_url};
use crate::http::{
  fetch_with_retry, Body, FilePart, HttpMethod, HttpRequest, HttpResponse, RetryPolicy, Transport,
};

/// Longest body excerpt carried in error messages.
const SNIPPET_CHARS: usize = 200;

type SharedResponse = Shared<BoxFuture<'static, Result<Value, ApiError>>>;

/// Caller-supplied request parameters.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
  pub method: HttpMethod,
  pub headers: Vec<(String, String)>,
  pub body: Body,
  /// Send no `Content-Type` at all
  pub omit_content_type: bool,
}

impl RequestOptions {
  pub fn get() -> Self {
    Self::default()
  }

  pub fn post() -> Self {
    Self::method(HttpMethod::Post)
  }

  pub fn put() -> Self {
    Self::method(HttpMethod::Put)
  }

  pub fn delete() -> Self {
    Self::method(HttpMethod::Delete)
  }

  pub fn method(method: HttpMethod) -> Self {
    Self {
      method,
      ..Self::default()
    }
  }

  pub fn json<B: Serialize + ?Sized>(mut self, payload: &B) -> Result<Self, ApiError> {
    let text = serde_json::to_string(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
    self.body = Body::Json(text);
    Ok(self)
  }

  pub fn multipart(mut self, parts: Vec<FilePart>) -> Self {
    self.body = Body::Multipart(parts);
    self
  }

  /// Add a header, replacing the default of the same name. An
  /// `Authorization` header set here is sent instead of the stored token.
  pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
    self.headers.push((name.to_string(), value.into()));
    self
  }

  pub fn without_content_type(mut self) -> Self {
    self.omit_content_type = true;
    self
  }
}

struct Inner {
  transport: Arc<dyn Transport>,
  base_url: String,
  retry: RetryPolicy,
  token: RwLock<Option<String>>,
  cache: ResponseCache,
  in_flight: Mutex<HashMap<String, SharedResponse>>,
}

impl Inner {
  fn in_flight(&self) -> MutexGuard<'_, HashMap<String, SharedResponse>> {
    self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
  }

  async fn send(&self, request: &HttpRequest) -> Result<Value, ApiError> {
    let result = match fetch_with_retry(self.transport.as_ref(), request, self.retry).await {
      Ok(response) => parse_response(response),
      Err(e) => Err(e),
    };

    if let Err(e) = &result {
      error!("API request failed: {} {}: {}", request.method, request.url, e);
    }
    result
  }

  /// Body of a deduplicated GET. Runs once per key no matter how many
  /// callers await it.
  async fn send_shared(
    self: Arc<Self>,
    key: String,
    request: HttpRequest,
    ttl: Duration,
  ) -> Result<Value, ApiError> {
    let result = self.send(&request).await;

    if let Ok(value) = &result {
      if !ttl.is_zero() {
        self.cache.set(&key, value.clone(), ttl);
      }
    }

    // Cache first, then release the key, so a caller arriving in between
    // sees the cached value instead of starting a second request.
    self.in_flight().remove(&key);
    result
  }
}

/// Cheaply clonable handle to the shared client state.
#[derive(Clone)]
pub struct ApiClient {
  inner: Arc<Inner>,
}

/// Builder for `ApiClient`.
pub struct ApiClientBuilder {
  transport: Arc<dyn Transport>,
  base_url: String,
  retry: RetryPolicy,
  max_cache_entries: Option<usize>,
  token: Option<String>,
}

impl ApiClientBuilder {
  /// Raw base URL; quotes and trailing slashes are cleaned up.
  pub fn base_url(mut self, raw: Option<&str>) -> Self {
    self.base_url = normalize_base_url(raw);
    self
  }

  pub fn retry(mut self, retry: RetryPolicy) -> Self {
    self.retry = retry;
    self
  }

  /// Upper bound on cached responses; `None` leaves the cache unbounded.
  pub fn max_cache_entries(mut self, max: Option<usize>) -> Self {
    self.max_cache_entries = max;
    self
  }

  pub fn token(mut self, token: Option<String>) -> Self {
    self.token = token;
    self
  }

  pub fn build(self) -> ApiClient {
    ApiClient {
      inner: Arc::new(Inner {
        transport: self.transport,
        base_url: self.base_url,
        retry: self.retry,
        token: RwLock::new(self.token),
        cache: ResponseCache::new(self.max_cache_entries),
        in_flight: Mutex::new(HashMap::new()),
      }),
    }
  }
}

impl ApiClient {
  pub fn builder(transport: Arc<dyn Transport>) -> ApiClientBuilder {
    ApiClientBuilder {
      transport,
      base_url: String::new(),
      retry: RetryPolicy::default(),
      max_cache_entries: Some(DEFAULT_MAX_ENTRIES),
      token: None,
    }
  }

  /// Client with a relative base URL and default retry/cache settings.
  pub fn new(transport: Arc<dyn Transport>) -> Self {
    Self::builder(transport).build()
  }

  pub fn set_auth_token(&self, token: impl Into<String>) {
    *self.inner.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
  }

  pub fn clear_auth_token(&self) {
    *self.inner.token.write().unwrap_or_else(PoisonError::into_inner) = None;
  }

  pub fn auth_token(&self) -> Option<String> {
    self
      .inner
      .token
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  /// Drop cached responses whose key contains `pattern`, or all of them.
  pub fn invalidate_cache(&self, pattern: Option<&str>) {
    debug!("Invalidating cache: {}", pattern.unwrap_or("*"));
    self.inner.cache.invalidate(pattern);
  }

  pub fn cache(&self) -> &ResponseCache {
    &self.inner.cache
  }

  pub fn base_url(&self) -> &str {
    &self.inner.base_url
  }

  /// Number of GETs currently awaiting a response.
  pub fn in_flight_len(&self) -> usize {
    self.inner.in_flight().len()
  }

  /// Full request as it would be sent: URL, merged headers and auth.
  pub fn prepare(&self, endpoint: &str, options: RequestOptions) -> HttpRequest {
    let url = build_url(&self.inner.base_url, endpoint);

    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    for (name, value) in options.headers {
      headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
      headers.push((name, value));
    }

    if options.omit_content_type || options.body.is_multipart() {
      headers.retain(|(k, _)| !k.eq_ignore_ascii_case("content-type"));
    }

    let has_auth = headers
      .iter()
      .any(|(k, _)| k.eq_ignore_ascii_case("authorization"));
    if !has_auth {
      if let Some(token) = self.auth_token() {
        headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
      }
    }

    HttpRequest {
      method: options.method,
      url,
      headers,
      body: options.body,
    }
  }

  /// Send a request and return the JSON body untyped.
  ///
  /// GETs are served from the cache when fresh, and concurrent identical GETs
  /// share one network request.
  pub async fn request_value(
    &self,
    endpoint: &str,
    options: RequestOptions,
  ) -> Result<Value, ApiError> {
    let request = self.prepare(endpoint, options);

    if request.method != HttpMethod::Get {
      return self.inner.send(&request).await;
    }

    let key = format!("GET:{}", request.url);
    let pending = {
      let mut in_flight = self.inner.in_flight();

      if let Some(hit) = self.inner.cache.get(&key) {
        debug!("Cache hit: {}", key);
        return Ok(hit);
      }

      match in_flight.get(&key) {
        Some(pending) => {
          debug!("Joining in-flight request: {}", key);
          pending.clone()
        }
        None => {
          let fut = Arc::clone(&self.inner)
            .send_shared(key.clone(), request, endpoint_ttl(endpoint))
            .boxed()
            .shared();
          in_flight.insert(key, fut.clone());
          fut
        }
      }
    };

    pending.await
  }

  /// Send a request and decode the JSON body into `T`.
  pub async fn request<T: DeserializeOwned>(
    &self,
    endpoint: &str,
    options: RequestOptions,
  ) -> Result<T, ApiError> {
    let value = self.request_value(endpoint, options).await?;
    serde_json::from_value(value).map_err(|e| {
      error!("Failed to decode response from {}: {}", endpoint, e);
      ApiError::Decode(format!("{}: {}", endpoint, e))
    })
  }

  pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
    self.request(endpoint, RequestOptions::get()).await
  }

  pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
  where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
  {
    self.request(endpoint, RequestOptions::post().json(body)?).await
  }

  /// POST without a body.
  pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
    self.request(endpoint, RequestOptions::post()).await
  }

  pub async fn put<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
  where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
  {
    self.request(endpoint, RequestOptions::put().json(body)?).await
  }

  pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
    self.request(endpoint, RequestOptions::delete()).await
  }
}

/// Cache lifetime for an endpoint as the caller named it, independent of
/// whatever base URL is prepended.
fn endpoint_ttl(endpoint: &str) -> Duration {
  if endpoint.starts_with('/') {
    ttl_for(endpoint)
  } else {
    ttl_for(&format!("/{endpoint}"))
  }
}

fn snippet(text: &str) -> String {
  text.chars().take(SNIPPET_CHARS).collect()
}

/// Turn a raw response into a JSON value or a descriptive error.
pub fn parse_response(response: HttpResponse) -> Result<Value, ApiError> {
  if !response.is_success() {
    let mut message = format!("HTTP error! status: {}", response.status);

    if response.is_json() {
      if let Ok(body) = serde_json::from_str::<Value>(&response.body) {
        let server_message = ["error", "message"]
          .iter()
          .filter_map(|field| body.get(field).and_then(Value::as_str))
          .find(|m| !m.is_empty());
        if let Some(m) = server_message {
          message = m.to_string();
        }
      }
    } else if !response.body.is_empty() {
      message.push_str(&format!(" | body: {}", snippet(&response.body)));
    }

    return Err(ApiError::Http {
      status: response.status,
      message,
    });
  }

  if !response.is_json() {
    let content_type = match response.content_type() {
      "" => "unknown".to_string(),
      ct => ct.to_string(),
    };
    return Err(ApiError::UnexpectedContentType {
      content_type,
      snippet: snippet(&response.body),
    });
  }

  Ok(serde_json::from_str(&response.body)?)
}
