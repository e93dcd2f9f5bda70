//! Base URL normalization, endpoint joining and query strings.

use url::form_urlencoded;

/// Clean a configured base URL.
///
/// Build pipelines sometimes inject `""` or stray quotes; those are removed
/// along with trailing slashes. Never fails.
pub fn normalize_base_url(raw: Option<&str>) -> String {
  let v = raw.unwrap_or("").trim();
  if v == "\"\"" || v == "''" {
    return String::new();
  }

  let is_quote = |c: char| c == '"' || c == '\'';
  let v: String = v
    .trim_matches(is_quote)
    .chars()
    .filter(|c| !is_quote(*c))
    .collect();

  v.trim_end_matches('/').to_string()
}

fn is_absolute(base: &str) -> bool {
  let lower = base.to_ascii_lowercase();
  lower.starts_with("http://") || lower.starts_with("https://")
}

/// Join a normalized base with an endpoint path.
///
/// A relative base is treated as a path prefix and is not applied twice:
/// `/api` + `/api/config` is `/api/config`.
pub fn build_url(base: &str, endpoint: &str) -> String {
  let path = if endpoint.starts_with('/') {
    endpoint.to_string()
  } else {
    format!("/{endpoint}")
  };

  if base.is_empty() {
    return path;
  }

  if is_absolute(base) {
    return format!("{base}{path}");
  }

  let prefix = base.trim_end_matches('/');
  if path == prefix || path.starts_with(&format!("{prefix}/")) {
    return path;
  }

  format!("{prefix}{path}")
}

/// Query string builder that skips unset values.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
  pairs: Vec<(String, String)>,
}

impl QueryParams {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(mut self, key: &str, value: impl ToString) -> Self {
    self.pairs.push((key.to_string(), value.to_string()));
    self
  }

  pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
    match value {
      Some(v) => self.push(key, v),
      None => self,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.pairs.is_empty()
  }

  /// `?a=1&b=2`, or an empty string when nothing was set.
  pub fn to_query_string(&self) -> String {
    if self.pairs.is_empty() {
      return String::new();
    }
    let encoded = form_urlencoded::Serializer::new(String::new())
      .extend_pairs(self.pairs.iter())
      .finish();
    format!("?{encoded}")
  }

  pub fn append_to(&self, endpoint: &str) -> String {
    format!("{endpoint}{}", self.to_query_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_normalize_strips_quotes_and_slashes() {
    assert_eq!(normalize_base_url(None), "");
    assert_eq!(normalize_base_url(Some("  \"\"  ")), "");
    assert_eq!(normalize_base_url(Some("''")), "");
    assert_eq!(
      normalize_base_url(Some("'https://mood.example.com//'")),
      "https://mood.example.com"
    );
    assert_eq!(normalize_base_url(Some("/ap\"i/")), "/api");
  }

  #[test]
  fn test_build_url_without_base_is_relative() {
    assert_eq!(build_url("", "/api/moods"), "/api/moods");
    assert_eq!(build_url("", "api/moods"), "/api/moods");
  }

  #[test]
  fn test_build_url_absolute_base() {
    assert_eq!(
      build_url("https://mood.example.com", "/api/goals"),
      "https://mood.example.com/api/goals"
    );
    assert_eq!(
      build_url("HTTP://localhost:5000", "api/goals"),
      "HTTP://localhost:5000/api/goals"
    );
  }

  #[test]
  fn test_build_url_does_not_double_prefix() {
    assert_eq!(build_url("/api", "/api/config"), "/api/config");
    assert_eq!(build_url("/api", "/api"), "/api");
    assert_eq!(build_url("/api", "/health"), "/api/health");
    // `/apiary` is not under the `/api` prefix
    assert_eq!(build_url("/api", "/apiary"), "/api/apiary");
  }

  #[test]
  fn test_query_params_skip_none() {
    let q = QueryParams::new()
      .push("limit", 50)
      .push_opt::<&str>("start_date", None)
      .push_opt("end_date", Some("2024-01-31"));
    assert_eq!(q.to_query_string(), "?limit=50&end_date=2024-01-31");
  }

  #[test]
  fn test_query_params_empty_leaves_endpoint_alone() {
    assert_eq!(QueryParams::new().append_to("/api/moods"), "/api/moods");
  }

  #[test]
  fn test_query_params_encode_values() {
    let q = QueryParams::new().push("include", "selections,media");
    assert_eq!(q.append_to("/api/moods"), "/api/moods?include=selections%2Cmedia");
  }
}
