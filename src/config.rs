use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::DEFAULT_MAX_ENTRIES;
use crate::client::ApiClient;
use crate::http::{ReqwestTransport, RetryPolicy, Transport};
use crate::mock::MockTransport;

pub const DEFAULT_ORIGIN: &str = "http://localhost:5000";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub retry: RetryConfig,
  #[serde(default)]
  pub cache: CacheConfig,
  #[serde(default)]
  pub log: LogConfig,
  /// Token to start with instead of the saved one
  #[serde(skip)]
  pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
  /// Prefix for every endpoint, e.g. `https://mood.example.com` or `/backend`.
  /// Unset means endpoints are requested as given.
  pub base_url: Option<String>,
  /// Origin that relative URLs are resolved against
  #[serde(default = "default_origin")]
  pub origin: String,
  /// Serve every request from the built-in demo backend
  #[serde(default)]
  pub mock: bool,
  /// Per-request timeout; none by default
  pub timeout_secs: Option<u64>,
}

fn default_origin() -> String {
  DEFAULT_ORIGIN.to_string()
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: None,
      origin: default_origin(),
      mock: false,
      timeout_secs: None,
    }
  }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct RetryConfig {
  #[serde(default = "default_retries")]
  pub retries: u32,
  #[serde(default = "default_backoff_ms")]
  pub backoff_ms: u64,
}

fn default_retries() -> u32 {
  3
}

fn default_backoff_ms() -> u64 {
  1000
}

impl Default for RetryConfig {
  fn default() -> Self {
    Self {
      retries: default_retries(),
      backoff_ms: default_backoff_ms(),
    }
  }
}

impl From<RetryConfig> for RetryPolicy {
  fn from(config: RetryConfig) -> Self {
    RetryPolicy::new(config.retries, Duration::from_millis(config.backoff_ms))
  }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
  /// Upper bound on cached responses; 0 disables the bound
  #[serde(default = "default_max_entries")]
  pub max_entries: usize,
}

fn default_max_entries() -> usize {
  DEFAULT_MAX_ENTRIES
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      max_entries: default_max_entries(),
    }
  }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LogConfig {
  /// Filter directive used when RUST_LOG is unset
  #[serde(default = "default_log_level")]
  pub level: String,
  /// Append logs to this file instead of stderr
  pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
  "warn".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
      file: None,
    }
  }
}

impl Config {
  /// Load configuration from file, then apply environment overrides.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./twilight.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/twilight/config.yaml
  ///
  /// Without a file the defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("twilight.yaml");
    if local.exists() {
      return Some(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("twilight").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  /// Parse YAML; an empty document yields the defaults.
  pub fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
    if contents.trim().is_empty() {
      return Ok(Config::default());
    }
    serde_yaml::from_str(contents)
  }

  /// Apply `TWILIGHT_*` overrides read through `var`.
  ///
  /// TWILIGHT_API_URL, TWILIGHT_ORIGIN, TWILIGHT_MOCK_MODE (`true` enables)
  /// and TWILIGHT_TOKEN.
  pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
    if let Some(url) = var("TWILIGHT_API_URL") {
      self.api.base_url = Some(url);
    }
    if let Some(origin) = var("TWILIGHT_ORIGIN").filter(|o| !o.trim().is_empty()) {
      self.api.origin = origin;
    }
    if let Some(mock) = var("TWILIGHT_MOCK_MODE") {
      self.api.mock = mock.trim() == "true";
    }
    if let Some(token) = var("TWILIGHT_TOKEN").filter(|t| !t.is_empty()) {
      self.token = Some(token);
    }
  }

  /// Transport selected by `api.mock`.
  pub fn build_transport(&self) -> Result<Arc<dyn Transport>> {
    if self.api.mock {
      tracing::info!("Mock mode enabled, using the built-in demo backend");
      return Ok(Arc::new(
        MockTransport::new().with_base_url(self.api.base_url.as_deref()),
      ));
    }

    let timeout = self.api.timeout_secs.map(Duration::from_secs);
    let transport = ReqwestTransport::new(&self.api.origin, timeout)
      .map_err(|e| eyre!("Failed to create HTTP client for {}: {}", self.api.origin, e))?;
    Ok(Arc::new(transport))
  }

  /// Client wired with this configuration's transport, retry and cache settings.
  pub fn build_client(&self) -> Result<ApiClient> {
    let max_entries = match self.cache.max_entries {
      0 => None,
      n => Some(n),
    };

    Ok(
      ApiClient::builder(self.build_transport()?)
        .base_url(self.api.base_url.as_deref())
        .retry(self.retry.into())
        .max_cache_entries(max_entries)
        .token(self.token.clone())
        .build(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    move |key| vars.get(key).cloned()
  }

  #[test]
  fn test_empty_file_uses_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.api.origin, DEFAULT_ORIGIN);
    assert_eq!(config.retry.retries, 3);
    assert_eq!(config.cache.max_entries, DEFAULT_MAX_ENTRIES);
  }

  #[test]
  fn test_partial_sections() {
    let config = Config::parse(
      r#"
api:
  base_url: "https://mood.example.com/"
  timeout_secs: 15
retry:
  backoff_ms: 250
log:
  file: /tmp/twilight.log
"#,
    )
    .unwrap();

    assert_eq!(config.api.base_url.as_deref(), Some("https://mood.example.com/"));
    assert_eq!(config.api.origin, DEFAULT_ORIGIN);
    assert_eq!(config.api.timeout_secs, Some(15));
    assert_eq!(config.retry.retries, 3);
    assert_eq!(config.retry.backoff_ms, 250);
    assert_eq!(config.log.level, "warn");
    assert_eq!(config.log.file, Some(PathBuf::from("/tmp/twilight.log")));
  }

  #[test]
  fn test_rejects_wrong_types() {
    assert!(Config::parse("retry:\n  retries: lots\n").is_err());
  }

  #[test]
  fn test_env_overrides() {
    let mut config = Config::default();
    config.apply_env(env(&[
      ("TWILIGHT_API_URL", "'/backend'"),
      ("TWILIGHT_MOCK_MODE", "true"),
      ("TWILIGHT_TOKEN", "abc"),
    ]));

    assert_eq!(config.api.base_url.as_deref(), Some("'/backend'"));
    assert!(config.api.mock);
    assert_eq!(config.token.as_deref(), Some("abc"));
    assert_eq!(config.api.origin, DEFAULT_ORIGIN);
  }

  #[test]
  fn test_mock_mode_requires_exact_true() {
    let mut config = Config::default();
    config.api.mock = true;
    config.apply_env(env(&[("TWILIGHT_MOCK_MODE", "1")]));
    assert!(!config.api.mock);
  }

  #[test]
  fn test_retry_policy_from_config() {
    let policy: RetryPolicy = RetryConfig {
      retries: 5,
      backoff_ms: 20,
    }
    .into();
    assert_eq!(policy, RetryPolicy::new(5, Duration::from_millis(20)));
  }

  #[test]
  fn test_build_client_normalizes_base_url() {
    let mut config = Config::default();
    config.api.mock = true;
    config.api.base_url = Some("\"https://mood.example.com//\"".to_string());
    config.token = Some("t".to_string());

    let client = config.build_client().unwrap();
    assert_eq!(client.base_url(), "https://mood.example.com");
    assert_eq!(client.auth_token().as_deref(), Some("t"));
  }

  #[test]
  fn test_missing_explicit_path_is_an_error() {
    let err = Config::load(Some(Path::new("/nonexistent/twilight.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
  }

  #[tokio::test]
  async fn test_mock_transport_serves_demo_data() {
    let mut config = Config::default();
    config.api.mock = true;
    let client = config.build_client().unwrap();

    let streak: serde_json::Value = client.get("/api/streak").await.unwrap();
    assert!(streak["current"].is_u64());
  }

  #[tokio::test]
  async fn test_mock_transport_follows_base_path() {
    let mut config = Config::default();
    config.api.mock = true;
    config.api.base_url = Some("/backend".to_string());
    let client = config.build_client().unwrap();

    let groups: Vec<serde_json::Value> = client.get("/api/groups").await.unwrap();
    assert!(!groups.is_empty());
  }
}
