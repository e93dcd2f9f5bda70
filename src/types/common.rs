use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id: i64,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub avatar_url: Option<String>,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default)]
  pub email_verified: Option<bool>,
}

/// Server feature flags exposed before login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicConfig {
  #[serde(default)]
  pub google_client_id: Option<String>,
  #[serde(default)]
  pub enable_google_oauth: Option<bool>,
  #[serde(default)]
  pub enable_registration: Option<bool>,
  #[serde(default)]
  pub enable_local_login: Option<bool>,
  #[serde(default)]
  pub email_enabled: Option<bool>,
  #[serde(default)]
  pub features: Vec<String>,
}

/// `{ "message": ... }` acknowledgement returned by most deletes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
  #[serde(default)]
  pub message: String,
}

/// `{ "status": ... }` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
  #[serde(default)]
  pub status: String,
}
