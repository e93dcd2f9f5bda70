use serde::{Deserialize, Serialize};

use super::common::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
  pub token: String,
  pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyTokenResponse {
  #[serde(default)]
  pub valid: bool,
  #[serde(default)]
  pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Credentials<'a> {
  pub username: &'a str,
  pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Registration<'a> {
  pub username: &'a str,
  pub password: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<&'a str>,
}
