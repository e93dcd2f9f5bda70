use serde_json::json;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::types::auth::{Credentials, Registration};
use crate::types::{AuthResponse, PublicConfig, VerifyTokenResponse};

/// Login, registration and token verification.
#[derive(Clone)]
pub struct AuthApi {
  client: ApiClient,
}

impl AuthApi {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  /// Server feature flags, readable without a token
  pub async fn public_config(&self) -> Result<PublicConfig, ApiError> {
    self.client.get("/api/config").await
  }

  /// Exchange a Google ID token for a session
  pub async fn google_auth(&self, google_token: &str) -> Result<AuthResponse, ApiError> {
    self
      .client
      .post("/api/auth/google", &json!({ "token": google_token }))
      .await
  }

  /// Development-only login without credentials
  pub async fn local_login(&self) -> Result<AuthResponse, ApiError> {
    self.client.post_empty("/api/auth/local/login").await
  }

  pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
    self
      .client
      .post("/api/auth/login", &Credentials { username, password })
      .await
  }

  pub async fn register(
    &self,
    username: &str,
    password: &str,
    email: Option<&str>,
    name: Option<&str>,
  ) -> Result<AuthResponse, ApiError> {
    let registration = Registration {
      username,
      password,
      email,
      name,
    };
    self.client.post("/api/auth/register", &registration).await
  }

  /// Check `token` regardless of the token the client currently holds.
  pub async fn verify_token(&self, token: &str) -> Result<VerifyTokenResponse, ApiError> {
    let options = RequestOptions::post().header("Authorization", format!("Bearer {}", token));
    self.client.request("/api/auth/verify", options).await
  }
}
