use serde::Serialize;
use serde_json::json;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::http::url::QueryParams;
use crate::http::FilePart;
use crate::types::{
  Achievement, AchievementDefinition, AchievementProgress, CheckAchievementsResponse,
  CreatedReminder, DaylioImportJob, DaylioJobStarted, ImportResponse, MessageResponse,
  PinVerification, PushTestResponse, Reminder, ReminderPayload, ReminderUpdate, StatusResponse,
  UserSettings, VapidKey,
};

/// Account settings, app lock, achievements, imports, push and reminders.
#[derive(Clone)]
pub struct SettingsApi {
  client: ApiClient,
}

impl SettingsApi {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  pub async fn user_settings(&self) -> Result<UserSettings, ApiError> {
    self.client.get("/api/user/settings").await
  }

  pub async fn set_pin(&self, pin: &str) -> Result<MessageResponse, ApiError> {
    self.client.put("/api/auth/pin", &json!({ "pin": pin })).await
  }

  pub async fn remove_pin(&self) -> Result<MessageResponse, ApiError> {
    self.client.delete("/api/auth/pin").await
  }

  pub async fn verify_pin(&self, pin: &str) -> Result<PinVerification, ApiError> {
    self
      .client
      .post("/api/auth/verify-pin", &json!({ "pin": pin }))
      .await
  }

  pub async fn update_lock_timeout(&self, seconds: u32) -> Result<MessageResponse, ApiError> {
    self
      .client
      .put(
        "/api/user/settings/lock-timeout",
        &json!({ "seconds": seconds }),
      )
      .await
  }

  // Achievements

  pub async fn achievements(&self) -> Result<Vec<Achievement>, ApiError> {
    self.client.get("/api/achievements").await
  }

  /// Ask the server to award anything newly earned
  pub async fn check_achievements(&self) -> Result<CheckAchievementsResponse, ApiError> {
    self.client.post_empty("/api/achievements/check").await
  }

  pub async fn achievement_definitions(&self) -> Result<Vec<AchievementDefinition>, ApiError> {
    self.client.get("/api/achievements/definitions").await
  }

  pub async fn achievement_progress(&self) -> Result<Vec<AchievementProgress>, ApiError> {
    self.client.get("/api/achievements/progress").await
  }

  // Import

  /// Restore a JSON export produced by the server
  pub async fn import_data<B: Serialize + ?Sized>(&self, export: &B) -> Result<ImportResponse, ApiError> {
    self.client.post("/api/export/import", export).await
  }

  /// Start a background import of a Daylio backup file
  pub async fn import_daylio(&self, file: FilePart, dry_run: bool) -> Result<DaylioJobStarted, ApiError> {
    let mut query = QueryParams::new();
    if dry_run {
      query = query.push("dry_run", "true");
    }
    let options = RequestOptions::post().multipart(vec![file]);
    self
      .client
      .request(&query.append_to("/api/import/daylio"), options)
      .await
  }

  pub async fn daylio_job(&self, job_id: &str) -> Result<DaylioImportJob, ApiError> {
    self.client.get(&format!("/api/import/daylio/{}", job_id)).await
  }

  // Push

  pub async fn vapid_public_key(&self) -> Result<VapidKey, ApiError> {
    self.client.get("/api/push/vapid-public-key").await
  }

  /// Register a browser push subscription, passed through as-is
  pub async fn subscribe_push(&self, subscription: &serde_json::Value) -> Result<StatusResponse, ApiError> {
    self.client.post("/api/push/subscribe", subscription).await
  }

  pub async fn send_test_push(&self) -> Result<PushTestResponse, ApiError> {
    self.client.post_empty("/api/push/test").await
  }

  // Reminders

  pub async fn reminders(&self) -> Result<Vec<Reminder>, ApiError> {
    self.client.get("/api/reminders").await
  }

  pub async fn create_reminder(&self, reminder: &ReminderPayload) -> Result<CreatedReminder, ApiError> {
    self.client.post("/api/reminders", reminder).await
  }

  pub async fn update_reminder(&self, id: i64, update: &ReminderUpdate) -> Result<StatusResponse, ApiError> {
    self.client.put(&format!("/api/reminders/{}", id), update).await
  }

  pub async fn delete_reminder(&self, id: i64) -> Result<StatusResponse, ApiError> {
    self.client.delete(&format!("/api/reminders/{}", id)).await
  }

  /// Permanently delete the signed-in account
  pub async fn delete_account(&self) -> Result<MessageResponse, ApiError> {
    self.client.delete("/api/auth/user").await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::http::{Body, HttpMethod};
  use crate::testing::{ok, sent_json, ScriptedTransport};
  use std::sync::Arc;

  fn api_with(transport: &Arc<ScriptedTransport>) -> SettingsApi {
    SettingsApi::new(ApiClient::new(transport.clone()))
  }

  #[tokio::test]
  async fn test_pin_routes() {
    let transport = Arc::new(
      ScriptedTransport::new()
        .respond(ok(json!({"message": "PIN set"})))
        .respond(ok(json!({"valid": true})))
        .respond(ok(json!({"message": "PIN removed"}))),
    );
    let settings = api_with(&transport);

    settings.set_pin("1234").await.unwrap();
    assert!(settings.verify_pin("1234").await.unwrap().valid);
    settings.remove_pin().await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].method, HttpMethod::Put);
    assert_eq!(sent_json(&requests[0]), json!({"pin": "1234"}));
    assert_eq!(requests[1].url, "/api/auth/verify-pin");
    assert_eq!(requests[2].method, HttpMethod::Delete);
    assert_eq!(requests[2].url, "/api/auth/pin");
  }

  #[tokio::test]
  async fn test_daylio_dry_run_flag() {
    let transport = Arc::new(ScriptedTransport::new().always(ok(json!({"job_id": "j1"}))));
    let settings = api_with(&transport);
    let backup = || FilePart::new("backup.daylio", b"PK".to_vec());

    let started = settings.import_daylio(backup(), true).await.unwrap();
    assert_eq!(started.job_id, "j1");
    assert_eq!(transport.last_request().url, "/api/import/daylio?dry_run=true");
    assert!(matches!(transport.last_request().body, Body::Multipart(_)));
    assert_eq!(transport.last_request().header("content-type"), None);

    settings.import_daylio(backup(), false).await.unwrap();
    assert_eq!(transport.last_request().url, "/api/import/daylio");
  }

  #[tokio::test]
  async fn test_reminder_crud() {
    let transport = Arc::new(
      ScriptedTransport::new()
        .respond(ok(json!({"status": "created", "id": 7})))
        .respond(ok(json!({"status": "updated"})))
        .respond(ok(json!({"status": "deleted"}))),
    );
    let settings = api_with(&transport);

    let reminder = ReminderPayload {
      time: "21:00".to_string(),
      days: vec![1, 2, 3],
      ..Default::default()
    };
    let created = settings.create_reminder(&reminder).await.unwrap();
    assert_eq!(created.id, 7);
    assert_eq!(
      sent_json(&transport.last_request()),
      json!({"time": "21:00", "days": [1, 2, 3]})
    );

    let update = ReminderUpdate {
      is_active: Some(false),
      ..Default::default()
    };
    settings.update_reminder(7, &update).await.unwrap();
    assert_eq!(transport.last_request().url, "/api/reminders/7");

    let deleted = settings.delete_reminder(7).await.unwrap();
    assert_eq!(deleted.status, "deleted");
  }

  #[tokio::test]
  async fn test_vapid_key_and_account_deletion() {
    let transport = Arc::new(
      ScriptedTransport::new()
        .respond(ok(json!({"publicKey": "BPk"})))
        .respond(ok(json!({"message": "Account deleted"}))),
    );
    let settings = api_with(&transport);

    assert_eq!(settings.vapid_public_key().await.unwrap().public_key, "BPk");
    settings.delete_account().await.unwrap();
    assert_eq!(transport.last_request().url, "/api/auth/user");
    assert_eq!(transport.last_request().method, HttpMethod::Delete);
  }

  #[tokio::test]
  async fn test_lock_timeout_body() {
    let transport = Arc::new(ScriptedTransport::new().respond(ok(json!({"message": "ok"}))));
    let settings = api_with(&transport);

    settings.update_lock_timeout(300).await.unwrap();
    assert_eq!(sent_json(&transport.last_request()), json!({"seconds": 300}));
  }
}
