use serde_json::json;

use super::goal_payload::normalize_goal;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::url::QueryParams;
use crate::types::{DateRange, Goal, GoalCompletion, GoalDraft, MessageResponse, ToggleCompletionResponse};

/// Habit goals and their completion history.
#[derive(Clone)]
pub struct GoalsApi {
  client: ApiClient,
}

impl GoalsApi {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  pub async fn goals(&self) -> Result<Vec<Goal>, ApiError> {
    self.client.get("/api/goals").await
  }

  pub async fn create_goal(&self, goal: GoalDraft) -> Result<Goal, ApiError> {
    self.client.post("/api/goals", &normalize_goal(goal)).await
  }

  pub async fn update_goal(&self, id: i64, patch: GoalDraft) -> Result<Goal, ApiError> {
    self
      .client
      .put(&format!("/api/goals/{}", id), &normalize_goal(patch))
      .await
  }

  pub async fn delete_goal(&self, id: i64) -> Result<MessageResponse, ApiError> {
    self.client.delete(&format!("/api/goals/{}", id)).await
  }

  pub async fn increment_progress(&self, id: i64) -> Result<Goal, ApiError> {
    self.client.post_empty(&format!("/api/goals/{}/progress", id)).await
  }

  pub async fn completions(&self, id: i64, range: &DateRange) -> Result<Vec<GoalCompletion>, ApiError> {
    let query = QueryParams::new()
      .push_opt("start", range.start.as_deref().filter(|s| !s.is_empty()))
      .push_opt("end", range.end.as_deref().filter(|s| !s.is_empty()));
    self
      .client
      .get(&query.append_to(&format!("/api/goals/{}/completions", id)))
      .await
  }

  /// Mark or unmark the goal as done on `date` (YYYY-MM-DD)
  pub async fn toggle_completion(&self, id: i64, date: &str) -> Result<ToggleCompletionResponse, ApiError> {
    self
      .client
      .post(
        &format!("/api/goals/{}/toggle-completion", id),
        &json!({ "date": date }),
      )
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::http::HttpMethod;
  use crate::testing::{ok, sent_json, ScriptedTransport};
  use crate::types::FrequencyType;
  use std::sync::Arc;

  fn goal(id: i64) -> serde_json::Value {
    json!({"id": id, "title": "Run", "frequency_per_week": 3})
  }

  #[tokio::test]
  async fn test_create_sends_normalized_payload() {
    let transport = Arc::new(ScriptedTransport::new().respond(ok(goal(1))));
    let goals = GoalsApi::new(ApiClient::new(transport.clone()));

    let draft = GoalDraft {
      frequency: Some("3 days a week".to_string()),
      ..GoalDraft::titled("Run")
    };
    let created = goals.create_goal(draft).await.unwrap();
    assert_eq!(created.frequency_per_week, Some(3));

    let request = transport.last_request();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "/api/goals");
    assert_eq!(
      sent_json(&request),
      json!({"title": "Run", "frequency_per_week": 3})
    );
  }

  #[tokio::test]
  async fn test_update_normalizes_camel_case() {
    let transport = Arc::new(ScriptedTransport::new().respond(ok(goal(2))));
    let goals = GoalsApi::new(ApiClient::new(transport.clone()));

    let patch = GoalDraft {
      frequency_type_alias: Some(FrequencyType::Daily),
      target_count_alias: Some(9),
      ..GoalDraft::default()
    };
    goals.update_goal(2, patch).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.url, "/api/goals/2");
    assert_eq!(
      sent_json(&request),
      json!({"frequency_type": "daily", "target_count": 9, "frequency_per_week": 7})
    );
  }

  #[tokio::test]
  async fn test_completions_query() {
    let transport = Arc::new(ScriptedTransport::new().always(ok(json!([{"date": "2024-05-01"}]))));
    let goals = GoalsApi::new(ApiClient::new(transport.clone()));

    goals.completions(4, &DateRange::default()).await.unwrap();
    assert_eq!(transport.last_request().url, "/api/goals/4/completions");

    let range = DateRange {
      start: Some("2024-05-01".to_string()),
      end: Some("2024-05-31".to_string()),
    };
    let completions = goals.completions(4, &range).await.unwrap();
    assert_eq!(completions[0].date, "2024-05-01");
    assert_eq!(
      transport.last_request().url,
      "/api/goals/4/completions?start=2024-05-01&end=2024-05-31"
    );
  }

  #[tokio::test]
  async fn test_toggle_and_progress() {
    let transport = Arc::new(
      ScriptedTransport::new()
        .respond(ok(json!({"id": 4, "is_completed": true, "toggled_date": "2024-05-02"})))
        .respond(ok(goal(4))),
    );
    let goals = GoalsApi::new(ApiClient::new(transport.clone()));

    let toggled = goals.toggle_completion(4, "2024-05-02").await.unwrap();
    assert_eq!(toggled.is_completed, Some(true));
    assert_eq!(sent_json(&transport.last_request()), json!({"date": "2024-05-02"}));

    goals.increment_progress(4).await.unwrap();
    assert_eq!(transport.last_request().url, "/api/goals/4/progress");
  }
}
