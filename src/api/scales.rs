use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::url::QueryParams;
use crate::types::{MessageResponse, NewScale, Scale, ScaleEntry, ScaleUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SaveScalesResponse {
  #[serde(default)]
  pub success: bool,
}

#[derive(Clone)]
pub struct ScalesApi {
  client: ApiClient,
}

impl ScalesApi {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  pub async fn scales(&self) -> Result<Vec<Scale>, ApiError> {
    self.client.get("/api/scales").await
  }

  pub async fn create_scale(&self, scale: &NewScale) -> Result<Scale, ApiError> {
    self.client.post("/api/scales", scale).await
  }

  pub async fn update_scale(&self, id: i64, update: &ScaleUpdate) -> Result<Scale, ApiError> {
    self.client.put(&format!("/api/scales/{}", id), update).await
  }

  pub async fn delete_scale(&self, id: i64) -> Result<MessageResponse, ApiError> {
    self.client.delete(&format!("/api/scales/{}", id)).await
  }

  /// Recorded values, optionally limited to a date range
  pub async fn entries(
    &self,
    start_date: Option<&str>,
    end_date: Option<&str>,
  ) -> Result<Vec<ScaleEntry>, ApiError> {
    let query = QueryParams::new()
      .push_opt("start_date", start_date.filter(|s| !s.is_empty()))
      .push_opt("end_date", end_date.filter(|s| !s.is_empty()));
    self.client.get(&query.append_to("/api/scales/entries")).await
  }

  pub async fn entry_scales(&self, entry_id: i64) -> Result<Vec<ScaleEntry>, ApiError> {
    self.client.get(&format!("/api/entries/{}/scales", entry_id)).await
  }

  /// Replace an entry's values; `values` maps scale id to value.
  pub async fn save_entry_scales(
    &self,
    entry_id: i64,
    values: &BTreeMap<i64, i64>,
  ) -> Result<SaveScalesResponse, ApiError> {
    self
      .client
      .post(
        &format!("/api/entries/{}/scales", entry_id),
        &json!({ "scales": values }),
      )
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{ok, sent_json, ScriptedTransport};
  use std::sync::Arc;

  #[tokio::test]
  async fn test_save_entry_scales_body() {
    let transport = Arc::new(ScriptedTransport::new().respond(ok(json!({"success": true}))));
    let scales = ScalesApi::new(ApiClient::new(transport.clone()));

    let values = BTreeMap::from([(1, 7), (4, 2)]);
    let saved = scales.save_entry_scales(12, &values).await.unwrap();
    assert!(saved.success);

    let request = transport.last_request();
    assert_eq!(request.url, "/api/entries/12/scales");
    assert_eq!(sent_json(&request), json!({"scales": {"1": 7, "4": 2}}));
  }

  #[tokio::test]
  async fn test_entries_range_query() {
    let transport = Arc::new(ScriptedTransport::new().always(ok(json!([]))));
    let scales = ScalesApi::new(ApiClient::new(transport.clone()));

    scales.entries(None, None).await.unwrap();
    assert_eq!(transport.last_request().url, "/api/scales/entries");

    scales.entries(None, Some("2024-06-30")).await.unwrap();
    assert_eq!(
      transport.last_request().url,
      "/api/scales/entries?end_date=2024-06-30"
    );
  }

  #[tokio::test]
  async fn test_update_scale_sends_only_changes() {
    let transport = Arc::new(ScriptedTransport::new().respond(ok(json!({
      "id": 2, "name": "Sleep", "min_value": 1, "max_value": 10, "is_active": false
    }))));
    let scales = ScalesApi::new(ApiClient::new(transport.clone()));

    let update = ScaleUpdate {
      is_active: Some(false),
      ..Default::default()
    };
    let scale = scales.update_scale(2, &update).await.unwrap();

    assert_eq!(scale.is_active, Some(false));
    assert_eq!(sent_json(&transport.last_request()), json!({"is_active": false}));
  }
}
