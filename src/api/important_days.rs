use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::url::QueryParams;
use crate::types::{ImportantDay, ImportantDayUpdate, MessageResponse, NewImportantDay};

/// Countdowns, anniversaries and dated reminders.
#[derive(Clone)]
pub struct ImportantDaysApi {
  client: ApiClient,
}

impl ImportantDaysApi {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  pub async fn list(&self) -> Result<Vec<ImportantDay>, ApiError> {
    self.client.get("/api/important-days").await
  }

  pub async fn create(&self, day: &NewImportantDay) -> Result<ImportantDay, ApiError> {
    self.client.post("/api/important-days", day).await
  }

  pub async fn update(&self, id: i64, update: &ImportantDayUpdate) -> Result<ImportantDay, ApiError> {
    self
      .client
      .put(&format!("/api/important-days/{}", id), update)
      .await
  }

  pub async fn delete(&self, id: i64) -> Result<MessageResponse, ApiError> {
    self.client.delete(&format!("/api/important-days/{}", id)).await
  }

  /// Days falling within the next `days_ahead` days
  pub async fn upcoming(&self, days_ahead: u32) -> Result<Vec<ImportantDay>, ApiError> {
    let query = QueryParams::new().push("days", days_ahead);
    self
      .client
      .get(&query.append_to("/api/important-days/upcoming"))
      .await
  }
}
