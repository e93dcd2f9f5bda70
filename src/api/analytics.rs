use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::url::QueryParams;
use crate::types::{AdvancedCorrelation, AnalyticsBatch, CoOccurrence, Correlation, MoodStability};

/// Server-computed insights over the journal.
#[derive(Clone)]
pub struct AnalyticsApi {
  client: ApiClient,
}

impl AnalyticsApi {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  /// How each activity relates to mood
  pub async fn correlations(&self) -> Result<Vec<Correlation>, ApiError> {
    self.client.get("/api/analytics/correlations").await
  }

  pub async fn co_occurrence(&self) -> Result<Vec<CoOccurrence>, ApiError> {
    self.client.get("/api/analytics/co-occurrence").await
  }

  /// Mood variance over the last `days` days (the app uses 30)
  pub async fn stability(&self, days: u32) -> Result<MoodStability, ApiError> {
    let query = QueryParams::new().push("days", days);
    self
      .client
      .get(&query.append_to("/api/analytics/stability"))
      .await
  }

  pub async fn co_occurrence_by_mood(&self, mood: &str) -> Result<Vec<CoOccurrence>, ApiError> {
    self
      .client
      .get(&format!("/api/analytics/co-occurrence/{}", mood))
      .await
  }

  pub async fn advanced_correlations(&self) -> Result<Vec<AdvancedCorrelation>, ApiError> {
    self.client.get("/api/analytics/advanced-correlations").await
  }

  pub async fn batch(&self) -> Result<AnalyticsBatch, ApiError> {
    self.client.get("/api/analytics/batch").await
  }
}
