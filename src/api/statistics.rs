use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Statistics, Streak, StreakDetails};

#[derive(Clone)]
pub struct StatisticsApi {
  client: ApiClient,
}

impl StatisticsApi {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  pub async fn statistics(&self) -> Result<Statistics, ApiError> {
    self.client.get("/api/statistics").await
  }

  pub async fn current_streak(&self) -> Result<Streak, ApiError> {
    self.client.get("/api/streak").await
  }

  pub async fn streak_details(&self) -> Result<StreakDetails, ApiError> {
    self.client.get("/api/streak/details").await
  }
}
