//! Typed endpoint wrappers, one per resource area, and the `Twilight`
//! facade that hands them out over a single shared client.

mod analytics;
mod auth;
mod goal_payload;
mod goals;
mod groups;
mod important_days;
mod media;
mod moods;
mod scales;
mod settings;
mod statistics;

pub use analytics::AnalyticsApi;
pub use auth::AuthApi;
pub use goal_payload::normalize_goal;
pub use goals::GoalsApi;
pub use groups::GroupsApi;
pub use important_days::ImportantDaysApi;
pub use media::MediaApi;
pub use moods::MoodsApi;
pub use scales::{SaveScalesResponse, ScalesApi};
pub use settings::SettingsApi;
pub use statistics::StatisticsApi;

use crate::client::ApiClient;
use crate::types::MaybeWrapped;

/// Entry from an update response that may or may not wrap it in `{entry}`.
pub fn unwrap_entry<T>(response: MaybeWrapped<T>) -> T {
  response.into_inner()
}

/// Every endpoint area over one client, so token, cache and in-flight
/// requests are shared.
#[derive(Clone)]
pub struct Twilight {
  client: ApiClient,
}

impl Twilight {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  pub fn client(&self) -> &ApiClient {
    &self.client
  }

  pub fn set_auth_token(&self, token: impl Into<String>) {
    self.client.set_auth_token(token);
  }

  pub fn clear_auth_token(&self) {
    self.client.clear_auth_token();
  }

  pub fn invalidate_cache(&self, pattern: Option<&str>) {
    self.client.invalidate_cache(pattern);
  }

  pub fn auth(&self) -> AuthApi {
    AuthApi::new(self.client.clone())
  }

  pub fn moods(&self) -> MoodsApi {
    MoodsApi::new(self.client.clone())
  }

  pub fn statistics(&self) -> StatisticsApi {
    StatisticsApi::new(self.client.clone())
  }

  pub fn groups(&self) -> GroupsApi {
    GroupsApi::new(self.client.clone())
  }

  pub fn goals(&self) -> GoalsApi {
    GoalsApi::new(self.client.clone())
  }

  pub fn media(&self) -> MediaApi {
    MediaApi::new(self.client.clone())
  }

  pub fn analytics(&self) -> AnalyticsApi {
    AnalyticsApi::new(self.client.clone())
  }

  pub fn scales(&self) -> ScalesApi {
    ScalesApi::new(self.client.clone())
  }

  pub fn important_days(&self) -> ImportantDaysApi {
    ImportantDaysApi::new(self.client.clone())
  }

  pub fn settings(&self) -> SettingsApi {
    SettingsApi::new(self.client.clone())
  }
}
