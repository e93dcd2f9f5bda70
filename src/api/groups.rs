use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{Group, GroupOption, MessageResponse, NewGroup, NewGroupOption};

/// Activity groups and their options.
#[derive(Clone)]
pub struct GroupsApi {
  client: ApiClient,
}

impl GroupsApi {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  pub async fn groups(&self) -> Result<Vec<Group>, ApiError> {
    self.client.get("/api/groups").await
  }

  pub async fn create_group(&self, group: &NewGroup) -> Result<Group, ApiError> {
    let created = self.client.post("/api/groups", group).await?;
    self.groups_changed();
    Ok(created)
  }

  pub async fn create_option(
    &self,
    group_id: i64,
    option: &NewGroupOption,
  ) -> Result<GroupOption, ApiError> {
    let created = self
      .client
      .post(&format!("/api/groups/{}/options", group_id), option)
      .await?;
    self.groups_changed();
    Ok(created)
  }

  pub async fn delete_option(&self, option_id: i64) -> Result<MessageResponse, ApiError> {
    let deleted = self.client.delete(&format!("/api/options/{}", option_id)).await?;
    self.groups_changed();
    Ok(deleted)
  }

  /// Move an option into another group
  pub async fn move_option(&self, option_id: i64, group_id: i64) -> Result<GroupOption, ApiError> {
    let moved = self
      .client
      .put(
        &format!("/api/options/{}/move", option_id),
        &json!({ "group_id": group_id }),
      )
      .await?;
    self.groups_changed();
    Ok(moved)
  }

  pub async fn delete_group(&self, group_id: i64) -> Result<MessageResponse, ApiError> {
    let deleted = self.client.delete(&format!("/api/groups/{}", group_id)).await?;
    self.groups_changed();
    Ok(deleted)
  }

  fn groups_changed(&self) {
    self.client.invalidate_cache(Some("/api/groups"));
  }
}
