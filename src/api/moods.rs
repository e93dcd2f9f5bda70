use super::unwrap_entry;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::url::QueryParams;
use crate::types::{
  CreateMoodEntryResponse, EntryInclude, GroupOption, MaybeWrapped, MessageResponse,
  MoodDefinition, MoodDefinitionUpdate, MoodEntry, MoodEntryInput,
};

/// Cached views derived from the set of entries.
const ENTRY_DEPENDENTS: [&str; 4] = ["/api/moods", "/api/statistics", "/api/streak", "/api/analytics"];

/// Journal entries and mood definitions.
#[derive(Clone)]
pub struct MoodsApi {
  client: ApiClient,
}

impl MoodsApi {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  /// All entries, optionally embedding related data
  pub async fn entries(&self, include: &[EntryInclude]) -> Result<Vec<MoodEntry>, ApiError> {
    let mut query = QueryParams::new();
    if !include.is_empty() {
      let joined = include
        .iter()
        .map(EntryInclude::as_str)
        .collect::<Vec<_>>()
        .join(",");
      query = query.push("include", joined);
    }
    self.client.get(&query.append_to("/api/moods")).await
  }

  pub async fn create_entry(&self, entry: &MoodEntryInput) -> Result<CreateMoodEntryResponse, ApiError> {
    let created = self.client.post("/api/mood", entry).await?;
    self.entries_changed();
    Ok(created)
  }

  /// Update an entry; the server may answer with the entry bare or wrapped.
  pub async fn update_entry(&self, id: i64, entry: &MoodEntryInput) -> Result<MoodEntry, ApiError> {
    let updated: MaybeWrapped<MoodEntry> = self.client.put(&format!("/api/mood/{}", id), entry).await?;
    self.entries_changed();
    Ok(unwrap_entry(updated))
  }

  pub async fn delete_entry(&self, id: i64) -> Result<MessageResponse, ApiError> {
    let deleted = self.client.delete(&format!("/api/mood/{}", id)).await?;
    self.entries_changed();
    Ok(deleted)
  }

  pub async fn entry_selections(&self, id: i64) -> Result<Vec<GroupOption>, ApiError> {
    self.client.get(&format!("/api/mood/{}/selections", id)).await
  }

  pub async fn definitions(&self) -> Result<Vec<MoodDefinition>, ApiError> {
    self.client.get("/api/mood-definitions").await
  }

  pub async fn update_definition(
    &self,
    score: u8,
    update: &MoodDefinitionUpdate,
  ) -> Result<MoodDefinition, ApiError> {
    let definition = self
      .client
      .put(&format!("/api/mood-definitions/{}", score), update)
      .await?;
    self.client.invalidate_cache(Some("/api/mood-definitions"));
    Ok(definition)
  }

  fn entries_changed(&self) {
    for pattern in ENTRY_DEPENDENTS {
      self.client.invalidate_cache(Some(pattern));
    }
  }
}
