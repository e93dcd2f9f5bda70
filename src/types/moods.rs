use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::groups::GroupOption;
use super::media::Media;
use super::scales::ScaleEntry;

/// A journal entry as the API returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
  pub id: i64,
  #[serde(default)]
  pub user_id: Option<i64>,
  pub date: String,
  pub mood: u8,
  #[serde(default)]
  pub content: String,
  #[serde(default)]
  pub time: Option<String>,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default)]
  pub updated_at: Option<String>,
  // Present only when requested through `include`
  #[serde(default)]
  pub media: Option<Vec<Media>>,
  #[serde(default)]
  pub selections: Option<Vec<GroupOption>>,
  #[serde(default)]
  pub scale_entries: Option<Vec<ScaleEntry>>,
}

/// Related data that can be embedded in `GET /api/moods`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryInclude {
  Selections,
  Media,
  Scales,
}

impl EntryInclude {
  pub fn as_str(&self) -> &'static str {
    match self {
      EntryInclude::Selections => "selections",
      EntryInclude::Media => "media",
      EntryInclude::Scales => "scales",
    }
  }
}

/// Payload for creating or updating an entry. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodEntryInput {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mood: Option<u8>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub time: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub selected_options: Option<Vec<i64>>,
  /// scale id -> value
  #[serde(skip_serializing_if = "Option::is_none")]
  pub scale_entries: Option<BTreeMap<i64, i64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMoodEntryResponse {
  #[serde(default)]
  pub status: String,
  #[serde(default)]
  pub entry_id: Option<i64>,
  #[serde(default)]
  pub new_achievements: Vec<serde_json::Value>,
  #[serde(default)]
  pub message: String,
}

/// Some endpoints wrap the entry as `{ "entry": ... }`, others return it bare.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MaybeWrapped<T> {
  Wrapped { entry: T },
  Bare(T),
}

impl<T> MaybeWrapped<T> {
  pub fn into_inner(self) -> T {
    match self {
      MaybeWrapped::Wrapped { entry } => entry,
      MaybeWrapped::Bare(entry) => entry,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodDefinition {
  pub score: u8,
  pub label: String,
  pub color: String,
  #[serde(default)]
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodDefinitionUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub color: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_unwraps_wrapped_and_bare_entries() {
    let entry = json!({"id": 3, "date": "2024-05-01", "mood": 4, "content": "ok"});

    let wrapped: MaybeWrapped<MoodEntry> =
      serde_json::from_value(json!({"entry": entry.clone()})).unwrap();
    let bare: MaybeWrapped<MoodEntry> = serde_json::from_value(entry).unwrap();

    assert_eq!(wrapped.into_inner().id, 3);
    assert_eq!(bare.into_inner().id, 3);
  }

  #[test]
  fn test_entry_input_omits_unset_fields() {
    let input = MoodEntryInput {
      mood: Some(4),
      content: Some("walked".to_string()),
      ..Default::default()
    };
    assert_eq!(
      serde_json::to_value(&input).unwrap(),
      json!({"mood": 4, "content": "walked"})
    );
  }
}
