use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyType {
  Daily,
  Weekly,
  Monthly,
  Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
  pub id: i64,
  #[serde(default)]
  pub user_id: Option<i64>,
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub frequency_per_week: Option<u32>,
  #[serde(default)]
  pub frequency_type: Option<FrequencyType>,
  #[serde(default)]
  pub target_count: Option<u32>,
  // The backend has sent both arrays and comma-joined strings here
  #[serde(default)]
  pub custom_days: Option<serde_json::Value>,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default)]
  pub is_archived: Option<bool>,
  #[serde(default)]
  pub completed: Option<u32>,
  #[serde(default)]
  pub streak: Option<u32>,
  #[serde(default)]
  pub last_completed_date: Option<String>,
  #[serde(default)]
  pub already_completed_today: Option<bool>,
}

/// Goal create/update payload.
///
/// Accepts the historical field spellings (`frequency`, `frequencyNumber`,
/// camelCase aliases); `GoalsApi` normalizes them before sending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalDraft {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub frequency_per_week: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub frequency_type: Option<FrequencyType>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub target_count: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub custom_days: Option<Vec<i64>>,
  #[serde(rename = "frequencyType", skip_serializing_if = "Option::is_none")]
  pub frequency_type_alias: Option<FrequencyType>,
  #[serde(rename = "targetCount", skip_serializing_if = "Option::is_none")]
  pub target_count_alias: Option<u32>,
  #[serde(rename = "customDays", skip_serializing_if = "Option::is_none")]
  pub custom_days_alias: Option<Vec<i64>>,
  /// Legacy free text such as "3 days a week"
  #[serde(skip_serializing_if = "Option::is_none")]
  pub frequency: Option<String>,
  #[serde(rename = "frequencyNumber", skip_serializing_if = "Option::is_none")]
  pub frequency_number: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_archived: Option<bool>,
}

impl GoalDraft {
  pub fn titled(title: impl Into<String>) -> Self {
    Self {
      title: Some(title.into()),
      ..Self::default()
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalCompletion {
  #[serde(default)]
  pub id: Option<i64>,
  #[serde(default)]
  pub goal_id: Option<i64>,
  pub date: String,
  #[serde(default)]
  pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
  pub start: Option<String>,
  pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleCompletionResponse {
  #[serde(default)]
  pub id: Option<i64>,
  #[serde(default)]
  pub completed: Option<u32>,
  #[serde(default)]
  pub frequency_per_week: Option<u32>,
  #[serde(default)]
  pub streak: Option<u32>,
  #[serde(default)]
  pub last_completed_date: Option<String>,
  #[serde(default)]
  pub already_completed_today: Option<bool>,
  #[serde(default)]
  pub is_completed: Option<bool>,
  #[serde(default)]
  pub toggled_date: Option<String>,
}
