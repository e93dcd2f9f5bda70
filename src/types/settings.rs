use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
  #[serde(default)]
  pub user_id: Option<i64>,
  #[serde(default)]
  pub has_pin: bool,
  #[serde(default)]
  pub lock_timeout_seconds: Option<u32>,
  #[serde(default)]
  pub theme: Option<String>,
  #[serde(default)]
  pub notifications_enabled: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
  Common,
  Uncommon,
  Rare,
  Legendary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
  pub id: i64,
  #[serde(default)]
  pub achievement_type: Option<String>,
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub icon: Option<String>,
  #[serde(default)]
  pub unlocked_at: Option<String>,
  #[serde(default)]
  pub rarity: Option<Rarity>,
  #[serde(default)]
  pub secret: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDefinition {
  pub achievement_type: String,
  pub name: String,
  pub description: String,
  pub icon: String,
  pub rarity: Rarity,
  pub category: String,
  pub secret: bool,
  pub target: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementProgress {
  #[serde(flatten)]
  pub definition: AchievementDefinition,
  pub current: u32,
  pub max: u32,
  pub percent: f64,
  pub is_unlocked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckAchievementsResponse {
  #[serde(default)]
  pub new_achievements: Vec<Achievement>,
  #[serde(default)]
  pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResponse {
  #[serde(default)]
  pub message: String,
  #[serde(default)]
  pub stats: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinVerification {
  pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaylioJobStarted {
  pub job_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaylioImportStats {
  #[serde(default)]
  pub total_entries: u64,
  #[serde(default)]
  pub processed_entries: u64,
  #[serde(default)]
  pub imported_entries: u64,
  #[serde(default)]
  pub skipped_duplicates: u64,
  #[serde(default)]
  pub created_groups: u64,
  #[serde(default)]
  pub created_options: u64,
  #[serde(default)]
  pub failed_entries: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaylioImportError {
  pub index: Option<u64>,
  pub reason: String,
}

/// Progress of a background Daylio backup import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaylioImportJob {
  pub job_id: String,
  #[serde(default)]
  pub filename: String,
  /// queued, running, completed or failed
  pub status: String,
  #[serde(default)]
  pub progress: f64,
  #[serde(default)]
  pub dry_run: bool,
  #[serde(default)]
  pub stats: DaylioImportStats,
  #[serde(default)]
  pub errors: Vec<DaylioImportError>,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default)]
  pub started_at: Option<String>,
  #[serde(default)]
  pub finished_at: Option<String>,
}

impl DaylioImportJob {
  pub fn is_finished(&self) -> bool {
    matches!(self.status.as_str(), "completed" | "failed")
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VapidKey {
  #[serde(rename = "publicKey")]
  pub public_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushTestResponse {
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
  pub id: i64,
  pub time: String,
  #[serde(default)]
  pub days: Vec<u8>,
  #[serde(default)]
  pub message: String,
  #[serde(default)]
  pub goal_id: Option<i64>,
  // Older backends only send the camelCase flag
  #[serde(default, alias = "isActive")]
  pub is_active: bool,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default)]
  pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderPayload {
  pub time: String,
  pub days: Vec<u8>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub goal_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub time: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub days: Option<Vec<u8>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub goal_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedReminder {
  #[serde(default)]
  pub status: String,
  pub id: i64,
}
