use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationItem {
  pub name: String,
  pub count: u64,
  #[serde(default)]
  pub avg_mood: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakData {
  #[serde(default)]
  pub current_streak: u32,
  #[serde(default)]
  pub longest_streak: u32,
  #[serde(default)]
  pub total_entries: u64,
  #[serde(default)]
  pub recent_dates: Option<Vec<String>>,
}

/// Aggregates served by `GET /api/statistics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
  #[serde(default)]
  pub total_entries: u64,
  #[serde(default)]
  pub average_mood: f64,
  #[serde(default)]
  pub lowest_mood: Option<f64>,
  #[serde(default)]
  pub highest_mood: Option<f64>,
  #[serde(default)]
  pub first_entry_date: Option<String>,
  #[serde(default)]
  pub last_entry_date: Option<String>,
  /// mood score -> number of entries
  #[serde(default)]
  pub mood_distribution: Option<BTreeMap<String, u64>>,
  #[serde(default)]
  pub correlations: Option<Vec<CorrelationItem>>,
  #[serde(default)]
  pub streak: Option<StreakData>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
  #[serde(default)]
  pub current: u32,
  #[serde(default)]
  pub best: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentDay {
  pub date: String,
  pub day_name: String,
  pub has_entry: bool,
  pub is_today: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakDetails {
  #[serde(default)]
  pub current_streak: u32,
  #[serde(default)]
  pub longest_streak: u32,
  #[serde(default)]
  pub streak_dates: Vec<String>,
  #[serde(default)]
  pub missing_dates: Vec<String>,
  #[serde(default)]
  pub recent_days: Option<Vec<RecentDay>>,
}
