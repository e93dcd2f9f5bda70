use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportantDayKind {
  Countdown,
  Anniversary,
  Reminder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportantDay {
  pub id: i64,
  #[serde(default)]
  pub user_id: Option<i64>,
  pub title: String,
  pub date: String,
  #[serde(rename = "type")]
  pub kind: ImportantDayKind,
  #[serde(default)]
  pub emoji: Option<String>,
  #[serde(default)]
  pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewImportantDay {
  pub title: String,
  pub date: String,
  #[serde(rename = "type")]
  pub kind: ImportantDayKind,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub emoji: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportantDayUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date: Option<String>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<ImportantDayKind>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub emoji: Option<String>,
}
