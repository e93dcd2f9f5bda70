use serde::{Deserialize, Serialize};

/// A user-defined numeric tracker (sleep quality, energy, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
  pub id: i64,
  #[serde(default)]
  pub user_id: Option<i64>,
  pub name: String,
  pub min_value: i64,
  pub max_value: i64,
  #[serde(default)]
  pub min_label: Option<String>,
  #[serde(default)]
  pub max_label: Option<String>,
  #[serde(default)]
  pub color_hex: Option<String>,
  #[serde(default)]
  pub is_active: Option<bool>,
  #[serde(default)]
  pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewScale {
  pub name: String,
  pub min_value: i64,
  pub max_value: i64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub color_hex: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_value: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_value: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_label: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub color_hex: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleEntry {
  #[serde(default)]
  pub id: Option<i64>,
  pub scale_id: i64,
  #[serde(default)]
  pub entry_id: Option<i64>,
  pub value: i64,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub color_hex: Option<String>,
  #[serde(default)]
  pub min_value: Option<i64>,
  #[serde(default)]
  pub max_value: Option<i64>,
  #[serde(default)]
  pub min_label: Option<String>,
  #[serde(default)]
  pub max_label: Option<String>,
  #[serde(default)]
  pub timestamp: Option<String>,
}
