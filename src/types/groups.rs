use serde::{Deserialize, Serialize};

/// A selectable activity inside a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupOption {
  pub id: i64,
  #[serde(default)]
  pub group_id: Option<i64>,
  pub name: String,
  #[serde(default)]
  pub icon: Option<String>,
  #[serde(default)]
  pub emoji: Option<String>,
  #[serde(default)]
  pub color: Option<String>,
  #[serde(default)]
  pub order_index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
  pub id: i64,
  #[serde(default)]
  pub user_id: Option<i64>,
  pub name: String,
  #[serde(default)]
  pub emoji: Option<String>,
  #[serde(default)]
  pub options: Vec<GroupOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGroup {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub emoji: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGroupOption {
  pub name: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub icon: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub emoji: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub color: Option<String>,
}
