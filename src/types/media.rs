use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
  pub id: i64,
  #[serde(default)]
  pub entry_id: Option<i64>,
  pub file_path: String,
  #[serde(default)]
  pub file_type: Option<String>,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default)]
  pub thumbnail_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryPhoto {
  #[serde(flatten)]
  pub media: Media,
  pub entry_date: String,
  pub entry_mood: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryPage {
  #[serde(default)]
  pub photos: Vec<GalleryPhoto>,
  #[serde(default)]
  pub total: u64,
  #[serde(default)]
  pub has_more: bool,
}

/// Paging and date filters for the photo gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryQuery {
  pub limit: u32,
  pub offset: u32,
  pub start_date: Option<String>,
  pub end_date: Option<String>,
}

impl Default for GalleryQuery {
  fn default() -> Self {
    Self {
      limit: 50,
      offset: 0,
      start_date: None,
      end_date: None,
    }
  }
}
