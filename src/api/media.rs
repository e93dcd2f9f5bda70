use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::http::url::QueryParams;
use crate::http::FilePart;
use crate::types::{GalleryPage, GalleryQuery, Media, MessageResponse};

/// Photos attached to entries.
#[derive(Clone)]
pub struct MediaApi {
  client: ApiClient,
}

impl MediaApi {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }

  /// Attach a file to an entry as multipart form field `file`
  pub async fn upload(&self, entry_id: i64, file: FilePart) -> Result<Media, ApiError> {
    let options = RequestOptions::post().multipart(vec![file]);
    self
      .client
      .request(&format!("/api/mood/{}/media", entry_id), options)
      .await
  }

  pub async fn entry_media(&self, entry_id: i64) -> Result<Vec<Media>, ApiError> {
    self.client.get(&format!("/api/mood/{}/media", entry_id)).await
  }

  pub async fn delete_media(&self, media_id: i64) -> Result<MessageResponse, ApiError> {
    self.client.delete(&format!("/api/media/{}", media_id)).await
  }

  pub async fn gallery(&self, query: &GalleryQuery) -> Result<GalleryPage, ApiError> {
    let params = QueryParams::new()
      .push("limit", query.limit)
      .push("offset", query.offset)
      .push_opt("start_date", query.start_date.as_deref().filter(|s| !s.is_empty()))
      .push_opt("end_date", query.end_date.as_deref().filter(|s| !s.is_empty()));
    self.client.get(&params.append_to("/api/media/gallery")).await
  }
}
