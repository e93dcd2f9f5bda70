use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use twilight::{ApiClient, ApiError, FilePart, ReqwestTransport, RetryPolicy, Twilight};

#[derive(Clone, Default)]
struct Counters {
  flaky: Arc<AtomicUsize>,
  streak: Arc<AtomicUsize>,
}

async fn streak(State(counters): State<Counters>, headers: HeaderMap) -> impl IntoResponse {
  counters.streak.fetch_add(1, Ordering::SeqCst);
  let auth = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok());
  match auth {
    Some("Bearer tok") => (StatusCode::OK, Json(json!({"current": 2, "best": 5}))),
    _ => (
      StatusCode::UNAUTHORIZED,
      Json(json!({"error": "Invalid token"})),
    ),
  }
}

async fn login(Json(body): Json<Value>) -> Json<Value> {
  let username = body["username"].as_str().unwrap_or_default();
  Json(json!({
    "token": format!("tok-{}", username),
    "user": {"id": 7, "name": username}
  }))
}

async fn upload(Path(entry_id): Path<i64>, headers: HeaderMap, body: String) -> impl IntoResponse {
  let content_type = headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .unwrap_or_default();
  if !content_type.starts_with("multipart/form-data; boundary=") {
    return (
      StatusCode::BAD_REQUEST,
      Json(json!({"error": format!("bad content type: {}", content_type)})),
    );
  }
  if !body.contains("name=\"file\"") || !body.contains("filename=\"sunset.jpg\"") {
    return (StatusCode::BAD_REQUEST, Json(json!({"error": "no file"})));
  }
  (
    StatusCode::CREATED,
    Json(json!({"id": 1, "entry_id": entry_id, "file_path": "uploads/sunset.jpg"})),
  )
}

async fn missing() -> impl IntoResponse {
  (StatusCode::NOT_FOUND, Json(json!({"error": "Entry not found"})))
}

async fn html() -> Html<&'static str> {
  Html("<html>maintenance</html>")
}

async fn flaky(State(counters): State<Counters>) -> impl IntoResponse {
  if counters.flaky.fetch_add(1, Ordering::SeqCst) == 0 {
    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": "warming up"})))
  } else {
    (StatusCode::OK, Json(json!({"ok": true})))
  }
}

async fn serve() -> (String, Counters) {
  let counters = Counters::default();
  let app = Router::new()
    .route("/api/streak", get(streak))
    .route("/api/auth/login", post(login))
    .route("/api/mood/{id}/media", post(upload))
    .route("/api/mood/404", get(missing))
    .route("/status", get(html))
    .route("/api/flaky", get(flaky))
    .with_state(counters.clone());

  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });

  (format!("http://{}", addr), counters)
}

fn client_for(origin: &str) -> ApiClient {
  let transport = ReqwestTransport::new(origin, Some(Duration::from_secs(5))).unwrap();
  ApiClient::builder(Arc::new(transport))
    .retry(RetryPolicy::new(3, Duration::from_millis(10)))
    .build()
}

#[tokio::test]
async fn bearer_token_is_sent_and_response_cached() {
  let (origin, counters) = serve().await;
  let twilight = Twilight::new(client_for(&origin));

  let err = twilight.statistics().current_streak().await.unwrap_err();
  assert_eq!(err.status(), Some(401));
  assert_eq!(err.to_string(), "Invalid token");

  twilight.set_auth_token("tok");
  let streak = twilight.statistics().current_streak().await.unwrap();
  assert_eq!((streak.current, streak.best), (2, 5));

  twilight.statistics().current_streak().await.unwrap();
  assert_eq!(counters.streak.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn json_body_round_trip() {
  let (origin, _) = serve().await;
  let twilight = Twilight::new(client_for(&origin));

  let auth = twilight.auth().login("ana", "secret").await.unwrap();
  assert_eq!(auth.token, "tok-ana");
  assert_eq!(auth.user.id, 7);
}

#[tokio::test]
async fn multipart_upload_sets_its_own_boundary() {
  let (origin, _) = serve().await;
  let twilight = Twilight::new(client_for(&origin));

  let file = FilePart::new("sunset.jpg", b"not really a jpeg".to_vec()).with_mime("image/jpeg");
  let media = twilight.media().upload(12, file).await.unwrap();

  assert_eq!(media.entry_id, Some(12));
  assert_eq!(media.file_path, "uploads/sunset.jpg");
}

#[tokio::test]
async fn not_found_carries_server_message() {
  let (origin, _) = serve().await;
  let client = client_for(&origin);

  let err = client.get::<Value>("/api/mood/404").await.unwrap_err();
  assert!(err.is_not_found());
  assert_eq!(err.to_string(), "Entry not found");
}

#[tokio::test]
async fn html_success_is_rejected() {
  let (origin, _) = serve().await;
  let client = client_for(&origin);

  let err = client.get::<Value>("/status").await.unwrap_err();
  match err {
    ApiError::UnexpectedContentType { content_type, snippet } => {
      assert!(content_type.starts_with("text/html"));
      assert_eq!(snippet, "<html>maintenance</html>");
    }
    other => panic!("unexpected error: {:?}", other),
  }
}

#[tokio::test]
async fn server_errors_are_retried() {
  let (origin, counters) = serve().await;
  let client = client_for(&origin);

  let value: Value = client.get("/api/flaky").await.unwrap();
  assert_eq!(value, json!({"ok": true}));
  assert_eq!(counters.flaky.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn absolute_base_url_ignores_origin() {
  let (origin, _) = serve().await;
  let transport = ReqwestTransport::new("http://127.0.0.1:9", None).unwrap();
  let client = ApiClient::builder(Arc::new(transport))
    .base_url(Some(&format!("'{}/'", origin)))
    .token(Some("tok".to_string()))
    .build();

  let streak: Value = client.get("/api/streak").await.unwrap();
  assert_eq!(streak["best"], 5);
}

#[tokio::test]
async fn connection_refused_is_a_network_error() {
  let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
  let origin = format!("http://{}", listener.local_addr().unwrap());
  drop(listener);

  let client = client_for(&origin);
  let err = client.get::<Value>("/api/moods").await.unwrap_err();
  assert!(matches!(err, ApiError::Network(_)));
}
