//! In-memory stand-in for the Twilight backend.
//!
//! Selected at startup with `api.mock` (or `TWILIGHT_MOCK_MODE=true`). It
//! answers the routes the journal uses day to day from seeded demo data and
//! keeps writes for the life of the process. Other GETs return `[]`; other
//! writes return 404.

mod seed;

use chrono::{Local, NaiveDate, Utc};
use futures::future::BoxFuture;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;

use crate::http::url::normalize_base_url;
use crate::http::{Body, HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

pub struct MockTransport {
  state: Mutex<MockState>,
  latency: Duration,
  /// Path prefix of the client's base URL, removed before routing
  base_path: String,
}

impl MockTransport {
  /// Demo data dated relative to the local calendar day.
  pub fn new() -> Self {
    Self::seeded(Local::now().date_naive())
  }

  /// Demo data dated relative to `today`.
  pub fn seeded(today: NaiveDate) -> Self {
    Self {
      state: Mutex::new(MockState::new(today)),
      latency: Duration::ZERO,
      base_path: String::new(),
    }
  }

  /// Delay every response, to make loading states visible.
  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = latency;
    self
  }

  /// Route requests made by a client configured with this base URL.
  pub fn with_base_url(mut self, raw: Option<&str>) -> Self {
    let base = normalize_base_url(raw);
    let path = match url::Url::parse(&base) {
      Ok(parsed) => parsed.path().to_string(),
      Err(_) => base,
    };
    self.base_path = path.trim_end_matches('/').to_string();
    self
  }

  fn state(&self) -> MutexGuard<'_, MockState> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn handle(&self, request: &HttpRequest) -> HttpResponse {
    let body = match &request.body {
      Body::Json(text) => serde_json::from_str(text).unwrap_or(Value::Null),
      _ => Value::Null,
    };
    let path = strip_base(&request_path(&request.url), &self.base_path);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let response = self.state().route(request.method, &segments, body);
    debug!("Mock {} {} -> {}", request.method, request.url, response.status);
    response
  }
}

impl Default for MockTransport {
  fn default() -> Self {
    Self::new()
  }
}

impl Transport for MockTransport {
  fn send(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, TransportError>> {
    Box::pin(async move {
      if !self.latency.is_zero() {
        tokio::time::sleep(self.latency).await;
      }
      Ok(self.handle(&request))
    })
  }
}

/// Path of an absolute or relative URL, without the query string.
fn request_path(url: &str) -> String {
  let path = match url::Url::parse(url) {
    Ok(parsed) => parsed.path().to_string(),
    Err(_) => url.to_string(),
  };
  match path.split_once('?') {
    Some((path, _)) => path.to_string(),
    None => path,
  }
}

fn strip_base(path: &str, base: &str) -> String {
  if base.is_empty() {
    return path.to_string();
  }
  match path.strip_prefix(base) {
    Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.to_string(),
    _ => path.to_string(),
  }
}

fn ok(body: Value) -> HttpResponse {
  HttpResponse::json(200, &body)
}

fn created(body: Value) -> HttpResponse {
  HttpResponse::json(201, &body)
}

fn error(status: u16, message: &str) -> HttpResponse {
  HttpResponse::json(status, &json!({ "error": message }))
}

fn not_found() -> HttpResponse {
  error(404, "Not found")
}

fn now() -> String {
  Utc::now().to_rfc3339()
}

fn parse_id(raw: &str) -> Option<i64> {
  raw.parse().ok()
}

fn has_id(item: &Value, id: i64) -> bool {
  item["id"].as_i64() == Some(id)
}

/// Copy `keys` present in `patch` onto `target`.
fn merge(target: &mut Value, patch: &Value, keys: &[&str]) {
  let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) else {
    return;
  };
  for key in keys {
    if let Some(value) = patch.get(*key) {
      target.insert(key.to_string(), value.clone());
    }
  }
}

struct MockState {
  today: NaiveDate,
  next_id: i64,
  entries: Vec<Value>,
  groups: Vec<Value>,
  goals: Vec<Value>,
  completions: BTreeMap<i64, BTreeSet<String>>,
  reminders: Vec<Value>,
  definitions: Vec<Value>,
}

impl MockState {
  fn new(today: NaiveDate) -> Self {
    let groups = seed::groups();
    Self {
      today,
      next_id: 1000,
      entries: seed::entries(today, &groups),
      groups,
      goals: seed::goals(today),
      completions: BTreeMap::new(),
      reminders: Vec::new(),
      definitions: seed::mood_definitions(),
    }
  }

  fn next_id(&mut self) -> i64 {
    self.next_id += 1;
    self.next_id
  }

  fn route(&mut self, method: HttpMethod, path: &[&str], body: Value) -> HttpResponse {
    use HttpMethod::{Delete, Get, Post, Put};

    match (method, path) {
      (Get, ["api", "config"]) => ok(json!({
        "enable_google_oauth": false,
        "enable_local_login": true,
        "enable_registration": false,
        "features": []
      })),
      (Post, ["api", "auth", "google" | "login" | "register"])
      | (Post, ["api", "auth", "local", "login"]) => {
        ok(json!({ "token": seed::TOKEN, "user": seed::user() }))
      }
      (Post, ["api", "auth", "verify"]) => ok(json!({ "valid": true, "user": seed::user() })),

      (Get, ["api", "moods"]) => ok(self.sorted_entries()),
      (Post, ["api", "mood"]) => self.create_entry(&body),
      (Put, ["api", "mood", raw]) => match parse_id(raw) {
        Some(entry_id) => self.update_entry(entry_id, &body),
        None => not_found(),
      },
      (Delete, ["api", "mood", raw]) => {
        let entry_id = parse_id(raw);
        self.entries.retain(|e| e["id"].as_i64() != entry_id);
        ok(json!({ "message": "Entry deleted" }))
      }
      (Get, ["api", "mood", raw, field @ ("selections" | "media")]) => {
        let found = parse_id(raw).and_then(|entry_id| self.entries.iter().find(|e| has_id(e, entry_id)));
        ok(found.map(|e| e[*field].clone()).unwrap_or_else(|| json!([])))
      }

      (Get, ["api", "statistics"]) => ok(self.statistics()),
      (Get, ["api", "streak"]) => {
        let (current, best) = self.streaks();
        ok(json!({ "current": current, "best": best }))
      }
      (Get, ["api", "streak", "details"]) => ok(self.streak_details()),

      (Get, ["api", "groups"]) => ok(Value::Array(self.groups.clone())),
      (Post, ["api", "groups"]) => self.create_group(&body),
      (Post, ["api", "groups", raw, "options"]) => match parse_id(raw) {
        Some(group_id) => self.create_option(group_id, &body),
        None => not_found(),
      },
      (Delete, ["api", "groups", raw]) => {
        let group_id = parse_id(raw);
        self.groups.retain(|g| g["id"].as_i64() != group_id);
        ok(json!({ "message": "Group deleted" }))
      }
      (Delete, ["api", "options", raw]) => {
        if let Some(option_id) = parse_id(raw) {
          self.take_option(option_id);
        }
        ok(json!({ "message": "Option deleted" }))
      }
      (Put, ["api", "options", raw, "move"]) => match parse_id(raw) {
        Some(option_id) => self.move_option(option_id, &body),
        None => not_found(),
      },

      (Get, ["api", "goals"]) => ok(Value::Array(self.goals.clone())),
      (Post, ["api", "goals"]) => self.create_goal(&body),
      (Put, ["api", "goals", raw]) => match parse_id(raw).and_then(|g| self.goal_mut(g)) {
        Some(goal) => {
          merge(
            goal,
            &body,
            &[
              "title",
              "description",
              "frequency_per_week",
              "frequency_type",
              "target_count",
              "custom_days",
              "is_archived",
            ],
          );
          ok(goal.clone())
        }
        None => error(404, "Goal not found"),
      },
      (Delete, ["api", "goals", raw]) => {
        let goal_id = parse_id(raw);
        self.goals.retain(|g| g["id"].as_i64() != goal_id);
        ok(json!({ "message": "Goal deleted" }))
      }
      (Post, ["api", "goals", raw, "progress"]) => match parse_id(raw).and_then(|g| self.goal_mut(g)) {
        Some(goal) => {
          let completed = goal["completed"].as_u64().unwrap_or(0) + 1;
          goal["completed"] = json!(completed);
          ok(goal.clone())
        }
        None => error(404, "Goal not found"),
      },
      (Get, ["api", "goals", raw, "completions"]) => {
        let goal_id = parse_id(raw).unwrap_or_default();
        let dates = self.completions.get(&goal_id).cloned().unwrap_or_default();
        let rows: Vec<Value> = dates
          .into_iter()
          .map(|date| json!({ "goal_id": goal_id, "date": date }))
          .collect();
        ok(Value::Array(rows))
      }
      (Post, ["api", "goals", raw, "toggle-completion"]) => match parse_id(raw) {
        Some(goal_id) => self.toggle_completion(goal_id, &body),
        None => not_found(),
      },

      (Get, ["api", "reminders"]) => ok(Value::Array(self.reminders.clone())),
      (Post, ["api", "reminders"]) => self.create_reminder(&body),
      (Put, ["api", "reminders", raw]) => {
        let reminder_id = parse_id(raw).unwrap_or_default();
        match self.reminders.iter_mut().find(|r| has_id(r, reminder_id)) {
          Some(reminder) => {
            merge(reminder, &body, &["time", "days", "message", "goal_id", "is_active"]);
            reminder["updated_at"] = json!(now());
            ok(json!({ "status": "updated" }))
          }
          None => error(404, "Reminder not found"),
        }
      }
      (Delete, ["api", "reminders", raw]) => {
        let reminder_id = parse_id(raw);
        self.reminders.retain(|r| r["id"].as_i64() != reminder_id);
        ok(json!({ "status": "deleted" }))
      }

      (Get, ["api", "mood-definitions"]) => ok(Value::Array(self.definitions.clone())),
      (Put, ["api", "mood-definitions", raw]) => {
        let score = raw.parse::<u64>().ok();
        match self
          .definitions
          .iter_mut()
          .find(|d| d["score"].as_u64() == score)
        {
          Some(definition) => {
            merge(definition, &body, &["label", "color", "description"]);
            ok(definition.clone())
          }
          None => error(404, "Mood definition not found"),
        }
      }

      (Get, _) => ok(json!([])),
      _ => not_found(),
    }
  }

  fn sorted_entries(&self) -> Value {
    let mut entries = self.entries.clone();
    let key = |e: &Value| {
      (
        e["date"].as_str().unwrap_or_default().to_string(),
        e["created_at"].as_str().unwrap_or_default().to_string(),
      )
    };
    entries.sort_by_key(|e| std::cmp::Reverse(key(e)));
    Value::Array(entries)
  }

  fn options_for(&self, ids: &Value) -> Vec<Value> {
    let Some(ids) = ids.as_array() else {
      return Vec::new();
    };
    ids
      .iter()
      .filter_map(Value::as_i64)
      .filter_map(|option_id| {
        self
          .groups
          .iter()
          .flat_map(|g| g["options"].as_array().into_iter().flatten())
          .find(|o| has_id(o, option_id))
          .cloned()
      })
      .collect()
  }

  fn create_entry(&mut self, body: &Value) -> HttpResponse {
    let Some(mood) = body["mood"].as_u64().filter(|m| (1..=5).contains(m)) else {
      return error(400, "mood must be between 1 and 5");
    };

    let entry_id = self.next_id();
    let stamp = now();
    let date = body["date"]
      .as_str()
      .map(str::to_string)
      .unwrap_or_else(|| self.today.format("%Y-%m-%d").to_string());
    let selections = self.options_for(&body["selected_options"]);

    self.entries.push(json!({
      "id": entry_id,
      "user_id": seed::USER_ID,
      "date": date,
      "mood": mood,
      "content": body["content"].as_str().unwrap_or(""),
      "time": body["time"].clone(),
      "created_at": stamp,
      "updated_at": stamp,
      "selections": selections,
      "media": []
    }));

    created(json!({
      "status": "success",
      "entry_id": entry_id,
      "new_achievements": [],
      "message": "Entry saved"
    }))
  }

  fn update_entry(&mut self, entry_id: i64, body: &Value) -> HttpResponse {
    let selections = body
      .get("selected_options")
      .map(|ids| self.options_for(ids));

    let Some(entry) = self.entries.iter_mut().find(|e| has_id(e, entry_id)) else {
      return error(404, "Entry not found");
    };
    merge(entry, body, &["mood", "content", "date", "time"]);
    if let Some(selections) = selections {
      entry["selections"] = Value::Array(selections);
    }
    entry["updated_at"] = json!(now());

    ok(json!({
      "status": "success",
      "message": "Entry updated",
      "entry": entry.clone()
    }))
  }

  fn entry_dates(&self) -> BTreeSet<NaiveDate> {
    self
      .entries
      .iter()
      .filter_map(|e| e["date"].as_str())
      .filter_map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
      .collect()
  }

  /// Current and longest run of consecutive days with an entry. The current
  /// run may end yesterday if nothing is logged yet today.
  fn streaks(&self) -> (u32, u32) {
    let dates = self.entry_dates();

    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for &date in &dates {
      run = match previous {
        Some(p) if date.signed_duration_since(p).num_days() == 1 => run + 1,
        _ => 1,
      };
      best = best.max(run);
      previous = Some(date);
    }

    let mut day = if dates.contains(&self.today) {
      Some(self.today)
    } else {
      self.today.pred_opt()
    };
    let mut current = 0;
    while let Some(d) = day.filter(|d| dates.contains(d)) {
      current += 1;
      day = d.pred_opt();
    }

    (current, best)
  }

  fn streak_details(&self) -> Value {
    let (current, best) = self.streaks();
    let dates = self.entry_dates();

    let mut streak_dates = Vec::new();
    let mut day = self.today;
    for _ in 0..current {
      if !dates.contains(&day) {
        // run ended yesterday
        day = day.pred_opt().unwrap_or(day);
      }
      streak_dates.push(day.format("%Y-%m-%d").to_string());
      day = day.pred_opt().unwrap_or(day);
    }

    let missing_dates: Vec<String> = match (dates.first(), dates.last()) {
      (Some(first), Some(last)) => first
        .iter_days()
        .take_while(|d| d <= last)
        .filter(|d| !dates.contains(d))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect(),
      _ => Vec::new(),
    };

    json!({
      "current_streak": current,
      "longest_streak": best,
      "streak_dates": streak_dates,
      "missing_dates": missing_dates
    })
  }

  fn statistics(&self) -> Value {
    let moods: Vec<u64> = self.entries.iter().filter_map(|e| e["mood"].as_u64()).collect();
    let total = moods.len();

    let mut distribution = Map::new();
    for score in 1..=5u64 {
      let count = moods.iter().filter(|&&m| m == score).count();
      distribution.insert(score.to_string(), json!(count));
    }

    let average = if total == 0 {
      0.0
    } else {
      let mean = moods.iter().sum::<u64>() as f64 / total as f64;
      (mean * 10.0).round() / 10.0
    };

    let dates = self.entry_dates();
    let format = |d: Option<&NaiveDate>| d.map(|d| d.format("%Y-%m-%d").to_string());
    let (current, best) = self.streaks();

    json!({
      "total_entries": total,
      "average_mood": average,
      "lowest_mood": moods.iter().min(),
      "highest_mood": moods.iter().max(),
      "first_entry_date": format(dates.first()),
      "last_entry_date": format(dates.last()),
      "mood_distribution": distribution,
      "streak": {
        "current_streak": current,
        "longest_streak": best,
        "total_entries": total
      }
    })
  }

  fn create_group(&mut self, body: &Value) -> HttpResponse {
    let Some(name) = body["name"].as_str().filter(|n| !n.is_empty()) else {
      return error(400, "name is required");
    };
    let group = json!({
      "id": self.next_id(),
      "user_id": seed::USER_ID,
      "name": name,
      "emoji": body["emoji"].clone(),
      "options": []
    });
    self.groups.push(group.clone());
    created(group)
  }

  fn create_option(&mut self, group_id: i64, body: &Value) -> HttpResponse {
    let Some(name) = body["name"].as_str().filter(|n| !n.is_empty()) else {
      return error(400, "name is required");
    };
    let option_id = self.next_id();

    let Some(group) = self.groups.iter_mut().find(|g| has_id(g, group_id)) else {
      return error(404, "Group not found");
    };
    let Some(options) = group["options"].as_array_mut() else {
      return error(500, "Malformed group");
    };
    let option = json!({
      "id": option_id,
      "group_id": group_id,
      "name": name,
      "icon": body["icon"].clone(),
      "emoji": body["emoji"].clone(),
      "color": body["color"].clone(),
      "order_index": options.len()
    });
    options.push(option.clone());
    created(option)
  }

  fn take_option(&mut self, option_id: i64) -> Option<Value> {
    for group in &mut self.groups {
      if let Some(options) = group["options"].as_array_mut() {
        if let Some(index) = options.iter().position(|o| has_id(o, option_id)) {
          return Some(options.remove(index));
        }
      }
    }
    None
  }

  fn move_option(&mut self, option_id: i64, body: &Value) -> HttpResponse {
    let Some(target_id) = body["group_id"].as_i64() else {
      return error(400, "group_id is required");
    };
    if !self.groups.iter().any(|g| has_id(g, target_id)) {
      return error(404, "Group not found");
    }
    let Some(mut option) = self.take_option(option_id) else {
      return error(404, "Option not found");
    };

    option["group_id"] = json!(target_id);
    if let Some(options) = self
      .groups
      .iter_mut()
      .find(|g| has_id(g, target_id))
      .and_then(|g| g["options"].as_array_mut())
    {
      option["order_index"] = json!(options.len());
      options.push(option.clone());
    }
    ok(option)
  }

  fn goal_mut(&mut self, goal_id: i64) -> Option<&mut Value> {
    self.goals.iter_mut().find(|g| has_id(g, goal_id))
  }

  fn create_goal(&mut self, body: &Value) -> HttpResponse {
    if body["title"].as_str().map_or(true, str::is_empty) {
      return error(400, "title is required");
    }
    let mut goal = json!({
      "id": self.next_id(),
      "user_id": seed::USER_ID,
      "frequency_per_week": 1,
      "completed": 0,
      "streak": 0,
      "created_at": now()
    });
    merge(
      &mut goal,
      body,
      &[
        "title",
        "description",
        "frequency_per_week",
        "frequency_type",
        "target_count",
        "custom_days",
      ],
    );
    self.goals.push(goal.clone());
    created(goal)
  }

  fn toggle_completion(&mut self, goal_id: i64, body: &Value) -> HttpResponse {
    if self.goal_mut(goal_id).is_none() {
      return error(404, "Goal not found");
    }
    let date = body["date"]
      .as_str()
      .map(str::to_string)
      .unwrap_or_else(|| self.today.format("%Y-%m-%d").to_string());

    let dates = self.completions.entry(goal_id).or_default();
    let is_completed = if dates.remove(&date) {
      false
    } else {
      dates.insert(date.clone());
      true
    };
    let completed = dates.len();
    let today = self.today.format("%Y-%m-%d").to_string();
    let done_today = dates.contains(&today);

    if let Some(goal) = self.goal_mut(goal_id) {
      goal["completed"] = json!(completed);
      goal["already_completed_today"] = json!(done_today);
    }

    ok(json!({
      "id": goal_id,
      "completed": completed,
      "is_completed": is_completed,
      "already_completed_today": done_today,
      "toggled_date": date
    }))
  }

  fn create_reminder(&mut self, body: &Value) -> HttpResponse {
    let Some(time) = body["time"].as_str() else {
      return error(400, "time is required");
    };
    let reminder_id = self.next_id();
    let stamp = now();
    let days = match body["days"].as_array() {
      Some(days) => Value::Array(days.clone()),
      None => json!([0, 1, 2, 3, 4, 5, 6]),
    };

    self.reminders.push(json!({
      "id": reminder_id,
      "time": time,
      "days": days,
      "message": body["message"].as_str().unwrap_or("Time to log your mood!"),
      "goal_id": body["goal_id"].clone(),
      "is_active": body["is_active"].as_bool().unwrap_or(true),
      "created_at": stamp,
      "updated_at": stamp
    }));

    created(json!({ "status": "created", "id": reminder_id }))
  }
}
