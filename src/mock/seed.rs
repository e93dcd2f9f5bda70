//! Demo data for mock mode.

use chrono::{NaiveDate, TimeDelta};
use serde_json::{json, Value};

pub(super) const USER_ID: i64 = 1;
pub(super) const TOKEN: &str = "mock-token";

pub(super) fn user() -> Value {
  json!({
    "id": USER_ID,
    "name": "Demo User",
    "email": "demo@mock.local",
    "avatar_url": null,
    "email_verified": true
  })
}

const NOTES: [(u8, &str); 14] = [
  (5, "Long run in the park, coffee with a friend afterwards."),
  (4, "Productive day at work, quiet evening."),
  (4, "Cooked a new recipe. It mostly worked."),
  (3, "Nothing special. Slightly tired."),
  (5, "Hiked with family, great weather."),
  (2, "Slept badly and the meeting ran long."),
  (4, "Yoga in the morning helped."),
  (3, "Rainy day, stayed in and read."),
  (4, "Dinner with friends."),
  // day 9 has no entry, which splits the streak
  (0, ""),
  (3, "Busy, a bit scattered."),
  (2, "Headache most of the day."),
  (4, "Weekend trip planning."),
  (5, "Beach day."),
];

/// Option ids picked for each demo entry, by age in days.
const SELECTIONS: [&[i64]; 14] = [
  &[11, 21],
  &[],
  &[],
  &[32],
  &[11, 22],
  &[32],
  &[12],
  &[],
  &[21],
  &[],
  &[],
  &[32],
  &[],
  &[21, 22],
];

pub(super) fn groups() -> Vec<Value> {
  let group = |id: i64, name: &str, emoji: &str, options: &[(i64, &str, &str)]| {
    let options: Vec<Value> = options
      .iter()
      .enumerate()
      .map(|(index, (option_id, option_name, icon))| {
        json!({
          "id": option_id,
          "group_id": id,
          "name": option_name,
          "icon": icon,
          "order_index": index
        })
      })
      .collect();
    json!({"id": id, "user_id": USER_ID, "name": name, "emoji": emoji, "options": options})
  };

  vec![
    group(1, "Exercise", "💪", &[(11, "Running", "Activity"), (12, "Yoga", "Heart")]),
    group(2, "Social", "👥", &[(21, "Friends", "Users"), (22, "Family", "Users")]),
    group(3, "Sleep", "🌙", &[(31, "Good sleep", "Moon"), (32, "Poor sleep", "Moon")]),
  ]
}

pub(super) fn entries(today: NaiveDate, groups: &[Value]) -> Vec<Value> {
  let option = |id: i64| {
    groups
      .iter()
      .flat_map(|g| g["options"].as_array().into_iter().flatten())
      .find(|o| o["id"].as_i64() == Some(id))
      .cloned()
  };

  NOTES
    .iter()
    .zip(SELECTIONS)
    .enumerate()
    .filter(|(_, ((mood, _), _))| *mood > 0)
    .map(|(age, ((mood, note), picked))| {
      let date = today - TimeDelta::days(age as i64);
      let stamp = format!("{}T20:00:00Z", date.format("%Y-%m-%d"));
      let selections: Vec<Value> = picked.iter().filter_map(|id| option(*id)).collect();
      json!({
        "id": 100 + age as i64,
        "user_id": USER_ID,
        "date": date.format("%Y-%m-%d").to_string(),
        "mood": mood,
        "content": note,
        "time": "20:00",
        "created_at": stamp,
        "updated_at": stamp,
        "selections": selections,
        "media": []
      })
    })
    .collect()
}

pub(super) fn goals(today: NaiveDate) -> Vec<Value> {
  let created = (today - TimeDelta::days(30)).format("%Y-%m-%d").to_string();
  vec![
    json!({
      "id": 1,
      "user_id": USER_ID,
      "title": "Exercise 3x per week",
      "description": "Running, yoga or the gym",
      "frequency_per_week": 3,
      "frequency_type": "weekly",
      "target_count": 3,
      "completed": 2,
      "streak": 1,
      "created_at": created
    }),
    json!({
      "id": 2,
      "user_id": USER_ID,
      "title": "Daily reading",
      "description": "At least 30 minutes",
      "frequency_per_week": 7,
      "frequency_type": "daily",
      "target_count": 7,
      "completed": 5,
      "streak": 3,
      "created_at": created
    }),
    json!({
      "id": 3,
      "user_id": USER_ID,
      "title": "Connect with friends",
      "frequency_per_week": 1,
      "frequency_type": "weekly",
      "target_count": 1,
      "completed": 1,
      "streak": 4,
      "created_at": created
    }),
  ]
}

pub(super) fn mood_definitions() -> Vec<Value> {
  [
    (1, "Awful", "#ef4444"),
    (2, "Bad", "#f97316"),
    (3, "Okay", "#eab308"),
    (4, "Good", "#84cc16"),
    (5, "Great", "#22c55e"),
  ]
  .into_iter()
  .map(|(score, label, color)| json!({"score": score, "label": label, "color": color}))
  .collect()
}
