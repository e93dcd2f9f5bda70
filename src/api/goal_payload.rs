use crate::types::{FrequencyType, GoalDraft};

/// Rewrite legacy and camelCase goal fields into the snake_case shape the
/// backend accepts.
pub fn normalize_goal(mut goal: GoalDraft) -> GoalDraft {
  let has_weekly = |g: &GoalDraft| g.frequency_per_week.is_some_and(|n| n != 0);

  if goal.frequency.as_deref().is_some_and(|f| !f.is_empty()) && !has_weekly(&goal) {
    if let Some(n) = goal.frequency.as_deref().and_then(leading_integer) {
      goal.frequency_per_week = Some(n);
    }
    goal.frequency = None;
  }

  if goal.frequency_number.is_some_and(|n| n != 0) && !has_weekly(&goal) {
    goal.frequency_per_week = goal.frequency_number.take();
  }

  if let Some(kind) = goal.frequency_type_alias.take() {
    goal.frequency_type.get_or_insert(kind);
  }

  if let Some(count) = goal.target_count_alias.take() {
    if count != 0 && !goal.target_count.is_some_and(|c| c != 0) {
      goal.target_count = Some(count);
    }
  }

  if let Some(days) = goal.custom_days_alias.take() {
    goal.custom_days.get_or_insert(days);
  }

  if goal
    .frequency_type
    .is_some_and(|kind| kind != FrequencyType::Weekly)
  {
    let target = goal.target_count.or(goal.frequency_per_week).unwrap_or(1);
    goal.frequency_per_week = Some(target.clamp(1, 7));
  }

  if let Some(days) = goal.custom_days.as_mut() {
    days.retain(|d| (0..=6).contains(d));
    days.sort_unstable();
  }

  goal
}

/// Leading decimal integer of a string, ignoring surrounding whitespace:
/// `"3 days a week"` -> 3.
fn leading_integer(text: &str) -> Option<u32> {
  let text = text.trim_start();
  let text = text.strip_prefix('+').unwrap_or(text);
  let end = text
    .find(|c: char| !c.is_ascii_digit())
    .unwrap_or(text.len());
  text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_legacy_frequency_text_becomes_weekly_count() {
    let goal = normalize_goal(GoalDraft {
      frequency: Some("3 days a week".to_string()),
      ..GoalDraft::titled("Run")
    });

    assert_eq!(goal.frequency_per_week, Some(3));
    assert_eq!(goal.frequency, None);
  }

  #[test]
  fn test_unparseable_frequency_is_dropped() {
    let goal = normalize_goal(GoalDraft {
      frequency: Some("often".to_string()),
      ..GoalDraft::titled("Read")
    });

    assert_eq!(goal.frequency_per_week, None);
    assert_eq!(goal.frequency, None);
  }

  #[test]
  fn test_explicit_weekly_count_wins_over_legacy_text() {
    let goal = normalize_goal(GoalDraft {
      frequency: Some("5 days".to_string()),
      frequency_per_week: Some(2),
      ..GoalDraft::default()
    });

    assert_eq!(goal.frequency_per_week, Some(2));
  }

  #[test]
  fn test_frequency_number_maps_to_weekly_count() {
    let goal = normalize_goal(GoalDraft {
      frequency_number: Some(4),
      ..GoalDraft::default()
    });

    assert_eq!(goal.frequency_per_week, Some(4));
    assert_eq!(goal.frequency_number, None);
  }

  #[test]
  fn test_camel_case_aliases_are_renamed() {
    let goal = normalize_goal(GoalDraft {
      frequency_type_alias: Some(FrequencyType::Weekly),
      target_count_alias: Some(2),
      custom_days_alias: Some(vec![5, 1]),
      ..GoalDraft::default()
    });

    assert_eq!(
      serde_json::to_value(&goal).unwrap(),
      json!({"frequency_type": "weekly", "target_count": 2, "custom_days": [1, 5]})
    );
  }

  #[test]
  fn test_snake_case_kept_when_both_spellings_present() {
    let goal = normalize_goal(GoalDraft {
      frequency_type: Some(FrequencyType::Weekly),
      frequency_type_alias: Some(FrequencyType::Daily),
      target_count: Some(3),
      target_count_alias: Some(6),
      ..GoalDraft::default()
    });

    assert_eq!(goal.frequency_type, Some(FrequencyType::Weekly));
    assert_eq!(goal.target_count, Some(3));
    assert_eq!(goal.frequency_type_alias, None);
    assert_eq!(goal.target_count_alias, None);
  }

  #[test]
  fn test_non_weekly_goals_clamp_weekly_count() {
    let daily = normalize_goal(GoalDraft {
      frequency_type: Some(FrequencyType::Daily),
      target_count: Some(10),
      ..GoalDraft::default()
    });
    assert_eq!(daily.frequency_per_week, Some(7));

    let monthly = normalize_goal(GoalDraft {
      frequency_type: Some(FrequencyType::Monthly),
      ..GoalDraft::default()
    });
    assert_eq!(monthly.frequency_per_week, Some(1));

    let custom = normalize_goal(GoalDraft {
      frequency_type: Some(FrequencyType::Custom),
      target_count: Some(0),
      frequency_per_week: Some(5),
      ..GoalDraft::default()
    });
    assert_eq!(custom.frequency_per_week, Some(1));
  }

  #[test]
  fn test_weekly_goal_keeps_its_count() {
    let goal = normalize_goal(GoalDraft {
      frequency_type: Some(FrequencyType::Weekly),
      frequency_per_week: Some(12),
      ..GoalDraft::default()
    });
    assert_eq!(goal.frequency_per_week, Some(12));
  }

  #[test]
  fn test_custom_days_filtered_and_sorted() {
    let goal = normalize_goal(GoalDraft {
      custom_days: Some(vec![6, 9, -1, 0, 3]),
      ..GoalDraft::default()
    });
    assert_eq!(goal.custom_days, Some(vec![0, 3, 6]));
  }

  #[test]
  fn test_leading_integer() {
    assert_eq!(leading_integer("  12x"), Some(12));
    assert_eq!(leading_integer("x12"), None);
    assert_eq!(leading_integer(""), None);
  }
}
