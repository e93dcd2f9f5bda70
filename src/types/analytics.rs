use serde::{Deserialize, Serialize};

use super::scales::{Scale, ScaleEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
  pub option_name: String,
  pub average_mood: f64,
  pub count: u64,
  #[serde(default)]
  pub correlation_strength: f64,
}

/// Two activities logged on the same entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoOccurrence {
  pub option1_name: String,
  #[serde(default)]
  pub option1_icon: Option<String>,
  pub option2_name: String,
  #[serde(default)]
  pub option2_icon: Option<String>,
  pub count: u64,
  #[serde(default)]
  pub frequency: Option<u64>,
  #[serde(default)]
  pub average_mood: Option<f64>,
  #[serde(default)]
  pub option1_id: Option<i64>,
  #[serde(default)]
  pub option2_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
  Improving,
  Declining,
  Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityScore {
  pub score: f64,
  pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
  pub date: String,
  pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodStability {
  #[serde(default)]
  pub stability_score: f64,
  #[serde(default)]
  pub variance: f64,
  #[serde(default)]
  pub trend: Option<Trend>,
  #[serde(default)]
  pub score: Option<StabilityScore>,
  #[serde(default)]
  pub trend_data: Option<Vec<TrendPoint>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedCorrelation {
  pub factor: String,
  pub correlation: f64,
  pub confidence: f64,
  pub sample_size: u64,
}

/// Everything the insights screen needs, in one round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsBatch {
  #[serde(default)]
  pub correlations: Vec<Correlation>,
  #[serde(default)]
  pub co_occurrence: Vec<CoOccurrence>,
  #[serde(default)]
  pub scales: Vec<Scale>,
  #[serde(default)]
  pub scale_entries: Vec<ScaleEntry>,
}
