//! Request and response shapes of the Twilight REST API.

pub mod analytics;
pub mod auth;
pub mod common;
pub mod goals;
pub mod groups;
pub mod important_days;
pub mod media;
pub mod moods;
pub mod scales;
pub mod settings;
pub mod statistics;

pub use analytics::{AdvancedCorrelation, AnalyticsBatch, CoOccurrence, Correlation, MoodStability};
pub use auth::{AuthResponse, VerifyTokenResponse};
pub use common::{MessageResponse, PublicConfig, StatusResponse, User};
pub use goals::{DateRange, FrequencyType, Goal, GoalCompletion, GoalDraft, ToggleCompletionResponse};
pub use groups::{Group, GroupOption, NewGroup, NewGroupOption};
pub use important_days::{ImportantDay, ImportantDayKind, ImportantDayUpdate, NewImportantDay};
pub use media::{GalleryPage, GalleryPhoto, GalleryQuery, Media};
pub use moods::{
  CreateMoodEntryResponse, EntryInclude, MaybeWrapped, MoodDefinition, MoodDefinitionUpdate,
  MoodEntry, MoodEntryInput,
};
pub use scales::{NewScale, Scale, ScaleEntry, ScaleUpdate};
pub use settings::{
  Achievement, AchievementDefinition, AchievementProgress, CheckAchievementsResponse,
  CreatedReminder, DaylioImportJob, DaylioJobStarted, ImportResponse, PinVerification,
  PushTestResponse, Reminder, ReminderPayload, ReminderUpdate, UserSettings, VapidKey,
};
pub use statistics::{Statistics, Streak, StreakDetails};
