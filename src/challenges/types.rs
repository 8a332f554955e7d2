//! Challenge and participation record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a challenge.
///
/// The store never advances status on its own; transitions happen only
/// through explicit updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    /// Currently running
    Active,
    /// Not yet started
    Upcoming,
    /// Finished
    Completed,
}

impl ChallengeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeStatus::Active => "active",
            ChallengeStatus::Upcoming => "upcoming",
            ChallengeStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChallengeStatus::Active => write!(f, "Active"),
            ChallengeStatus::Upcoming => write!(f, "Upcoming"),
            ChallengeStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// A community challenge.
///
/// The `participants`, `progress`, `total`, `completed`, and `is_joined`
/// fields are display aggregates carried on the record; the authoritative
/// per-user state lives in [`ChallengeProgress`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Unique identifier
    pub id: Uuid,
    /// Challenge title
    pub title: String,
    /// What participants are asked to do
    pub description: String,
    /// When the challenge opens
    pub start_date: DateTime<Utc>,
    /// When the challenge closes
    pub end_date: DateTime<Utc>,
    /// Lifecycle state
    pub status: ChallengeStatus,
    /// Reward text shown to participants
    pub reward: Option<String>,
    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
    /// Community participant count
    pub participants: Option<u32>,
    /// Display progress value
    pub progress: Option<u32>,
    /// Display target value
    pub total: Option<u32>,
    /// Display completed-unit count
    pub completed: Option<u32>,
    /// Whether the current user has joined
    pub is_joined: Option<bool>,
}

/// Partial update for a challenge. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<ChallengeStatus>,
    pub reward: Option<String>,
    pub participants: Option<u32>,
    pub progress: Option<u32>,
    pub total: Option<u32>,
    pub completed: Option<u32>,
    pub is_joined: Option<bool>,
}

impl ChallengePatch {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title {
            if title.trim().chars().count() < 2 {
                return Err("Title must be at least 2 characters");
            }
        }
        Ok(())
    }

    /// Merge the patch into `challenge`.
    pub fn apply(self, challenge: &mut Challenge) {
        if let Some(title) = self.title {
            challenge.title = title;
        }
        if let Some(description) = self.description {
            challenge.description = description;
        }
        if let Some(start_date) = self.start_date {
            challenge.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            challenge.end_date = end_date;
        }
        if let Some(status) = self.status {
            challenge.status = status;
        }
        if self.reward.is_some() {
            challenge.reward = self.reward;
        }
        if self.participants.is_some() {
            challenge.participants = self.participants;
        }
        if self.progress.is_some() {
            challenge.progress = self.progress;
        }
        if self.total.is_some() {
            challenge.total = self.total;
        }
        if self.completed.is_some() {
            challenge.completed = self.completed;
        }
        if self.is_joined.is_some() {
            challenge.is_joined = self.is_joined;
        }
    }
}

/// One user's participation in one challenge.
///
/// At most one record exists per (user, challenge) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeProgress {
    /// Unique identifier
    pub id: Uuid,
    /// Challenge being tracked
    pub challenge_id: Uuid,
    /// Participating user
    pub user_id: Uuid,
    /// Units of progress accumulated
    pub progress: u32,
    /// Target number of units
    pub total: u32,
    /// Units fully completed
    pub completed: u32,
    /// When the user joined
    pub joined_at: DateTime<Utc>,
}

/// Partial update for a participation record. Applied to an existing record
/// it merges; applied where none exists it describes the fields of a fresh
/// one, with absent counters starting at zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressPatch {
    pub progress: Option<u32>,
    pub total: Option<u32>,
    pub completed: Option<u32>,
}

impl ProgressPatch {
    /// Merge the patch into `record`.
    pub fn apply(self, record: &mut ChallengeProgress) {
        if let Some(progress) = self.progress {
            record.progress = progress;
        }
        if let Some(total) = self.total {
            record.total = total;
        }
        if let Some(completed) = self.completed {
            record.completed = completed;
        }
    }

    /// Build a fresh participation record joined now.
    pub fn into_progress(self, user_id: Uuid, challenge_id: Uuid) -> ChallengeProgress {
        ChallengeProgress {
            id: Uuid::new_v4(),
            challenge_id,
            user_id,
            progress: self.progress.unwrap_or(0),
            total: self.total.unwrap_or(0),
            completed: self.completed.unwrap_or(0),
            joined_at: Utc::now(),
        }
    }
}
