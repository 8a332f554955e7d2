//! Local persistence and query store.
//!
//! Five collections live under fixed string keys on a [`StorageBackend`]:
//! the current user, workouts, exercises, challenges, and challenge
//! progress. Every mutation is a full read-modify-write of one collection;
//! reads decode the whole collection and fall back to an empty default when
//! the key is absent or the content does not parse.

use chrono::{Local, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::challenges::types::{Challenge, ChallengePatch, ChallengeProgress, ProgressPatch};
use crate::stats;
use crate::stats::UserStats;
use crate::storage::backend::{
    BackendError, JsonFileBackend, MemoryBackend, SqliteBackend, StorageBackend,
};
use crate::storage::config::{AppConfig, BackendKind};
use crate::storage::seed;
use crate::users::User;
use crate::workouts::types::{
    Exercise, ExerciseDraft, ExercisePatch, Workout, WorkoutDraft, WorkoutPatch,
};

/// Storage key for the current user record.
const KEY_USER: &str = "user";
/// Storage key for the workout collection.
const KEY_WORKOUTS: &str = "workouts";
/// Storage key for the exercise collection.
const KEY_EXERCISES: &str = "exercises";
/// Storage key for the challenge collection.
const KEY_CHALLENGES: &str = "challenges";
/// Storage key for the challenge progress collection.
const KEY_CHALLENGE_PROGRESS: &str = "challengeProgress";

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User not found")]
    UserMissing,

    #[error("Workout not found: {0}")]
    WorkoutNotFound(Uuid),

    #[error("Exercise not found: {0}")]
    ExerciseNotFound(Uuid),

    #[error("Challenge not found: {0}")]
    ChallengeNotFound(Uuid),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Typed store over a key-value substrate.
///
/// Reads never fail: a missing, unreadable, or corrupt collection degrades
/// to its empty default and is logged. Mutations return errors.
pub struct LocalStore {
    backend: Box<dyn StorageBackend>,
}

impl LocalStore {
    /// Open a store using the substrate selected in `config`.
    pub fn open(config: &AppConfig) -> Result<Self, StoreError> {
        let data_dir = config.resolve_data_dir();
        let backend: Box<dyn StorageBackend> = match config.storage.backend {
            BackendKind::Sqlite => Box::new(SqliteBackend::open(&data_dir.join("fittrack.db"))?),
            BackendKind::Json => Box::new(JsonFileBackend::open(&data_dir)?),
        };
        tracing::info!(
            "Opened {} store in {}",
            config.storage.backend,
            data_dir.display()
        );
        Ok(Self { backend })
    }

    /// Store over an explicit substrate.
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Ephemeral in-memory store.
    pub fn in_memory() -> Self {
        Self {
            backend: Box::new(MemoryBackend::new()),
        }
    }

    /// Read and decode the collection at `key`, falling back to `default`
    /// when the key is absent, the substrate is unreadable, or the content
    /// does not decode.
    fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.read(key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read {} from storage: {}", key, e);
                return default;
            }
        };
        match raw {
            Some(content) => match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Failed to parse {} from storage: {}", key, e);
                    default
                }
            },
            None => default,
        }
    }

    /// Serialize `value` and overwrite whatever is stored at `key`.
    fn store<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let content =
            serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.write(key, &content)?;
        Ok(())
    }

    // ========== User ==========

    /// The current user, when one has been created.
    pub fn user(&self) -> Option<User> {
        self.load(KEY_USER, None)
    }

    /// Persist `user` as the current user, replacing any existing record.
    pub fn set_user(&self, user: &User) -> Result<(), StoreError> {
        self.store(KEY_USER, user)
    }

    // ========== Workouts ==========

    /// All logged workouts.
    pub fn workouts(&self) -> Vec<Workout> {
        self.load(KEY_WORKOUTS, Vec::new())
    }

    /// Look up a single workout.
    pub fn workout_by_id(&self, id: Uuid) -> Option<Workout> {
        self.workouts().into_iter().find(|w| w.id == id)
    }

    /// Log a new workout for the current user.
    pub fn add_workout(&self, draft: WorkoutDraft) -> Result<Workout, StoreError> {
        draft
            .validate()
            .map_err(|e| StoreError::Validation(e.to_string()))?;
        let user = self.user().ok_or(StoreError::UserMissing)?;

        let mut workouts = self.workouts();
        let workout = draft.into_workout(user.id);
        workouts.push(workout.clone());
        self.store(KEY_WORKOUTS, &workouts)?;

        tracing::debug!("Added workout {} for user {}", workout.id, user.id);
        Ok(workout)
    }

    /// Merge `patch` into an existing workout.
    pub fn update_workout(&self, id: Uuid, patch: WorkoutPatch) -> Result<Workout, StoreError> {
        patch
            .validate()
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        let mut workouts = self.workouts();
        let index = workouts
            .iter()
            .position(|w| w.id == id)
            .ok_or(StoreError::WorkoutNotFound(id))?;
        patch.apply(&mut workouts[index]);
        let updated = workouts[index].clone();
        self.store(KEY_WORKOUTS, &workouts)?;
        Ok(updated)
    }

    /// Delete a workout and every exercise recorded against it.
    ///
    /// Deleting an unknown id is a no-op.
    pub fn delete_workout(&self, id: Uuid) -> Result<(), StoreError> {
        let mut workouts = self.workouts();
        workouts.retain(|w| w.id != id);
        self.store(KEY_WORKOUTS, &workouts)?;

        let mut exercises = self.exercises();
        exercises.retain(|e| e.workout_id != id);
        self.store(KEY_EXERCISES, &exercises)?;
        Ok(())
    }

    // ========== Exercises ==========

    /// All recorded exercises.
    pub fn exercises(&self) -> Vec<Exercise> {
        self.load(KEY_EXERCISES, Vec::new())
    }

    /// Exercises recorded against one workout.
    pub fn exercises_by_workout(&self, workout_id: Uuid) -> Vec<Exercise> {
        self.exercises()
            .into_iter()
            .filter(|e| e.workout_id == workout_id)
            .collect()
    }

    /// Record an exercise against `workout_id`.
    ///
    /// The workout is not checked for existence; exercise rows may reference
    /// workouts that no longer exist (or never did) and are simply never
    /// returned by per-workout queries.
    pub fn add_exercise(
        &self,
        workout_id: Uuid,
        draft: ExerciseDraft,
    ) -> Result<Exercise, StoreError> {
        draft
            .validate()
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        let mut exercises = self.exercises();
        let exercise = draft.into_exercise(workout_id);
        exercises.push(exercise.clone());
        self.store(KEY_EXERCISES, &exercises)?;
        Ok(exercise)
    }

    /// Merge `patch` into an existing exercise.
    pub fn update_exercise(&self, id: Uuid, patch: ExercisePatch) -> Result<Exercise, StoreError> {
        patch
            .validate()
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        let mut exercises = self.exercises();
        let index = exercises
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::ExerciseNotFound(id))?;
        patch.apply(&mut exercises[index]);
        let updated = exercises[index].clone();
        self.store(KEY_EXERCISES, &exercises)?;
        Ok(updated)
    }

    /// Delete an exercise. Deleting an unknown id is a no-op.
    pub fn delete_exercise(&self, id: Uuid) -> Result<(), StoreError> {
        let mut exercises = self.exercises();
        exercises.retain(|e| e.id != id);
        self.store(KEY_EXERCISES, &exercises)
    }

    // ========== Challenges ==========

    /// All challenges.
    pub fn challenges(&self) -> Vec<Challenge> {
        self.load(KEY_CHALLENGES, Vec::new())
    }

    /// Look up a single challenge.
    pub fn challenge_by_id(&self, id: Uuid) -> Option<Challenge> {
        self.challenges().into_iter().find(|c| c.id == id)
    }

    /// Merge `patch` into an existing challenge.
    pub fn update_challenge(
        &self,
        id: Uuid,
        patch: ChallengePatch,
    ) -> Result<Challenge, StoreError> {
        patch
            .validate()
            .map_err(|e| StoreError::Validation(e.to_string()))?;

        let mut challenges = self.challenges();
        let index = challenges
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::ChallengeNotFound(id))?;
        patch.apply(&mut challenges[index]);
        let updated = challenges[index].clone();
        self.store(KEY_CHALLENGES, &challenges)?;
        Ok(updated)
    }

    // ========== Challenge progress ==========

    /// All participation records.
    pub fn challenge_progress(&self) -> Vec<ChallengeProgress> {
        self.load(KEY_CHALLENGE_PROGRESS, Vec::new())
    }

    /// One user's participation record for one challenge.
    pub fn user_challenge_progress(
        &self,
        user_id: Uuid,
        challenge_id: Uuid,
    ) -> Option<ChallengeProgress> {
        self.challenge_progress()
            .into_iter()
            .find(|p| p.user_id == user_id && p.challenge_id == challenge_id)
    }

    /// Upsert a participation record for the (user, challenge) pair.
    ///
    /// An existing record is merged with `patch`; otherwise a fresh record is
    /// created with absent counters starting at zero. The pair never ends up
    /// with more than one record.
    pub fn update_challenge_progress(
        &self,
        user_id: Uuid,
        challenge_id: Uuid,
        patch: ProgressPatch,
    ) -> Result<ChallengeProgress, StoreError> {
        let mut records = self.challenge_progress();
        let existing = records
            .iter()
            .position(|p| p.user_id == user_id && p.challenge_id == challenge_id);

        let record = match existing {
            Some(index) => {
                patch.apply(&mut records[index]);
                records[index].clone()
            }
            None => {
                let record = patch.into_progress(user_id, challenge_id);
                records.push(record.clone());
                record
            }
        };
        self.store(KEY_CHALLENGE_PROGRESS, &records)?;
        Ok(record)
    }

    // ========== Statistics ==========

    /// Aggregate training statistics for `user_id`, windowed against the
    /// current local time.
    pub fn user_stats(&self, user_id: Uuid) -> UserStats {
        stats::user_stats(user_id, &self.workouts(), Local::now().fixed_offset())
    }

    // ========== Bootstrap ==========

    /// First-run bootstrap: create the default user when none exists, then
    /// make sure the sample challenges are present. Safe to call on every
    /// startup.
    pub fn initialize_if_empty(&self) -> Result<(), StoreError> {
        if self.user().is_none() {
            let user = seed::default_user();
            tracing::info!("Creating default user {}", user.id);
            self.set_user(&user)?;
        }
        self.ensure_challenges_exist()
    }

    /// Seed the sample challenges when the challenge collection is empty.
    ///
    /// Without a user there is nobody to show them to, so seeding is skipped
    /// (logged, not an error).
    pub fn ensure_challenges_exist(&self) -> Result<(), StoreError> {
        let challenges = self.challenges();
        if !challenges.is_empty() {
            tracing::debug!("Challenges already exist: {}", challenges.len());
            return Ok(());
        }
        if self.user().is_none() {
            tracing::error!("Cannot seed sample challenges: no user found");
            return Ok(());
        }

        let seeded = seed::sample_challenges(Utc::now());
        tracing::info!("Seeding {} sample challenges", seeded.len());
        self.store(KEY_CHALLENGES, &seeded)
    }
}
