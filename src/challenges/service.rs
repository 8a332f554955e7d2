//! Challenge participation workflows.
//!
//! Sits above the store: joining a challenge, the enriched display list,
//! and joined-challenge queries live here so the store stays a plain
//! collection layer.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::challenges::types::{Challenge, ChallengePatch, ChallengeProgress, ProgressPatch};
use crate::storage::store::{LocalStore, StoreError};

/// Display target used when a challenge carries no target of its own.
const DEFAULT_CHALLENGE_TOTAL: u32 = 20;
/// Participant count shown for challenges that never recorded one.
const DEFAULT_PARTICIPANTS: u32 = 12;

/// Challenge workflow errors.
#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("User not found")]
    UserMissing,

    #[error("Challenge not found: {0}")]
    NotFound(Uuid),

    #[error("Already joined this challenge")]
    AlreadyJoined,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Challenge workflows over a shared store.
pub struct ChallengeService {
    store: Arc<LocalStore>,
}

impl ChallengeService {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }

    /// Join a challenge as the current user.
    ///
    /// Creates the user's participation record, zeroed, with the challenge's
    /// display target (or 20 when it has none), then bumps the challenge's
    /// participant count.
    pub fn join_challenge(&self, challenge_id: Uuid) -> Result<ChallengeProgress, ChallengeError> {
        let user = self.store.user().ok_or(ChallengeError::UserMissing)?;
        let challenge = self
            .store
            .challenge_by_id(challenge_id)
            .ok_or(ChallengeError::NotFound(challenge_id))?;

        if self
            .store
            .user_challenge_progress(user.id, challenge_id)
            .is_some()
        {
            return Err(ChallengeError::AlreadyJoined);
        }

        let progress = self.store.update_challenge_progress(
            user.id,
            challenge_id,
            ProgressPatch {
                progress: Some(0),
                total: Some(challenge.total.unwrap_or(DEFAULT_CHALLENGE_TOTAL)),
                completed: Some(0),
            },
        )?;

        self.store.update_challenge(
            challenge_id,
            ChallengePatch {
                participants: Some(challenge.participants.unwrap_or(0) + 1),
                ..ChallengePatch::default()
            },
        )?;

        tracing::info!("User {} joined challenge {}", user.id, challenge_id);
        Ok(progress)
    }

    /// Every challenge, enriched with the current user's participation state.
    ///
    /// Challenges without display aggregates get them filled from the user's
    /// participation record (zeroes when none exists); `is_joined` always
    /// reflects whether such a record exists.
    pub fn overview(&self) -> Result<Vec<Challenge>, ChallengeError> {
        let user = self.store.user().ok_or(ChallengeError::UserMissing)?;
        self.store.ensure_challenges_exist()?;

        let mut enriched = Vec::new();
        for mut challenge in self.store.challenges() {
            let record = self.store.user_challenge_progress(user.id, challenge.id);
            if challenge.progress.is_none() {
                challenge.progress = Some(record.as_ref().map(|p| p.progress).unwrap_or(0));
                challenge.total = Some(record.as_ref().map(|p| p.total).unwrap_or(0));
                challenge.completed = Some(record.as_ref().map(|p| p.completed).unwrap_or(0));
                challenge.participants = challenge.participants.or(Some(DEFAULT_PARTICIPANTS));
            }
            challenge.is_joined = Some(record.is_some());
            enriched.push(challenge);
        }
        Ok(enriched)
    }

    /// Challenges the current user has joined.
    pub fn joined_challenges(&self) -> Result<Vec<Challenge>, ChallengeError> {
        let user = self.store.user().ok_or(ChallengeError::UserMissing)?;
        let joined = self
            .store
            .challenges()
            .into_iter()
            .filter(|c| {
                self.store
                    .user_challenge_progress(user.id, c.id)
                    .is_some()
            })
            .collect();
        Ok(joined)
    }
}
