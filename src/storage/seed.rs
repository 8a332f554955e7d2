//! Built-in bootstrap data.
//!
//! First runs start from an empty substrate; these catalogs give the app a
//! usable state. Seeding itself lives in the store and is idempotent.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::challenges::types::{Challenge, ChallengeStatus};
use crate::users::User;

/// Default user profile created on first run.
pub fn default_user() -> User {
    User {
        id: Uuid::new_v4(),
        name: "User".to_string(),
        email: "user@example.com".to_string(),
        image: None,
        streak: 12,
        joined_at: Utc::now(),
    }
}

/// The sample challenges seeded into an empty challenge collection.
///
/// Dates are anchored to `now`: two challenges open immediately, the third
/// starts five days out.
pub fn sample_challenges(now: DateTime<Utc>) -> Vec<Challenge> {
    vec![
        Challenge {
            id: Uuid::new_v4(),
            title: "Summer Shred Challenge".to_string(),
            description: "Complete 20 workouts in 30 days and earn a badge.".to_string(),
            start_date: now,
            end_date: now + Duration::days(30),
            status: ChallengeStatus::Active,
            reward: Some("Summer Shred Badge and 500 points".to_string()),
            created_at: now,
            participants: Some(24),
            progress: Some(40),
            total: Some(20),
            completed: Some(8),
            is_joined: Some(false),
        },
        Challenge {
            id: Uuid::new_v4(),
            title: "10K Steps Daily".to_string(),
            description: "Walk 10,000 steps every day for 7 consecutive days.".to_string(),
            start_date: now,
            end_date: now + Duration::days(7),
            status: ChallengeStatus::Active,
            reward: Some("Step Master Badge and 300 points".to_string()),
            created_at: now,
            participants: Some(42),
            progress: Some(71),
            total: Some(7),
            completed: Some(5),
            is_joined: Some(false),
        },
        Challenge {
            id: Uuid::new_v4(),
            title: "30-Day Yoga Journey".to_string(),
            description: "Practice yoga for at least 15 minutes every day for 30 days.".to_string(),
            start_date: now + Duration::days(5),
            end_date: now + Duration::days(35),
            status: ChallengeStatus::Upcoming,
            reward: Some("Yoga Master Badge and 400 points".to_string()),
            created_at: now,
            participants: Some(18),
            progress: None,
            total: None,
            completed: None,
            is_joined: Some(false),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_profile() {
        let user = default_user();
        assert_eq!(user.name, "User");
        assert_eq!(user.email, "user@example.com");
        assert_eq!(user.streak, 12);
        assert!(user.image.is_none());
    }

    #[test]
    fn test_sample_challenge_catalog() {
        let now = Utc::now();
        let challenges = sample_challenges(now);

        assert_eq!(challenges.len(), 3);
        assert_eq!(
            challenges
                .iter()
                .filter(|c| c.status == ChallengeStatus::Active)
                .count(),
            2
        );
        assert_eq!(
            challenges
                .iter()
                .filter(|c| c.status == ChallengeStatus::Upcoming)
                .count(),
            1
        );

        // Every seeded challenge starts unjoined.
        assert!(challenges.iter().all(|c| c.is_joined == Some(false)));

        let shred = &challenges[0];
        assert_eq!(shred.end_date, now + Duration::days(30));
        assert_eq!(shred.total, Some(20));

        let yoga = &challenges[2];
        assert_eq!(yoga.start_date, now + Duration::days(5));
        assert!(yoga.progress.is_none());
        assert!(yoga.total.is_none());
    }
}
