//! User profile records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The tracked user.
///
/// A single record acts as the implicit current user; the store never holds
/// more than one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Optional avatar image reference
    pub image: Option<String>,
    /// Consecutive-day activity streak
    pub streak: u32,
    /// Profile creation timestamp
    pub joined_at: DateTime<Utc>,
}

impl User {
    /// Create a new user profile joined now.
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            image: None,
            streak: 0,
            joined_at: Utc::now(),
        }
    }
}
