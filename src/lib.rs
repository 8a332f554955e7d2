//! FitTrack - Local-First Fitness Tracker
//!
//! A personal fitness tracker core built in Rust. Logs strength, cardio, and
//! flexibility workouts with the exercises performed in them, tracks
//! time-boxed community challenges, and derives training statistics, all on
//! top of a synchronous local key-value store.

pub mod challenges;
pub mod stats;
pub mod storage;
pub mod users;
pub mod workouts;

// Re-export commonly used types
pub use challenges::service::ChallengeService;
pub use challenges::types::{Challenge, ChallengeProgress, ChallengeStatus};
pub use stats::UserStats;
pub use storage::config::AppConfig;
pub use storage::store::LocalStore;
pub use users::User;
pub use workouts::types::{Exercise, Workout, WorkoutType};
