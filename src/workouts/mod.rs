//! Workout logging module.
//!
//! Logged sessions across the three training categories, plus the exercises
//! recorded against them.

pub mod types;

pub use types::{
    Exercise, ExerciseDraft, ExercisePatch, Workout, WorkoutDraft, WorkoutPatch, WorkoutType,
};
