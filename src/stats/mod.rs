//! Derived statistics over logged workouts.

pub mod calculator;

pub use calculator::{user_stats, UserStats, WeeklyActivity, WorkoutTypeCounts};
