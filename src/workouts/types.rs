//! Workout and exercise record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a logged workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    /// Weight and resistance training
    Strength,
    /// Running, cycling, swimming
    Cardio,
    /// Yoga, stretching, mobility work
    Flexibility,
}

impl WorkoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutType::Strength => "strength",
            WorkoutType::Cardio => "cardio",
            WorkoutType::Flexibility => "flexibility",
        }
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkoutType::Strength => write!(f, "Strength"),
            WorkoutType::Cardio => write!(f, "Cardio"),
            WorkoutType::Flexibility => write!(f, "Flexibility"),
        }
    }
}

/// A logged workout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// Session title, e.g. "Morning Run"
    pub title: String,
    /// Workout category
    pub workout_type: WorkoutType,
    /// When the session took place
    pub date: DateTime<Utc>,
    /// Session length in minutes
    pub duration_minutes: u32,
    /// Estimated calories burned
    pub calories: Option<u32>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Owning user
    pub user_id: Uuid,
    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
    /// Distance covered in kilometers (cardio sessions)
    pub distance_km: Option<f64>,
    /// Pace such as "5:30 /km" (cardio sessions)
    pub pace: Option<String>,
    /// Perceived intensity (flexibility sessions)
    pub intensity: Option<String>,
}

/// Input for logging a workout.
///
/// The store assigns the identifier, owner, and creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutDraft {
    pub title: String,
    pub workout_type: WorkoutType,
    pub date: DateTime<Utc>,
    pub duration_minutes: u32,
    pub calories: Option<u32>,
    pub notes: Option<String>,
    pub distance_km: Option<f64>,
    pub pace: Option<String>,
    pub intensity: Option<String>,
}

impl WorkoutDraft {
    /// Check field constraints before the draft reaches storage.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().chars().count() < 2 {
            return Err("Title must be at least 2 characters");
        }
        if self.duration_minutes < 1 {
            return Err("Duration must be at least 1 minute");
        }
        Ok(())
    }

    /// Promote the draft to a full record owned by `user_id`.
    pub fn into_workout(self, user_id: Uuid) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            title: self.title,
            workout_type: self.workout_type,
            date: self.date,
            duration_minutes: self.duration_minutes,
            calories: self.calories,
            notes: self.notes,
            user_id,
            created_at: Utc::now(),
            distance_km: self.distance_km,
            pace: self.pace,
            intensity: self.intensity,
        }
    }
}

/// Partial update for a workout. `None` fields keep their stored value;
/// optional record fields cannot be cleared through a patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutPatch {
    pub title: Option<String>,
    pub workout_type: Option<WorkoutType>,
    pub date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub calories: Option<u32>,
    pub notes: Option<String>,
    pub distance_km: Option<f64>,
    pub pace: Option<String>,
    pub intensity: Option<String>,
}

impl WorkoutPatch {
    /// Check the constraints of every field the patch carries.
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title {
            if title.trim().chars().count() < 2 {
                return Err("Title must be at least 2 characters");
            }
        }
        if let Some(duration) = self.duration_minutes {
            if duration < 1 {
                return Err("Duration must be at least 1 minute");
            }
        }
        Ok(())
    }

    /// Merge the patch into `workout`.
    pub fn apply(self, workout: &mut Workout) {
        if let Some(title) = self.title {
            workout.title = title;
        }
        if let Some(workout_type) = self.workout_type {
            workout.workout_type = workout_type;
        }
        if let Some(date) = self.date {
            workout.date = date;
        }
        if let Some(duration) = self.duration_minutes {
            workout.duration_minutes = duration;
        }
        if self.calories.is_some() {
            workout.calories = self.calories;
        }
        if self.notes.is_some() {
            workout.notes = self.notes;
        }
        if self.distance_km.is_some() {
            workout.distance_km = self.distance_km;
        }
        if self.pace.is_some() {
            workout.pace = self.pace;
        }
        if self.intensity.is_some() {
            workout.intensity = self.intensity;
        }
    }
}

/// A single exercise performed during a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: Uuid,
    /// Exercise name, e.g. "Bench Press"
    pub name: String,
    /// Number of sets performed
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Weight used in kilograms, when applicable
    pub weight_kg: Option<f64>,
    /// Workout the exercise belongs to
    pub workout_id: Uuid,
}

/// Input for recording an exercise against a workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDraft {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight_kg: Option<f64>,
}

impl ExerciseDraft {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Exercise name is required");
        }
        if self.sets < 1 {
            return Err("Sets must be at least 1");
        }
        if self.reps < 1 {
            return Err("Reps must be at least 1");
        }
        Ok(())
    }

    /// Promote the draft to a full record attached to `workout_id`.
    pub fn into_exercise(self, workout_id: Uuid) -> Exercise {
        Exercise {
            id: Uuid::new_v4(),
            name: self.name,
            sets: self.sets,
            reps: self.reps,
            weight_kg: self.weight_kg,
            workout_id,
        }
    }
}

/// Partial update for an exercise. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExercisePatch {
    pub name: Option<String>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub weight_kg: Option<f64>,
}

impl ExercisePatch {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("Exercise name is required");
            }
        }
        if let Some(sets) = self.sets {
            if sets < 1 {
                return Err("Sets must be at least 1");
            }
        }
        if let Some(reps) = self.reps {
            if reps < 1 {
                return Err("Reps must be at least 1");
            }
        }
        Ok(())
    }

    /// Merge the patch into `exercise`.
    pub fn apply(self, exercise: &mut Exercise) {
        if let Some(name) = self.name {
            exercise.name = name;
        }
        if let Some(sets) = self.sets {
            exercise.sets = sets;
        }
        if let Some(reps) = self.reps {
            exercise.reps = reps;
        }
        if self.weight_kg.is_some() {
            exercise.weight_kg = self.weight_kg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_draft() -> WorkoutDraft {
        WorkoutDraft {
            title: "Morning Run".to_string(),
            workout_type: WorkoutType::Cardio,
            date: Utc::now(),
            duration_minutes: 30,
            calories: Some(320),
            notes: None,
            distance_km: Some(5.2),
            pace: Some("5:45 /km".to_string()),
            intensity: None,
        }
    }

    #[test]
    fn test_draft_validation() {
        assert!(run_draft().validate().is_ok());

        let mut short_title = run_draft();
        short_title.title = "R".to_string();
        assert_eq!(
            short_title.validate(),
            Err("Title must be at least 2 characters")
        );

        let mut zero_duration = run_draft();
        zero_duration.duration_minutes = 0;
        assert_eq!(
            zero_duration.validate(),
            Err("Duration must be at least 1 minute")
        );
    }

    #[test]
    fn test_draft_promotion_assigns_identity() {
        let user_id = Uuid::new_v4();
        let workout = run_draft().into_workout(user_id);

        assert_eq!(workout.user_id, user_id);
        assert_eq!(workout.title, "Morning Run");
        assert_eq!(workout.workout_type, WorkoutType::Cardio);
        assert!(workout.created_at <= Utc::now());
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut workout = run_draft().into_workout(Uuid::new_v4());
        let original_date = workout.date;

        let patch = WorkoutPatch {
            title: Some("Evening Run".to_string()),
            calories: Some(400),
            ..WorkoutPatch::default()
        };
        patch.apply(&mut workout);

        assert_eq!(workout.title, "Evening Run");
        assert_eq!(workout.calories, Some(400));
        assert_eq!(workout.date, original_date);
        assert_eq!(workout.distance_km, Some(5.2));
    }

    #[test]
    fn test_patch_validation() {
        let bad_patch = WorkoutPatch {
            title: Some("X".to_string()),
            ..WorkoutPatch::default()
        };
        assert!(bad_patch.validate().is_err());

        let empty_patch = WorkoutPatch::default();
        assert!(empty_patch.validate().is_ok());
    }

    #[test]
    fn test_exercise_draft_validation() {
        let draft = ExerciseDraft {
            name: "Bench Press".to_string(),
            sets: 3,
            reps: 10,
            weight_kg: Some(60.0),
        };
        assert!(draft.validate().is_ok());

        let unnamed = ExerciseDraft {
            name: "  ".to_string(),
            ..draft.clone()
        };
        assert_eq!(unnamed.validate(), Err("Exercise name is required"));

        let no_sets = ExerciseDraft { sets: 0, ..draft.clone() };
        assert_eq!(no_sets.validate(), Err("Sets must be at least 1"));

        let no_reps = ExerciseDraft { reps: 0, ..draft };
        assert_eq!(no_reps.validate(), Err("Reps must be at least 1"));
    }

    #[test]
    fn test_exercise_patch_apply() {
        let mut exercise = ExerciseDraft {
            name: "Squat".to_string(),
            sets: 3,
            reps: 8,
            weight_kg: None,
        }
        .into_exercise(Uuid::new_v4());

        let patch = ExercisePatch {
            sets: Some(5),
            weight_kg: Some(80.0),
            ..ExercisePatch::default()
        };
        patch.apply(&mut exercise);

        assert_eq!(exercise.name, "Squat");
        assert_eq!(exercise.sets, 5);
        assert_eq!(exercise.reps, 8);
        assert_eq!(exercise.weight_kg, Some(80.0));
    }

    #[test]
    fn test_workout_type_serialization() {
        let json = serde_json::to_string(&WorkoutType::Strength).unwrap();
        assert_eq!(json, "\"strength\"");

        let parsed: WorkoutType = serde_json::from_str("\"cardio\"").unwrap();
        assert_eq!(parsed, WorkoutType::Cardio);
        assert_eq!(parsed.as_str(), "cardio");
        assert_eq!(parsed.to_string(), "Cardio");
    }
}
