//! Aggregate training statistics.
//!
//! Pure computation over a workout slice. The store passes the collection
//! and the caller's notion of "now"; the offset carried by `now` decides
//! where local midnight falls for the weekly window.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::workouts::types::{Workout, WorkoutType};

/// Workout counts per category, over the whole history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutTypeCounts {
    pub strength: usize,
    pub cardio: usize,
    pub flexibility: usize,
}

/// Activity within the current week.
///
/// The week runs from the most recent Sunday, local midnight, through now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyActivity {
    /// Workouts since the week started
    pub workouts: usize,
    /// Distinct local calendar days with at least one workout
    pub days_worked_out: usize,
    /// `days_worked_out` as a percentage of a full week
    pub progress: f64,
}

/// Aggregate statistics for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// All-time workout count
    pub total_workouts: usize,
    /// Workouts in the last 30 days
    pub recent_workouts: usize,
    /// Calories burned in the last 30 days
    pub total_calories: u32,
    /// All-time workout counts per category
    pub workouts_by_type: WorkoutTypeCounts,
    /// Cardio distance in the last 30 days, kilometers
    pub total_distance_km: f64,
    /// Current-week activity
    pub weekly_activity: WeeklyActivity,
}

/// Compute aggregate statistics for `user_id` over `workouts`.
pub fn user_stats(user_id: Uuid, workouts: &[Workout], now: DateTime<FixedOffset>) -> UserStats {
    let mine: Vec<&Workout> = workouts.iter().filter(|w| w.user_id == user_id).collect();

    let window_start = now - Duration::days(30);
    let recent: Vec<&Workout> = mine
        .iter()
        .copied()
        .filter(|w| w.date >= window_start)
        .collect();

    let total_calories: u32 = recent.iter().map(|w| w.calories.unwrap_or(0)).sum();

    let workouts_by_type = WorkoutTypeCounts {
        strength: count_of(&mine, WorkoutType::Strength),
        cardio: count_of(&mine, WorkoutType::Cardio),
        flexibility: count_of(&mine, WorkoutType::Flexibility),
    };

    let total_distance_km: f64 = recent
        .iter()
        .filter(|w| w.workout_type == WorkoutType::Cardio)
        .map(|w| w.distance_km.unwrap_or(0.0))
        .sum();

    UserStats {
        total_workouts: mine.len(),
        recent_workouts: recent.len(),
        total_calories,
        workouts_by_type,
        total_distance_km,
        weekly_activity: weekly_activity(&mine, now),
    }
}

fn count_of(workouts: &[&Workout], workout_type: WorkoutType) -> usize {
    workouts
        .iter()
        .filter(|w| w.workout_type == workout_type)
        .count()
}

/// The instant the current week began: most recent Sunday, midnight in
/// `now`'s offset.
fn week_start(now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let days_into_week = now.weekday().num_days_from_sunday() as i64;
    let seconds_into_day = now.time().num_seconds_from_midnight() as i64;
    let subsec_nanos = now.time().nanosecond() as i64;
    now - Duration::days(days_into_week)
        - Duration::seconds(seconds_into_day)
        - Duration::nanoseconds(subsec_nanos)
}

fn weekly_activity(workouts: &[&Workout], now: DateTime<FixedOffset>) -> WeeklyActivity {
    let start = week_start(now);
    let this_week: Vec<&Workout> = workouts
        .iter()
        .copied()
        .filter(|w| w.date >= start)
        .collect();

    let offset = *now.offset();
    let days: HashSet<_> = this_week
        .iter()
        .map(|w| w.date.with_timezone(&offset).date_naive())
        .collect();
    let days_worked_out = days.len();

    WeeklyActivity {
        workouts: this_week.len(),
        days_worked_out,
        progress: days_worked_out as f64 / 7.0 * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    /// Wednesday afternoon, UTC. The week began Sunday June 9, 00:00 UTC.
    fn wednesday_utc() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-06-12T15:30:00Z").unwrap()
    }

    fn workout_at(
        user_id: Uuid,
        date: DateTime<FixedOffset>,
        workout_type: WorkoutType,
    ) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            title: "Session".to_string(),
            workout_type,
            date: date.with_timezone(&Utc),
            duration_minutes: 30,
            calories: Some(100),
            notes: None,
            user_id,
            created_at: date.with_timezone(&Utc),
            distance_km: None,
            pace: None,
            intensity: None,
        }
    }

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn test_empty_input_yields_zeroed_stats() {
        let stats = user_stats(Uuid::new_v4(), &[], wednesday_utc());
        assert_eq!(stats, UserStats::default());
        assert_eq!(stats.weekly_activity.progress, 0.0);
    }

    #[test]
    fn test_filters_to_requested_user() {
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let now = wednesday_utc();
        let workouts = vec![
            workout_at(user, now, WorkoutType::Strength),
            workout_at(other, now, WorkoutType::Strength),
            workout_at(other, now, WorkoutType::Cardio),
        ];

        let stats = user_stats(user, &workouts, now);
        assert_eq!(stats.total_workouts, 1);
        assert_eq!(stats.workouts_by_type.strength, 1);
        assert_eq!(stats.workouts_by_type.cardio, 0);
    }

    #[test]
    fn test_thirty_day_window() {
        let user = Uuid::new_v4();
        let now = wednesday_utc();
        let mut inside = workout_at(user, at("2024-05-20T10:00:00Z"), WorkoutType::Cardio);
        inside.calories = Some(250);
        inside.distance_km = Some(10.0);
        let mut outside = workout_at(user, at("2024-04-01T10:00:00Z"), WorkoutType::Cardio);
        outside.calories = Some(999);
        outside.distance_km = Some(21.1);

        let stats = user_stats(user, &[inside, outside], now);

        // Totals and per-type counts cover the whole history.
        assert_eq!(stats.total_workouts, 2);
        assert_eq!(stats.workouts_by_type.cardio, 2);
        // Calories and distance only count the last 30 days.
        assert_eq!(stats.recent_workouts, 1);
        assert_eq!(stats.total_calories, 250);
        assert_eq!(stats.total_distance_km, 10.0);
    }

    #[test]
    fn test_distance_counts_only_cardio() {
        let user = Uuid::new_v4();
        let now = wednesday_utc();
        let mut run = workout_at(user, now, WorkoutType::Cardio);
        run.distance_km = Some(5.0);
        let mut hike_logged_as_flexibility = workout_at(user, now, WorkoutType::Flexibility);
        hike_logged_as_flexibility.distance_km = Some(12.0);
        let mut unmeasured_run = workout_at(user, now, WorkoutType::Cardio);
        unmeasured_run.distance_km = None;

        let stats = user_stats(user, &[run, hike_logged_as_flexibility, unmeasured_run], now);
        assert_eq!(stats.total_distance_km, 5.0);
    }

    #[test]
    fn test_week_starts_sunday_midnight() {
        let user = Uuid::new_v4();
        let now = wednesday_utc();
        let on_boundary = workout_at(user, at("2024-06-09T00:00:00Z"), WorkoutType::Strength);
        let before_boundary = workout_at(user, at("2024-06-08T23:59:59Z"), WorkoutType::Strength);

        let stats = user_stats(user, &[on_boundary, before_boundary], now);
        assert_eq!(stats.weekly_activity.workouts, 1);
        assert_eq!(stats.weekly_activity.days_worked_out, 1);
    }

    #[test]
    fn test_weekly_counts_distinct_days() {
        let user = Uuid::new_v4();
        let now = wednesday_utc();
        let workouts = vec![
            workout_at(user, at("2024-06-10T07:00:00Z"), WorkoutType::Strength),
            workout_at(user, at("2024-06-10T18:00:00Z"), WorkoutType::Flexibility),
            workout_at(user, at("2024-06-12T08:00:00Z"), WorkoutType::Cardio),
        ];

        let stats = user_stats(user, &workouts, now);
        assert_eq!(stats.weekly_activity.workouts, 3);
        assert_eq!(stats.weekly_activity.days_worked_out, 2);
        assert!((stats.weekly_activity.progress - 2.0 / 7.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_window_uses_local_offset() {
        let user = Uuid::new_v4();
        // Early Wednesday morning at UTC+3; in UTC it is still Tuesday.
        let now = at("2024-06-12T02:00:00+03:00");

        // Sunday 00:30 local is Saturday 21:30 UTC; still inside the week.
        let sunday_local = workout_at(user, at("2024-06-09T00:30:00+03:00"), WorkoutType::Cardio);
        // Three hours before `now` lands on local Tuesday.
        let tuesday_local = workout_at(user, at("2024-06-11T23:00:00+03:00"), WorkoutType::Strength);
        let wednesday_local = workout_at(user, now, WorkoutType::Strength);

        let stats = user_stats(user, &[sunday_local, tuesday_local, wednesday_local], now);
        assert_eq!(stats.weekly_activity.workouts, 3);
        // Tuesday and Wednesday share a UTC date; local grouping keeps them apart.
        assert_eq!(stats.weekly_activity.days_worked_out, 3);
    }

    #[test]
    fn test_full_week_reaches_hundred_percent() {
        let user = Uuid::new_v4();
        let now = at("2024-06-15T20:00:00Z");
        let workouts: Vec<Workout> = (9..=15)
            .map(|day| {
                workout_at(
                    user,
                    at(&format!("2024-06-{:02}T10:00:00Z", day)),
                    WorkoutType::Strength,
                )
            })
            .collect();

        let stats = user_stats(user, &workouts, now);
        assert_eq!(stats.weekly_activity.days_worked_out, 7);
        assert!((stats.weekly_activity.progress - 100.0).abs() < 1e-9);
    }
}
