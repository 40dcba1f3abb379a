//! Workout and exercise type definitions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A logged workout session.
///
/// Workouts are append-only: never mutated or deleted once logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// User who logged this workout
    pub user_id: Uuid,
    /// Calendar date the session took place
    pub date: NaiveDate,
    /// Total session duration in minutes
    pub duration_minutes: u32,
    /// When the workout was logged
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Create a new workout record with a generated id.
    pub fn new(user_id: Uuid, date: NaiveDate, duration_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date,
            duration_minutes,
            created_at: Utc::now(),
        }
    }
}

/// An exercise entry belonging to a workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Row id
    pub id: i64,
    /// Workout this entry belongs to
    pub workout_id: Uuid,
    /// Exercise name
    pub name: String,
    /// Repetitions per set
    pub reps: u32,
    /// Number of sets
    pub sets: u32,
    /// Weight used in kilograms (0 for bodyweight exercises)
    pub weight_kg: f32,
}

/// Exercise data collected from the caller when logging a workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseInput {
    pub name: String,
    pub reps: u32,
    pub sets: u32,
    pub weight_kg: f32,
}

/// One row of a user's workout history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub id: Uuid,
    pub date: NaiveDate,
    pub duration_minutes: u32,
}
