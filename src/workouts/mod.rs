//! Workout logging and history.

pub mod log;
pub mod types;

pub use log::WorkoutLog;
pub use types::{Exercise, ExerciseInput, Workout, WorkoutSummary};
