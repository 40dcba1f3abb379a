//! Workout log: atomic session persistence and history queries.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};
use uuid::Uuid;

use crate::error::TrackerError;
use crate::storage::database::{parse_date, parse_timestamp, parse_uuid, Database, DatabaseError};
use crate::workouts::types::{Exercise, ExerciseInput, Workout, WorkoutSummary};

/// Per-user workout log.
pub struct WorkoutLog<'a> {
    db: &'a mut Database,
}

impl<'a> WorkoutLog<'a> {
    /// Create a new workout log over the database.
    pub fn new(db: &'a mut Database) -> Self {
        Self { db }
    }

    /// Log a workout session with its exercises as one atomic unit.
    ///
    /// Either the workout and all its exercise rows are persisted, or
    /// nothing is; partial insertion is never observable.
    pub fn log_workout(
        &mut self,
        user_id: Uuid,
        date: NaiveDate,
        duration_minutes: u32,
        exercises: &[ExerciseInput],
    ) -> Result<Uuid, TrackerError> {
        if duration_minutes == 0 {
            return Err(TrackerError::InvalidInput(
                "duration must be positive".into(),
            ));
        }
        if exercises.is_empty() {
            return Err(TrackerError::InvalidInput(
                "a workout needs at least one exercise".into(),
            ));
        }
        for exercise in exercises {
            if exercise.name.trim().is_empty() {
                return Err(TrackerError::InvalidInput(
                    "exercise name must not be empty".into(),
                ));
            }
            if exercise.reps == 0 || exercise.sets == 0 {
                return Err(TrackerError::InvalidInput(
                    "reps and sets must be positive".into(),
                ));
            }
        }

        let workout = Workout::new(user_id, date, duration_minutes);

        let tx = self.db.transaction()?;
        tx.execute(
            "INSERT INTO workouts (id, user_id, workout_date, duration_minutes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                workout.id.to_string(),
                workout.user_id.to_string(),
                workout.date.format("%Y-%m-%d").to_string(),
                workout.duration_minutes,
                workout.created_at.to_rfc3339(),
            ],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO exercises (workout_id, name, reps, sets, weight_kg)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;

            for exercise in exercises {
                stmt.execute(params![
                    workout.id.to_string(),
                    exercise.name,
                    exercise.reps,
                    exercise.sets,
                    exercise.weight_kg,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::debug!(
            "Logged workout {} ({} min, {} exercises) for user {}",
            workout.id,
            duration_minutes,
            exercises.len(),
            user_id
        );
        Ok(workout.id)
    }

    /// List a user's workout history, most recent date first.
    ///
    /// Same-date workouts keep insertion order.
    pub fn list_workouts(&self, user_id: Uuid) -> Result<Vec<WorkoutSummary>, TrackerError> {
        let conn = self.db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, workout_date, duration_minutes FROM workouts
             WHERE user_id = ?1
             ORDER BY workout_date DESC, created_at ASC",
        )?;

        let rows = stmt.query_map(params![user_id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u32>(2)?,
            ))
        })?;

        let mut history = Vec::new();
        for row in rows {
            let (id_str, date_str, duration_minutes) = row?;
            history.push(WorkoutSummary {
                id: parse_uuid(&id_str)?,
                date: parse_date(&date_str)?,
                duration_minutes,
            });
        }

        Ok(history)
    }

    /// Get a workout with its exercises.
    pub fn get_workout(
        &self,
        workout_id: Uuid,
    ) -> Result<Option<(Workout, Vec<Exercise>)>, TrackerError> {
        let conn = self.db.connection();

        let row = conn
            .query_row(
                "SELECT id, user_id, workout_date, duration_minutes, created_at
                 FROM workouts WHERE id = ?1",
                params![workout_id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, u32>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        let Some((id_str, user_str, date_str, duration_minutes, created_str)) = row else {
            return Ok(None);
        };

        let workout = Workout {
            id: parse_uuid(&id_str)?,
            user_id: parse_uuid(&user_str)?,
            date: parse_date(&date_str)?,
            duration_minutes,
            created_at: parse_timestamp(&created_str)?,
        };

        let mut stmt = conn.prepare(
            "SELECT id, workout_id, name, reps, sets, weight_kg
             FROM exercises WHERE workout_id = ?1 ORDER BY id ASC",
        )?;

        let rows = stmt.query_map(params![workout_id.to_string()], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, u32>(4)?,
                row.get::<_, f32>(5)?,
            ))
        })?;

        let mut exercises = Vec::new();
        for row in rows {
            let (id, workout_str, name, reps, sets, weight_kg) = row?;
            exercises.push(Exercise {
                id,
                workout_id: parse_uuid(&workout_str)?,
                name,
                reps,
                sets,
                weight_kg,
            });
        }

        Ok(Some((workout, exercises)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::directory::UserDirectory;

    fn setup() -> (Database, Uuid) {
        let db = Database::open_in_memory().unwrap();
        let user_id = UserDirectory::new(db.connection())
            .register("Alice", "alice@example.com", 62.5)
            .unwrap();
        (db, user_id)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn pushups() -> Vec<ExerciseInput> {
        vec![ExerciseInput {
            name: "Pushups".to_string(),
            reps: 10,
            sets: 3,
            weight_kg: 0.0,
        }]
    }

    #[test]
    fn test_log_workout_appears_in_history() {
        let (mut db, user_id) = setup();
        let mut log = WorkoutLog::new(&mut db);

        log.log_workout(user_id, date("2026-08-03"), 30, &pushups())
            .unwrap();

        let history = log.list_workouts(user_id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].date, date("2026-08-03"));
        assert_eq!(history[0].duration_minutes, 30);
    }

    #[test]
    fn test_history_most_recent_first() {
        let (mut db, user_id) = setup();
        let mut log = WorkoutLog::new(&mut db);

        log.log_workout(user_id, date("2026-08-01"), 20, &pushups())
            .unwrap();
        log.log_workout(user_id, date("2026-08-05"), 45, &pushups())
            .unwrap();
        log.log_workout(user_id, date("2026-08-03"), 30, &pushups())
            .unwrap();

        let history = log.list_workouts(user_id).unwrap();
        let dates: Vec<NaiveDate> = history.iter().map(|w| w.date).collect();
        assert_eq!(
            dates,
            vec![date("2026-08-05"), date("2026-08-03"), date("2026-08-01")]
        );
    }

    #[test]
    fn test_get_workout_returns_exercises() {
        let (mut db, user_id) = setup();
        let mut log = WorkoutLog::new(&mut db);

        let exercises = vec![
            ExerciseInput {
                name: "Squats".to_string(),
                reps: 8,
                sets: 5,
                weight_kg: 100.0,
            },
            ExerciseInput {
                name: "Pushups".to_string(),
                reps: 10,
                sets: 3,
                weight_kg: 0.0,
            },
        ];

        let workout_id = log
            .log_workout(user_id, date("2026-08-03"), 60, &exercises)
            .unwrap();

        let (workout, stored) = log.get_workout(workout_id).unwrap().expect("not found");
        assert_eq!(workout.user_id, user_id);
        assert_eq!(workout.duration_minutes, 60);
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].name, "Squats");
        assert_eq!(stored[0].weight_kg, 100.0);
        assert_eq!(stored[1].name, "Pushups");

        assert!(log.get_workout(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_empty_exercise_list_rejected_atomically() {
        let (mut db, user_id) = setup();

        let result = WorkoutLog::new(&mut db).log_workout(user_id, date("2026-08-03"), 30, &[]);
        assert!(matches!(result, Err(TrackerError::InvalidInput(_))));

        // No workout row may be left behind
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_invalid_exercise_rejected() {
        let (mut db, user_id) = setup();
        let mut log = WorkoutLog::new(&mut db);

        let blank_name = vec![ExerciseInput {
            name: "  ".to_string(),
            reps: 10,
            sets: 3,
            weight_kg: 0.0,
        }];
        assert!(matches!(
            log.log_workout(user_id, date("2026-08-03"), 30, &blank_name),
            Err(TrackerError::InvalidInput(_))
        ));

        let zero_reps = vec![ExerciseInput {
            name: "Pushups".to_string(),
            reps: 0,
            sets: 3,
            weight_kg: 0.0,
        }];
        assert!(matches!(
            log.log_workout(user_id, date("2026-08-03"), 30, &zero_reps),
            Err(TrackerError::InvalidInput(_))
        ));

        assert!(matches!(
            log.log_workout(user_id, date("2026-08-03"), 0, &pushups()),
            Err(TrackerError::InvalidInput(_))
        ));
    }
}
