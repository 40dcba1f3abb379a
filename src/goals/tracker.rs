//! Fitness goal management.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TrackerError;
use crate::storage::database::{parse_timestamp, parse_uuid};

/// A fitness goal set by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: Uuid,
    /// User who owns this goal
    pub user_id: Uuid,
    /// What the user wants to achieve
    pub description: String,
    /// Numeric target (interpretation is up to the caller's forms)
    pub target_value: f64,
    /// Whether the goal has been reached
    pub completed: bool,
    /// When the goal was completed
    pub completed_at: Option<DateTime<Utc>>,
    /// When the goal was created
    pub created_at: DateTime<Utc>,
}

/// Tracker for per-user goals.
pub struct GoalTracker<'a> {
    conn: &'a Connection,
}

impl<'a> GoalTracker<'a> {
    /// Create a new goal tracker over a database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Set a new goal and return the generated id.
    pub fn set_goal(
        &self,
        user_id: Uuid,
        description: &str,
        target_value: f64,
    ) -> Result<Uuid, TrackerError> {
        if description.trim().is_empty() {
            return Err(TrackerError::InvalidInput(
                "description must not be empty".into(),
            ));
        }
        if target_value < 0.0 {
            return Err(TrackerError::InvalidInput(
                "target value must not be negative".into(),
            ));
        }

        let id = Uuid::new_v4();

        self.conn.execute(
            "INSERT INTO goals (id, user_id, description, target_value, completed, created_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5)",
            params![
                id.to_string(),
                user_id.to_string(),
                description,
                target_value,
                Utc::now().to_rfc3339(),
            ],
        )?;

        tracing::debug!("Set goal {} for user {}", id, user_id);
        Ok(id)
    }

    /// List all goals for a user, oldest first.
    pub fn list_goals(&self, user_id: Uuid) -> Result<Vec<Goal>, TrackerError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, description, target_value, completed, completed_at, created_at
             FROM goals WHERE user_id = ?1 ORDER BY created_at ASC",
        )?;

        let rows = stmt.query_map(params![user_id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, bool>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut goals = Vec::new();
        for row in rows {
            let (id_str, user_str, description, target_value, completed, completed_str, created_str) =
                row?;
            goals.push(Goal {
                id: parse_uuid(&id_str)?,
                user_id: parse_uuid(&user_str)?,
                description,
                target_value,
                completed,
                completed_at: completed_str.as_deref().map(parse_timestamp).transpose()?,
                created_at: parse_timestamp(&created_str)?,
            });
        }

        Ok(goals)
    }

    /// Mark a goal as completed.
    ///
    /// Idempotent once completed; `completed_at` records only the first
    /// transition. Fails with `GoalNotFound` when the goal does not exist or
    /// is not owned by `user_id`.
    pub fn complete_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<(), TrackerError> {
        let updated = self.conn.execute(
            "UPDATE goals SET completed = 1, completed_at = COALESCE(completed_at, ?3)
             WHERE id = ?1 AND user_id = ?2",
            params![
                goal_id.to_string(),
                user_id.to_string(),
                Utc::now().to_rfc3339(),
            ],
        )?;

        if updated == 0 {
            return Err(TrackerError::GoalNotFound(goal_id));
        }

        tracing::debug!("Completed goal {} for user {}", goal_id, user_id);
        Ok(())
    }
}
