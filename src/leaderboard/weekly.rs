//! Weekly minutes leaderboard among direct friends.
//!
//! Totals workout minutes for a user and each direct friend over the current
//! ISO week (Monday through Sunday) of the caller's local date. The window is
//! derived per call and never stored, so results change across a week
//! boundary by design.

use chrono::{Local, NaiveDate, Weekday};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use uuid::Uuid;

use crate::error::TrackerError;
use crate::storage::database::parse_uuid;

/// One row of the weekly leaderboard.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: Uuid,
    pub name: String,
    pub total_minutes: u32,
    pub is_current_user: bool,
}

/// Weekly leaderboard service.
pub struct WeeklyLeaderboard<'a> {
    conn: &'a Connection,
}

impl<'a> WeeklyLeaderboard<'a> {
    /// Create a new leaderboard service over a database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Leaderboard for the week containing today's local date.
    pub fn weekly_totals(&self, user_id: Uuid) -> Result<Vec<LeaderboardEntry>, TrackerError> {
        self.weekly_totals_on(user_id, Local::now().date_naive())
    }

    /// Leaderboard for the week containing `today`.
    ///
    /// Participants are the querying user and their direct friends; users
    /// with no workouts this week appear with a total of zero. Sorted by
    /// total minutes descending, ties by name ascending.
    pub fn weekly_totals_on(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<LeaderboardEntry>, TrackerError> {
        let week = today.week(Weekday::Mon);
        let (start, end) = (week.first_day(), week.last_day());

        let mut entries = Vec::new();
        for (id, name) in self.participants(user_id)? {
            let total_minutes = self.minutes_between(id, start, end)?;
            entries.push(LeaderboardEntry {
                rank: 0,
                user_id: id,
                name,
                total_minutes,
                is_current_user: id == user_id,
            });
        }

        entries.sort_by(|a, b| {
            b.total_minutes
                .cmp(&a.total_minutes)
                .then_with(|| a.name.cmp(&b.name))
        });
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = index as u32 + 1;
        }

        Ok(entries)
    }

    /// The querying user plus their direct friends.
    fn participants(&self, user_id: Uuid) -> Result<Vec<(Uuid, String)>, TrackerError> {
        let name: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM users WHERE id = ?1",
                params![user_id.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        let name = name.ok_or_else(|| TrackerError::UserNotFound(user_id.to_string()))?;
        let mut participants = vec![(user_id, name)];

        let mut stmt = self.conn.prepare(
            "SELECT u.id, u.name FROM users u
             JOIN friendships f ON f.friend_id = u.id
             WHERE f.user_id = ?1",
        )?;

        let rows = stmt.query_map(params![user_id.to_string()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (id_str, name) = row?;
            participants.push((parse_uuid(&id_str)?, name));
        }

        Ok(participants)
    }

    /// Total workout minutes for a user over an inclusive date range.
    fn minutes_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<u32, TrackerError> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(duration_minutes), 0) FROM workouts
             WHERE user_id = ?1 AND workout_date BETWEEN ?2 AND ?3",
            params![
                user_id.to_string(),
                start.format("%Y-%m-%d").to_string(),
                end.format("%Y-%m-%d").to_string(),
            ],
            |row| row.get(0),
        )?;

        Ok(total as u32)
    }
}
