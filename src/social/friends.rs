//! Friend graph operations.
//!
//! A friendship is a symmetric edge: adding a friend writes both directed
//! rows (A,B) and (B,A) in one transaction, removing deletes both. Friends
//! are always addressed by email, the way the caller's forms collect them.

use chrono::Utc;
use rusqlite::params;
use uuid::Uuid;

use crate::error::TrackerError;
use crate::storage::database::{Database, DatabaseError};
use crate::users::directory::{read_user_row, UserDirectory, UserRow};
use crate::users::types::User;

/// Symmetric friend relationships between users.
pub struct FriendGraph<'a> {
    db: &'a mut Database,
}

impl<'a> FriendGraph<'a> {
    /// Create a new friend graph over the database.
    pub fn new(db: &'a mut Database) -> Self {
        Self { db }
    }

    /// Add a symmetric friendship between `user_id` and the user registered
    /// under `friend_email`.
    pub fn add_friend(&mut self, user_id: Uuid, friend_email: &str) -> Result<(), TrackerError> {
        let friend = self.resolve(friend_email)?;

        if friend.id == user_id {
            return Err(TrackerError::SelfFriend);
        }
        if self.edge_exists(user_id, friend.id)? {
            return Err(TrackerError::AlreadyFriends);
        }

        let created_at = Utc::now().to_rfc3339();

        let tx = self.db.transaction()?;
        tx.execute(
            "INSERT INTO friendships (user_id, friend_id, created_at) VALUES (?1, ?2, ?3)",
            params![user_id.to_string(), friend.id.to_string(), created_at],
        )?;
        tx.execute(
            "INSERT INTO friendships (user_id, friend_id, created_at) VALUES (?1, ?2, ?3)",
            params![friend.id.to_string(), user_id.to_string(), created_at],
        )?;
        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::debug!("Added friendship {} <-> {}", user_id, friend.id);
        Ok(())
    }

    /// Remove the friendship between `user_id` and the user registered under
    /// `friend_email`.
    pub fn remove_friend(&mut self, user_id: Uuid, friend_email: &str) -> Result<(), TrackerError> {
        let friend = self.resolve(friend_email)?;

        if !self.edge_exists(user_id, friend.id)? {
            return Err(TrackerError::NotFriends);
        }

        let tx = self.db.transaction()?;
        tx.execute(
            "DELETE FROM friendships WHERE user_id = ?1 AND friend_id = ?2",
            params![user_id.to_string(), friend.id.to_string()],
        )?;
        tx.execute(
            "DELETE FROM friendships WHERE user_id = ?1 AND friend_id = ?2",
            params![friend.id.to_string(), user_id.to_string()],
        )?;
        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::debug!("Removed friendship {} <-> {}", user_id, friend.id);
        Ok(())
    }

    /// List all friends of `user_id`, ordered by name for display.
    pub fn list_friends(&self, user_id: Uuid) -> Result<Vec<User>, TrackerError> {
        let conn = self.db.connection();

        let mut stmt = conn.prepare(
            "SELECT u.id, u.name, u.email, u.weight_kg, u.created_at
             FROM users u
             JOIN friendships f ON f.friend_id = u.id
             WHERE f.user_id = ?1
             ORDER BY u.name ASC",
        )?;

        let rows = stmt.query_map(params![user_id.to_string()], read_user_row)?;

        let mut friends = Vec::new();
        for row in rows {
            friends.push(UserRow::into_user(row?)?);
        }

        Ok(friends)
    }

    /// Resolve a friend email to a user, or `UserNotFound`.
    fn resolve(&self, email: &str) -> Result<User, TrackerError> {
        UserDirectory::new(self.db.connection())
            .find_by_email(email)?
            .ok_or_else(|| TrackerError::UserNotFound(email.to_string()))
    }

    fn edge_exists(&self, user_id: Uuid, friend_id: Uuid) -> Result<bool, TrackerError> {
        let exists: bool = self.db.connection().query_row(
            "SELECT EXISTS(SELECT 1 FROM friendships WHERE user_id = ?1 AND friend_id = ?2)",
            params![user_id.to_string(), friend_id.to_string()],
            |row| row.get(0),
        )?;

        Ok(exists)
    }
}
