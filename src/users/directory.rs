//! User directory: registration and email lookup.

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::TrackerError;
use crate::storage::database::{parse_timestamp, parse_uuid};
use crate::users::types::User;

/// Directory of registered users.
pub struct UserDirectory<'a> {
    conn: &'a Connection,
}

impl<'a> UserDirectory<'a> {
    /// Create a new user directory over a database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Register a new user and return the generated id.
    ///
    /// Email addresses uniquely identify users; registering an address a
    /// second time fails with `DuplicateEmail`.
    pub fn register(&self, name: &str, email: &str, weight_kg: f32) -> Result<Uuid, TrackerError> {
        if name.trim().is_empty() {
            return Err(TrackerError::InvalidInput("name must not be empty".into()));
        }
        if email.trim().is_empty() {
            return Err(TrackerError::InvalidInput("email must not be empty".into()));
        }
        if weight_kg <= 0.0 {
            return Err(TrackerError::InvalidInput(
                "weight must be positive".into(),
            ));
        }

        // The UNIQUE column constraint remains the storage-level backstop
        if self.find_by_email(email)?.is_some() {
            return Err(TrackerError::DuplicateEmail(email.to_string()));
        }

        let user = User::new(name.to_string(), email.to_string(), weight_kg);

        self.conn.execute(
            "INSERT INTO users (id, name, email, weight_kg, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id.to_string(),
                user.name,
                user.email,
                user.weight_kg,
                user.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Registered user {} <{}>", user.name, user.email);
        Ok(user.id)
    }

    /// Find a user by email.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, TrackerError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, email, weight_kg, created_at FROM users WHERE email = ?1",
                params![email],
                read_user_row,
            )
            .optional()?;

        row.map(UserRow::into_user).transpose()
    }

    /// Get a user by id.
    pub fn get_user(&self, id: Uuid) -> Result<Option<User>, TrackerError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, email, weight_kg, created_at FROM users WHERE id = ?1",
                params![id.to_string()],
                read_user_row,
            )
            .optional()?;

        row.map(UserRow::into_user).transpose()
    }
}

/// Intermediate struct for reading user rows from the database.
pub(crate) struct UserRow {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) weight_kg: f32,
    pub(crate) created_at: String,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, TrackerError> {
        Ok(User {
            id: parse_uuid(&self.id)?,
            name: self.name,
            email: self.email,
            weight_kg: self.weight_kg,
            created_at: parse_timestamp(&self.created_at)?,
        })
    }
}

/// Map a `SELECT id, name, email, weight_kg, created_at` row.
pub(crate) fn read_user_row(row: &rusqlite::Row) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        weight_kg: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::Database;

    #[test]
    fn test_register_and_find_by_email() {
        let db = Database::open_in_memory().unwrap();
        let directory = UserDirectory::new(db.connection());

        let id = directory.register("Alice", "alice@example.com", 62.5).unwrap();

        let user = directory
            .find_by_email("alice@example.com")
            .unwrap()
            .expect("user not found");
        assert_eq!(user.id, id);
        assert_eq!(user.name, "Alice");
        assert_eq!(user.weight_kg, 62.5);

        assert!(directory.find_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_get_user_by_id() {
        let db = Database::open_in_memory().unwrap();
        let directory = UserDirectory::new(db.connection());

        let id = directory.register("Bob", "bob@example.com", 80.0).unwrap();

        let user = directory.get_user(id).unwrap().expect("user not found");
        assert_eq!(user.email, "bob@example.com");

        assert!(directory.get_user(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let db = Database::open_in_memory().unwrap();
        let directory = UserDirectory::new(db.connection());

        directory.register("Alice", "alice@example.com", 62.5).unwrap();
        let result = directory.register("Other Alice", "alice@example.com", 70.0);
        assert!(matches!(result, Err(TrackerError::DuplicateEmail(_))));

        // Only the first registration persists
        let count: i64 = db
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM users WHERE email = 'alice@example.com'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_register_rejects_invalid_input() {
        let db = Database::open_in_memory().unwrap();
        let directory = UserDirectory::new(db.connection());

        assert!(matches!(
            directory.register("", "a@example.com", 70.0),
            Err(TrackerError::InvalidInput(_))
        ));
        assert!(matches!(
            directory.register("Alice", "", 70.0),
            Err(TrackerError::InvalidInput(_))
        ));
        assert!(matches!(
            directory.register("Alice", "a@example.com", 0.0),
            Err(TrackerError::InvalidInput(_))
        ));
        assert!(matches!(
            directory.register("Alice", "a@example.com", -5.0),
            Err(TrackerError::InvalidInput(_))
        ));

        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
