//! Crate-wide error types.

use uuid::Uuid;

use crate::storage::database::DatabaseError;

/// Errors returned by the core services.
///
/// Every variant except `Database` and `Storage` is a business-rule
/// violation the caller can report back to the user. `Database` and
/// `Storage` wrap infrastructure failures and should be treated as
/// unrecoverable.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Malformed or out-of-range request data.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// No user matches the given email.
    #[error("No user found for {0}")]
    UserNotFound(String),

    #[error("Cannot befriend yourself")]
    SelfFriend,

    #[error("Users are already friends")]
    AlreadyFriends,

    #[error("Users are not friends")]
    NotFriends,

    #[error("Goal not found: {0}")]
    GoalNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Storage(#[from] DatabaseError),
}
