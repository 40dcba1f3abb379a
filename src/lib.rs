//! Fitlog - Fitness Tracking Core
//!
//! The persistence and business-logic layer of a fitness-tracking
//! application: user registration and lookup by email, workout logging with
//! nested exercise entries, goal tracking, a symmetric friends list, and a
//! weekly-minutes leaderboard among direct friends.
//!
//! The presentation layer is an external caller: it owns authentication and
//! session handling, and passes the acting user's id explicitly on every
//! call. Every mutating operation is atomic against the SQLite store.

pub mod error;
pub mod goals;
pub mod leaderboard;
pub mod social;
pub mod storage;
pub mod users;
pub mod workouts;

// Re-export commonly used types
pub use error::TrackerError;
pub use goals::tracker::GoalTracker;
pub use leaderboard::weekly::WeeklyLeaderboard;
pub use social::friends::FriendGraph;
pub use storage::database::Database;
pub use users::directory::UserDirectory;
pub use workouts::log::WorkoutLog;
