//! Weekly leaderboard aggregation.

pub mod weekly;

pub use weekly::{LeaderboardEntry, WeeklyLeaderboard};
