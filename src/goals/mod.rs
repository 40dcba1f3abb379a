//! Goal setting and tracking.

pub mod tracker;

pub use tracker::{Goal, GoalTracker};
