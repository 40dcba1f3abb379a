//! User type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user.
///
/// Users are immutable after registration; there is no update path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address, unique across all users
    pub email: String,
    /// Body weight in kilograms
    pub weight_kg: f32,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record with a generated id.
    pub fn new(name: String, email: String, weight_kg: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            weight_kg,
            created_at: Utc::now(),
        }
    }
}
