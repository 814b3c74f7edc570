//! Player data structure (roster entry for a tournament).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and lookups).
pub type PlayerId = Uuid;

/// A player on a tournament roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Inactive players stay on record but are left out of bracket generation.
    pub is_active: bool,
}

impl Player {
    /// Create a new active player with the given name and team.
    pub fn new(name: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            team_name: team_name.into(),
            email: None,
            phone: None,
            is_active: true,
        }
    }

    pub fn with_contact(mut self, email: Option<String>, phone: Option<String>) -> Self {
        self.email = email;
        self.phone = phone;
        self
    }

    /// Case-insensitive (name, team) pair; a roster holds each pair at most once.
    pub fn roster_key(name: &str, team_name: &str) -> (String, String) {
        (
            name.trim().to_ascii_lowercase(),
            team_name.trim().to_ascii_lowercase(),
        )
    }

    pub fn key(&self) -> (String, String) {
        Self::roster_key(&self.name, &self.team_name)
    }

    /// Take the player out of future brackets.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
