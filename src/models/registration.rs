//! Registration: an entrant (single player or doubles team) in a tournament.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a registration (used in match slots and standings).
pub type RegistrationId = Uuid;

/// Unique identifier for a player. Players themselves are managed elsewhere;
/// registrations only reference them.
pub type PlayerId = Uuid;

/// Whether the entrant is still in the tournament's entry list.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Active,
    Withdrawn,
}

/// An entrant: one player, or a pair with an optional team name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub player: PlayerId,
    /// Second player for doubles; None for singles.
    pub partner: Option<PlayerId>,
    pub team_name: Option<String>,
    /// Pre-assigned rank used for bracket placement; None means unseeded.
    pub seed: Option<u32>,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    /// Register a single player (unseeded, active).
    pub fn new(player: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            player,
            partner: None,
            team_name: None,
            seed: None,
            status: RegistrationStatus::Active,
            registered_at: Utc::now(),
        }
    }

    /// Register a doubles team.
    pub fn team(player: PlayerId, partner: PlayerId, team_name: Option<String>) -> Self {
        Self {
            partner: Some(partner),
            team_name,
            ..Self::new(player)
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RegistrationStatus::Active
    }

    /// True if the given player plays for this registration (as player or partner).
    pub fn involves(&self, player: PlayerId) -> bool {
        self.player == player || self.partner == Some(player)
    }

    /// Mark the entrant as withdrawn.
    pub fn withdraw(&mut self) {
        self.status = RegistrationStatus::Withdrawn;
    }
}
