//! Standing: an entrant's aggregate record and rank within a tournament.

use crate::models::registration::RegistrationId;
use serde::{Deserialize, Serialize};

/// Per-registration aggregate: created lazily the first time the entrant
/// appears in a completed match, updated after every completion.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub registration: RegistrationId,
    /// 1-based rank, recomputed after every update (0 until first recompute).
    pub position: u32,
    pub points: i32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games_played: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
}

impl Standing {
    pub fn new(registration: RegistrationId) -> Self {
        Self {
            registration,
            position: 0,
            points: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            games_played: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
        }
    }

    pub fn record_win(&mut self, goals_for: u32, goals_against: u32, points: i32) {
        self.wins += 1;
        self.apply_game(goals_for, goals_against, points);
    }

    pub fn record_loss(&mut self, goals_for: u32, goals_against: u32, points: i32) {
        self.losses += 1;
        self.apply_game(goals_for, goals_against, points);
    }

    fn apply_game(&mut self, goals_for: u32, goals_against: u32, points: i32) {
        self.games_played += 1;
        self.goals_for += goals_for;
        self.goals_against += goals_against;
        self.goal_difference = self.goals_for as i32 - self.goals_against as i32;
        self.points += points;
    }
}
