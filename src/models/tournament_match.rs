//! TournamentMatch: a node in the bracket graph with forward links.

use crate::models::registration::RegistrationId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Opaque reference to the recorded game that decided a match.
pub type GameId = Uuid;

/// Which bracket a match belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketType {
    /// The single-elimination bracket, or the winners bracket in double elimination.
    Main,
    /// The losers bracket (double elimination only).
    Losers,
}

/// Match state machine: Pending -> Ready -> Completed | Walkover.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Fewer than two teams assigned.
    #[default]
    Pending,
    /// Both teams assigned, no result yet.
    Ready,
    /// Winner recorded from a played game.
    Completed,
    /// Winner recorded without a played game (bye or forfeit).
    Walkover,
}

/// A bracket match. Forward links (`next_match`, `consolation_match`) are ids
/// into the tournament's match arena, never object references.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentMatch {
    pub id: MatchId,
    /// 1-based, increasing toward the final.
    pub round_number: u32,
    /// 1-based within the round.
    pub match_number: u32,
    pub bracket_type: BracketType,
    /// None until filled by seeding or by an upstream advancement.
    pub team1: Option<RegistrationId>,
    pub team2: Option<RegistrationId>,
    /// Once set, always equals team1 or team2.
    pub winner: Option<RegistrationId>,
    pub status: MatchStatus,
    /// Where this match's winner goes; None for the final / grand finals.
    pub next_match: Option<MatchId>,
    /// Where this match's loser goes (Main-bracket matches in double elimination only).
    pub consolation_match: Option<MatchId>,
    /// The game that decided this match; None for walkovers.
    pub game: Option<GameId>,
}

impl TournamentMatch {
    pub fn new(round_number: u32, match_number: u32, bracket_type: BracketType) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_number,
            match_number,
            bracket_type,
            team1: None,
            team2: None,
            winner: None,
            status: MatchStatus::Pending,
            next_match: None,
            consolation_match: None,
            game: None,
        }
    }

    /// Recompute Pending/Ready from the team slots. Resolved matches are left alone.
    pub fn update_status(&mut self) {
        if self.is_resolved() {
            return;
        }
        self.status = if self.team_count() == 2 {
            MatchStatus::Ready
        } else {
            MatchStatus::Pending
        };
    }

    /// Number of filled team slots (0, 1, or 2).
    pub fn team_count(&self) -> usize {
        usize::from(self.team1.is_some()) + usize::from(self.team2.is_some())
    }

    /// True once a winner has been recorded (completed or walkover).
    pub fn is_resolved(&self) -> bool {
        matches!(self.status, MatchStatus::Completed | MatchStatus::Walkover)
    }

    pub fn has_team(&self, registration: RegistrationId) -> bool {
        self.team1 == Some(registration) || self.team2 == Some(registration)
    }

    /// The non-winner, once a winner is set and both teams are known.
    /// A bye has no loser.
    pub fn loser(&self) -> Option<RegistrationId> {
        let winner = self.winner?;
        match (self.team1, self.team2) {
            (Some(t1), Some(t2)) if winner == t1 => Some(t2),
            (Some(t1), Some(t2)) if winner == t2 => Some(t1),
            _ => None,
        }
    }
}
