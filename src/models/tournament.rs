//! Tournament: lifecycle, registrations, the match arena, and standings.

use crate::models::registration::{PlayerId, Registration, RegistrationId};
use crate::models::standing::Standing;
use crate::models::tournament_match::{BracketType, MatchId, MatchStatus, TournamentMatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer active registrations than the bracket type's minimum.
    NotEnoughParticipants { minimum: usize, actual: usize },
    /// Bracket generation was requested twice for the same tournament.
    BracketAlreadyGenerated,
    /// The match is not Ready (still waiting for teams, or already resolved).
    MatchNotReady { status: MatchStatus },
    /// Elimination matches cannot end in a tie.
    DrawNotAllowed,
    /// The designated winner is neither of the match's assigned teams.
    WinnerNotInMatch(RegistrationId),
    /// No bracket strategy registered for this tournament type.
    UnsupportedTournamentType(TournamentType),
    /// Tournament is not in a status that allows this action.
    InvalidState,
    MatchNotFound(MatchId),
    RegistrationNotFound(RegistrationId),
    /// The player (or partner) already has an active registration.
    PlayerAlreadyRegistered(PlayerId),
    /// The max_participants cap has been reached.
    TournamentFull,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughParticipants { minimum, actual } => {
                write!(f, "Need at least {} participants (have {})", minimum, actual)
            }
            TournamentError::BracketAlreadyGenerated => {
                write!(f, "Bracket has already been generated")
            }
            TournamentError::MatchNotReady { status } => {
                write!(f, "Match is not ready to be completed (status: {:?})", status)
            }
            TournamentError::DrawNotAllowed => {
                write!(f, "Tournament matches cannot end in a tie")
            }
            TournamentError::WinnerNotInMatch(_) => {
                write!(f, "Winner must be one of the teams in the match")
            }
            TournamentError::UnsupportedTournamentType(t) => {
                write!(f, "Tournament type not supported: {:?}", t)
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::RegistrationNotFound(_) => write!(f, "Registration not found"),
            TournamentError::PlayerAlreadyRegistered(_) => {
                write!(f, "Player is already registered for this tournament")
            }
            TournamentError::TournamentFull => write!(f, "Tournament is full"),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Bracket format. Exactly these two variants will ever exist.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentType {
    SingleElimination,
    DoubleElimination,
}

/// Tournament lifecycle. Completed and Cancelled are terminal.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Draft,
    RegistrationOpen,
    InProgress,
    Completed,
    Cancelled,
}

/// Points awarded per outcome when updating standings.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub points_for_win: i32,
    pub points_for_draw: i32,
    pub points_for_loss: i32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            points_for_win: 3,
            points_for_draw: 1,
            points_for_loss: 0,
        }
    }
}

/// Full tournament state: registrations, the match arena, and standings.
/// The tournament owns its matches; links between matches are id lookups.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub tournament_type: TournamentType,
    pub status: TournamentStatus,
    /// Cap on active registrations; None means unlimited.
    pub max_participants: Option<usize>,
    pub scoring: ScoringSettings,
    pub registrations: Vec<Registration>,
    pub matches: Vec<TournamentMatch>,
    /// Kept in rank order after every recompute.
    pub standings: Vec<Standing>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Draft with no registrations.
    pub fn new(name: impl Into<String>, tournament_type: TournamentType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tournament_type,
            status: TournamentStatus::Draft,
            max_participants: None,
            scoring: ScoringSettings::default(),
            registrations: Vec::new(),
            matches: Vec::new(),
            standings: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Open registration (Draft only).
    pub fn open_registration(&mut self) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Draft {
            return Err(TournamentError::InvalidState);
        }
        self.status = TournamentStatus::RegistrationOpen;
        Ok(())
    }

    /// Cancel the tournament (any non-terminal status).
    pub fn cancel(&mut self) -> Result<(), TournamentError> {
        if matches!(
            self.status,
            TournamentStatus::Completed | TournamentStatus::Cancelled
        ) {
            return Err(TournamentError::InvalidState);
        }
        self.status = TournamentStatus::Cancelled;
        Ok(())
    }

    /// One-way transition to Completed; a no-op unless the tournament is in progress.
    pub(crate) fn complete(&mut self) {
        if self.status == TournamentStatus::InProgress {
            self.status = TournamentStatus::Completed;
        }
    }

    /// Register an entrant: a single player, or a pair when `partner` is set.
    /// A player may appear in at most one active registration.
    pub fn register(
        &mut self,
        player: PlayerId,
        partner: Option<PlayerId>,
        team_name: Option<String>,
    ) -> Result<RegistrationId, TournamentError> {
        if self.status != TournamentStatus::RegistrationOpen {
            return Err(TournamentError::InvalidState);
        }
        if let Some(max) = self.max_participants {
            if self.active_registrations().count() >= max {
                return Err(TournamentError::TournamentFull);
            }
        }
        for pid in std::iter::once(player).chain(partner) {
            if self.registrations.iter().any(|r| r.is_active() && r.involves(pid)) {
                return Err(TournamentError::PlayerAlreadyRegistered(pid));
            }
        }
        let registration = match partner {
            Some(partner) => Registration::team(player, partner, team_name),
            None => Registration::new(player),
        };
        let id = registration.id;
        self.registrations.push(registration);
        Ok(id)
    }

    /// Withdraw an entrant before the tournament starts.
    pub fn withdraw(&mut self, registration_id: RegistrationId) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::RegistrationOpen {
            return Err(TournamentError::InvalidState);
        }
        let registration = self
            .registrations
            .iter_mut()
            .find(|r| r.id == registration_id && r.is_active())
            .ok_or(TournamentError::RegistrationNotFound(registration_id))?;
        registration.withdraw();
        Ok(())
    }

    /// Assign or clear an entrant's seed (before the tournament starts).
    pub fn set_seed(
        &mut self,
        registration_id: RegistrationId,
        seed: Option<u32>,
    ) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::RegistrationOpen {
            return Err(TournamentError::InvalidState);
        }
        let registration = self
            .registrations
            .iter_mut()
            .find(|r| r.id == registration_id)
            .ok_or(TournamentError::RegistrationNotFound(registration_id))?;
        registration.seed = seed;
        Ok(())
    }

    /// Active registrations in registration order.
    pub fn active_registrations(&self) -> impl Iterator<Item = &Registration> {
        self.registrations.iter().filter(|r| r.is_active())
    }

    pub fn registration(&self, id: RegistrationId) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&TournamentMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Matches ordered for display: main bracket first, then by round and match number.
    pub fn bracket(&self) -> Vec<&TournamentMatch> {
        let mut view: Vec<&TournamentMatch> = self.matches.iter().collect();
        view.sort_by_key(|m| {
            let bracket = match m.bracket_type {
                BracketType::Main => 0,
                BracketType::Losers => 1,
            };
            (bracket, m.round_number, m.match_number)
        });
        view
    }
}
