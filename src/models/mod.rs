//! Data structures for tournaments: registrations, matches, standings.

mod registration;
mod standing;
mod tournament;
mod tournament_match;

pub use registration::{PlayerId, Registration, RegistrationId, RegistrationStatus};
pub use standing::Standing;
pub use tournament::{
    ScoringSettings, Tournament, TournamentError, TournamentId, TournamentStatus, TournamentType,
};
pub use tournament_match::{BracketType, GameId, MatchId, MatchStatus, TournamentMatch};
