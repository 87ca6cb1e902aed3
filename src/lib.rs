//! Foosball tournament web app: bracket engine (models + logic) behind a JSON API.

pub mod logic;
pub mod models;

pub use logic::{
    complete_match, generate_bracket, is_tournament_complete, order_registrations,
    recalculate_positions, record_match_score, record_walkover, start_tournament,
};
pub use models::{
    BracketType, GameId, MatchId, MatchStatus, PlayerId, Registration, RegistrationId,
    RegistrationStatus, ScoringSettings, Standing, Tournament, TournamentError, TournamentId,
    TournamentMatch, TournamentStatus, TournamentType,
};
