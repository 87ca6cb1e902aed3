//! Bracket generation: strategy lookup by tournament type and the
//! generate/start entry points.

use crate::logic::{double_elimination, ordering, single_elimination};
use crate::models::{
    RegistrationId, Tournament, TournamentError, TournamentMatch, TournamentStatus, TournamentType,
};
use rand::Rng;

/// A bracket-building strategy for one tournament type.
pub struct BracketStrategy {
    pub minimum_participants: usize,
    pub generate: fn(&[RegistrationId]) -> Vec<TournamentMatch>,
    pub is_complete: fn(&Tournament) -> bool,
}

static SINGLE_ELIMINATION: BracketStrategy = BracketStrategy {
    minimum_participants: 2,
    generate: single_elimination::generate,
    is_complete: single_elimination::is_complete,
};

// A 2-entrant double-elimination bracket degenerates, hence the minimum of 3.
static DOUBLE_ELIMINATION: BracketStrategy = BracketStrategy {
    minimum_participants: 3,
    generate: double_elimination::generate,
    is_complete: double_elimination::is_complete,
};

/// Look up the strategy for a tournament type.
pub fn strategy_for(tournament_type: TournamentType) -> Option<&'static BracketStrategy> {
    match tournament_type {
        TournamentType::SingleElimination => Some(&SINGLE_ELIMINATION),
        TournamentType::DoubleElimination => Some(&DOUBLE_ELIMINATION),
    }
}

/// Generate the bracket from the tournament's active registrations. The whole
/// match arena is built (including cascaded byes) before it is attached, so a
/// failed generation leaves the tournament untouched.
pub fn generate_bracket(
    tournament: &mut Tournament,
    rng: &mut impl Rng,
) -> Result<(), TournamentError> {
    if !tournament.matches.is_empty() {
        return Err(TournamentError::BracketAlreadyGenerated);
    }
    let strategy = strategy_for(tournament.tournament_type)
        .ok_or(TournamentError::UnsupportedTournamentType(tournament.tournament_type))?;
    let entrants = ordering::order_registrations(&tournament.registrations, rng);
    if entrants.len() < strategy.minimum_participants {
        return Err(TournamentError::NotEnoughParticipants {
            minimum: strategy.minimum_participants,
            actual: entrants.len(),
        });
    }
    let matches = (strategy.generate)(&entrants);
    log::info!(
        "Generated {} matches for tournament {} ({} entrants, {:?})",
        matches.len(),
        tournament.id,
        entrants.len(),
        tournament.tournament_type
    );
    tournament.matches = matches;
    Ok(())
}

/// Close registration and start play: generates the bracket and moves the
/// tournament to InProgress.
pub fn start_tournament(
    tournament: &mut Tournament,
    rng: &mut impl Rng,
) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::RegistrationOpen {
        return Err(TournamentError::InvalidState);
    }
    generate_bracket(tournament, rng)?;
    tournament.status = TournamentStatus::InProgress;
    log::info!("Tournament {} started", tournament.id);
    Ok(())
}
