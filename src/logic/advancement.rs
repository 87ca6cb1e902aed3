//! Match completion, walkovers, and advancement through the bracket graph.

use crate::logic::generator::strategy_for;
use crate::logic::standings;
use crate::models::{
    GameId, MatchId, MatchStatus, RegistrationId, Tournament, TournamentError, TournamentMatch,
    TournamentStatus,
};
use std::collections::VecDeque;

/// Record a match result from a played game. Returns the match itself plus
/// every downstream match that changed (advanced teams, cascaded byes).
pub fn complete_match(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner: RegistrationId,
    game: GameId,
) -> Result<Vec<MatchId>, TournamentError> {
    finalize(tournament, match_id, winner, Some(game), None)
}

/// Record a match result from a score pair: derives the winner, rejects ties,
/// and feeds the goals into standings.
pub fn record_match_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    team1_score: u32,
    team2_score: u32,
    game: GameId,
) -> Result<Vec<MatchId>, TournamentError> {
    if team1_score == team2_score {
        return Err(TournamentError::DrawNotAllowed);
    }
    let m = tournament
        .get_match(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let (team1, team2) = match (m.team1, m.team2) {
        (Some(t1), Some(t2)) => (t1, t2),
        _ => return Err(TournamentError::MatchNotReady { status: m.status }),
    };
    let (winner, score) = if team1_score > team2_score {
        (team1, (team1_score, team2_score))
    } else {
        (team2, (team2_score, team1_score))
    };
    finalize(tournament, match_id, winner, Some(game), Some(score))
}

/// Record a walkover: the designated side wins without a played game.
/// Standings are untouched; the loser (if any) is still routed.
pub fn record_walkover(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner: RegistrationId,
) -> Result<Vec<MatchId>, TournamentError> {
    finalize(tournament, match_id, winner, None, None)
}

/// Whether the tournament has concluded (final round or grand finals resolved).
pub fn is_tournament_complete(tournament: &Tournament) -> bool {
    strategy_for(tournament.tournament_type)
        .map(|s| (s.is_complete)(tournament))
        .unwrap_or(false)
}

/// Shared resolve path for results and walkovers. `score` is
/// (winner goals, loser goals) when the result came from a recorded score.
fn finalize(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner: RegistrationId,
    game: Option<GameId>,
    score: Option<(u32, u32)>,
) -> Result<Vec<MatchId>, TournamentError> {
    let idx = tournament
        .matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;

    // Validate everything before mutating anything.
    {
        let m = &tournament.matches[idx];
        if m.status != MatchStatus::Ready {
            return Err(TournamentError::MatchNotReady { status: m.status });
        }
        if !m.has_team(winner) {
            return Err(TournamentError::WinnerNotInMatch(winner));
        }
    }

    let (loser, next, consolation) = {
        let m = &mut tournament.matches[idx];
        m.winner = Some(winner);
        m.game = game;
        m.status = if game.is_some() {
            MatchStatus::Completed
        } else {
            MatchStatus::Walkover
        };
        (m.loser(), m.next_match, m.consolation_match)
    };
    log::debug!(
        "Match {} resolved: winner {} ({})",
        match_id,
        winner,
        if game.is_some() { "completed" } else { "walkover" }
    );

    // Walkovers have no underlying game and leave standings untouched.
    if game.is_some() {
        standings::record_result(tournament, winner, loser, score);
    }

    let mut updated = vec![match_id];
    let mut queue = VecDeque::new();
    if let Some(next_id) = next {
        push_team(&mut tournament.matches, next_id, winner);
        updated.push(next_id);
        queue.push_back(next_id);
    }
    if let (Some(consolation_id), Some(loser)) = (consolation, loser) {
        push_team(&mut tournament.matches, consolation_id, loser);
        updated.push(consolation_id);
        queue.push_back(consolation_id);
    }
    for id in settle(&mut tournament.matches, queue) {
        if !updated.contains(&id) {
            updated.push(id);
        }
    }

    maybe_complete(tournament);
    Ok(updated)
}

/// Fill the first empty slot of a match and recompute its readiness.
fn push_team(matches: &mut [TournamentMatch], id: MatchId, team: RegistrationId) {
    if let Some(m) = matches.iter_mut().find(|m| m.id == id) {
        if m.team1.is_none() {
            m.team1 = Some(team);
        } else if m.team2.is_none() {
            m.team2 = Some(team);
        }
        m.update_status();
    }
}

/// Work queue of matches needing a readiness recheck. A match holding exactly
/// one team whose empty slot can never be filled is resolved as a bye (its
/// sole team wins by walkover) and the winner pushed onward, so byes cascade
/// without caller action. Shared by generation and advancement.
pub(crate) fn settle(
    matches: &mut Vec<TournamentMatch>,
    mut queue: VecDeque<MatchId>,
) -> Vec<MatchId> {
    let mut updated = Vec::new();
    while let Some(id) = queue.pop_front() {
        let idx = match matches.iter().position(|m| m.id == id) {
            Some(i) => i,
            None => continue,
        };
        if matches[idx].is_resolved() || matches[idx].team_count() != 1 {
            continue;
        }
        if potential_teams(matches, id) != 1 {
            continue;
        }
        let winner = match matches[idx].team1.or(matches[idx].team2) {
            Some(w) => w,
            None => continue,
        };
        matches[idx].winner = Some(winner);
        matches[idx].status = MatchStatus::Walkover;
        if !updated.contains(&id) {
            updated.push(id);
        }
        log::debug!("Match {} resolved as bye: winner {}", id, winner);

        let next = matches[idx].next_match;
        let consolation = matches[idx].consolation_match;
        if let Some(next_id) = next {
            push_team(matches, next_id, winner);
            if !updated.contains(&next_id) {
                updated.push(next_id);
            }
            queue.push_back(next_id);
        }
        // A bye has no loser: its consolation target is now waiting on one
        // team fewer and may itself have become a bye.
        if let Some(consolation_id) = consolation {
            queue.push_back(consolation_id);
        }
    }
    updated
}

/// How many teams this match can still end up holding: currently filled slots
/// plus one for every unresolved upstream link that can still deliver. A
/// winner link delivers iff its source will hold at least one team; a loser
/// link iff its source will hold two.
fn potential_teams(matches: &[TournamentMatch], id: MatchId) -> usize {
    let m = match matches.iter().find(|m| m.id == id) {
        Some(m) => m,
        None => return 0,
    };
    let mut potential = m.team_count();
    for source in matches {
        if source.id == id || source.is_resolved() {
            continue;
        }
        if source.next_match == Some(id) && potential_teams(matches, source.id) >= 1 {
            potential += 1;
        }
        if source.consolation_match == Some(id) && potential_teams(matches, source.id) >= 2 {
            potential += 1;
        }
    }
    potential
}

fn maybe_complete(tournament: &mut Tournament) {
    if tournament.status == TournamentStatus::Completed {
        return;
    }
    if is_tournament_complete(tournament) {
        log::info!("Tournament {} completed", tournament.id);
        tournament.complete();
    }
}
