//! Standings upkeep: per-entrant records and ranking.

use crate::models::{RegistrationId, Standing, Tournament};

/// Record a completed match for both participants. `score` is
/// (winner goals, loser goals); None when only the winner is known.
pub(crate) fn record_result(
    tournament: &mut Tournament,
    winner: RegistrationId,
    loser: Option<RegistrationId>,
    score: Option<(u32, u32)>,
) {
    let (winner_goals, loser_goals) = score.unwrap_or((0, 0));
    let scoring = tournament.scoring;
    standing_mut(&mut tournament.standings, winner).record_win(
        winner_goals,
        loser_goals,
        scoring.points_for_win,
    );
    if let Some(loser) = loser {
        standing_mut(&mut tournament.standings, loser).record_loss(
            loser_goals,
            winner_goals,
            scoring.points_for_loss,
        );
    }
    recalculate_positions(tournament);
}

/// Re-rank all standings: points desc, then goal difference desc, then
/// goals-for desc, then games played asc (fewer games ranks higher on ties).
/// The standings collection is kept in rank order.
pub fn recalculate_positions(tournament: &mut Tournament) {
    tournament.standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(b.goals_for.cmp(&a.goals_for))
            .then(a.games_played.cmp(&b.games_played))
    });
    for (i, standing) in tournament.standings.iter_mut().enumerate() {
        standing.position = i as u32 + 1;
    }
}

/// Standing for a registration, created lazily on first use.
fn standing_mut(standings: &mut Vec<Standing>, registration: RegistrationId) -> &mut Standing {
    let idx = match standings.iter().position(|s| s.registration == registration) {
        Some(i) => i,
        None => {
            standings.push(Standing::new(registration));
            standings.len() - 1
        }
    };
    &mut standings[idx]
}
