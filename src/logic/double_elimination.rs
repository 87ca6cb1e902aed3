//! Double-elimination bracket: winners bracket, losers bracket, grand finals.
//! Losing once drops an entrant into the losers bracket; losing twice eliminates.

use crate::logic::advancement;
use crate::logic::single_elimination::{
    assign_first_round, build_main_bracket, find_match, round_count,
};
use crate::models::{BracketType, MatchId, RegistrationId, Tournament, TournamentMatch};
use std::collections::VecDeque;

/// Build a double-elimination bracket from the ordered entrants.
///
/// The winners bracket is a plain single-elimination tree. The losers bracket
/// has `2 * winners_rounds - 1` rounds; both bracket finals feed a single
/// grand-finals match one round past the winners final.
pub(crate) fn generate(entrants: &[RegistrationId]) -> Vec<TournamentMatch> {
    let winners_rounds = round_count(entrants.len());
    let mut matches = build_main_bracket(winners_rounds);
    matches.extend(build_losers_bracket(winners_rounds));

    let grand_finals = TournamentMatch::new(winners_rounds + 1, 1, BracketType::Main);
    let grand_finals_id = grand_finals.id;
    matches.push(grand_finals);

    link_final(&mut matches, BracketType::Main, winners_rounds, grand_finals_id);
    link_final(
        &mut matches,
        BracketType::Losers,
        2 * winners_rounds - 1,
        grand_finals_id,
    );
    link_consolation(&mut matches, winners_rounds);

    assign_first_round(&mut matches, entrants, winners_rounds);
    let all: VecDeque<MatchId> = matches.iter().map(|m| m.id).collect();
    advancement::settle(&mut matches, all);
    matches
}

/// Complete once the grand finals (highest-round main-bracket match) is resolved.
pub(crate) fn is_complete(tournament: &Tournament) -> bool {
    tournament
        .matches
        .iter()
        .filter(|m| m.bracket_type == BracketType::Main)
        .max_by_key(|m| m.round_number)
        .map(|m| m.is_resolved())
        .unwrap_or(false)
}

fn build_losers_bracket(winners_rounds: u32) -> Vec<TournamentMatch> {
    let rounds = 2 * winners_rounds - 1;
    let mut matches = Vec::new();
    for round in 1..=rounds {
        for number in 1..=losers_round_size(round, winners_rounds) {
            matches.push(TournamentMatch::new(round, number, BracketType::Losers));
        }
    }
    for i in 0..matches.len() {
        let (round, number) = (matches[i].round_number, matches[i].match_number);
        if round == rounds {
            continue;
        }
        // Even rounds pair up into the next round; odd rounds keep their position.
        let next_number = if round % 2 == 0 { (number + 1) / 2 } else { number };
        let next = find_match(&matches, BracketType::Losers, round + 1, next_number);
        matches[i].next_match = next;
    }
    matches
}

/// Losers-bracket round sizes: round 1 takes half of the winners round-1
/// matches; later rounds track the winners round whose losers they receive.
///
/// For several bracket sizes this leaves matches that can only ever receive a
/// single team; those resolve as byes the moment their sole team arrives, so
/// the bracket cannot stall. The sizing for irregular participant counts has
/// not been validated against reference tables beyond modest sizes.
fn losers_round_size(round: u32, winners_rounds: u32) -> u32 {
    if round == 1 {
        return (1u32 << (winners_rounds - 1)) / 2;
    }
    let winners_round_equivalent = (round + 1) / 2;
    let from_winners = if winners_rounds > winners_round_equivalent {
        1u32 << (winners_rounds - winners_round_equivalent - 1)
    } else {
        0
    };
    from_winners.max(1)
}

fn link_final(
    matches: &mut [TournamentMatch],
    bracket: BracketType,
    round: u32,
    grand_finals: MatchId,
) {
    if let Some(m) = matches.iter_mut().find(|m| {
        m.id != grand_finals
            && m.bracket_type == bracket
            && m.round_number == round
            && m.match_number == 1
    }) {
        m.next_match = Some(grand_finals);
    }
}

/// Route every winners-bracket loser to its losers-bracket match: round 1
/// pairs up into losers round 1, round `k > 1` feeds losers round `2k - 2`
/// at the same match number. Grand finals has no consolation match.
fn link_consolation(matches: &mut Vec<TournamentMatch>, winners_rounds: u32) {
    for i in 0..matches.len() {
        if matches[i].bracket_type != BracketType::Main
            || matches[i].round_number > winners_rounds
        {
            continue;
        }
        let (round, number) = (matches[i].round_number, matches[i].match_number);
        let (lb_round, lb_number) = if round == 1 {
            (1, (number + 1) / 2)
        } else {
            (2 * round - 2, number)
        };
        let target = find_match(matches, BracketType::Losers, lb_round, lb_number);
        matches[i].consolation_match = target;
    }
}
