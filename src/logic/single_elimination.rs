//! Single-elimination bracket: one loss eliminates.

use crate::logic::advancement;
use crate::models::{BracketType, MatchId, RegistrationId, Tournament, TournamentMatch};
use std::collections::VecDeque;

/// Build a single-elimination bracket from the ordered entrants.
/// Byes are settled immediately, cascading as far as they reach.
pub(crate) fn generate(entrants: &[RegistrationId]) -> Vec<TournamentMatch> {
    let rounds = round_count(entrants.len());
    let mut matches = build_main_bracket(rounds);
    assign_first_round(&mut matches, entrants, rounds);
    let all: VecDeque<MatchId> = matches.iter().map(|m| m.id).collect();
    advancement::settle(&mut matches, all);
    matches
}

/// Complete once every match in the last round is resolved.
pub(crate) fn is_complete(tournament: &Tournament) -> bool {
    let last_round = match tournament.matches.iter().map(|m| m.round_number).max() {
        Some(r) => r,
        None => return false,
    };
    tournament
        .matches
        .iter()
        .filter(|m| m.round_number == last_round)
        .all(|m| m.is_resolved())
}

/// ceil(log2(n)): rounds needed so every entrant fits into round 1.
pub(crate) fn round_count(participants: usize) -> u32 {
    let mut rounds = 0;
    while (1usize << rounds) < participants {
        rounds += 1;
    }
    rounds
}

/// Create the main bracket: `2^(rounds - r)` matches in round `r`, each
/// non-final match feeding match `(number + 1) / 2` of the next round.
pub(crate) fn build_main_bracket(rounds: u32) -> Vec<TournamentMatch> {
    let mut matches = Vec::new();
    for round in 1..=rounds {
        let in_round = 1u32 << (rounds - round);
        for number in 1..=in_round {
            matches.push(TournamentMatch::new(round, number, BracketType::Main));
        }
    }
    for i in 0..matches.len() {
        let (round, number) = (matches[i].round_number, matches[i].match_number);
        if round == rounds {
            continue;
        }
        let next = find_match(&matches, BracketType::Main, round + 1, (number + 1) / 2);
        matches[i].next_match = next;
    }
    matches
}

pub(crate) fn find_match(
    matches: &[TournamentMatch],
    bracket: BracketType,
    round: u32,
    number: u32,
) -> Option<MatchId> {
    matches
        .iter()
        .find(|m| {
            m.bracket_type == bracket && m.round_number == round && m.match_number == number
        })
        .map(|m| m.id)
}

/// Place ordered entrants into the round-1 slots through the canonical
/// seeding permutation, so the best-ordered entrants meet as late as
/// possible and byes fall to them first. Slots past the entrant count stay empty.
pub(crate) fn assign_first_round(
    matches: &mut [TournamentMatch],
    entrants: &[RegistrationId],
    rounds: u32,
) {
    let slots = 1usize << rounds;
    for (slot, seed) in seed_positions(slots).into_iter().enumerate() {
        if seed > entrants.len() {
            continue;
        }
        let number = (slot / 2 + 1) as u32;
        if let Some(m) = matches.iter_mut().find(|m| {
            m.bracket_type == BracketType::Main && m.round_number == 1 && m.match_number == number
        }) {
            if slot % 2 == 0 {
                m.team1 = Some(entrants[seed - 1]);
            } else {
                m.team2 = Some(entrants[seed - 1]);
            }
            m.update_status();
        }
    }
}

/// Seed number for each round-1 slot, built by recursive doubling:
/// [1], [1,2], [1,4,2,3], [1,8,4,5,2,7,3,6], ...
fn seed_positions(size: usize) -> Vec<usize> {
    let mut order = vec![1];
    let mut n = 1;
    while n < size {
        n *= 2;
        let mut next = Vec::with_capacity(n);
        for &s in &order {
            next.push(s);
            next.push(n + 1 - s);
        }
        order = next;
    }
    order
}
