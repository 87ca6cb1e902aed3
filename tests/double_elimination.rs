//! Integration tests for double-elimination brackets: structure, loser
//! routing, and a full playthrough to grand finals.

use foosball_tournament_web::{
    complete_match, generate_bracket, is_tournament_complete, record_walkover, start_tournament,
    BracketType, MatchStatus, RegistrationId, Tournament, TournamentError, TournamentMatch,
    TournamentStatus, TournamentType,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Entrant i gets seed i + 1, so regs[i] enters as seed i + 1.
fn seeded_tournament(n: usize) -> (Tournament, Vec<RegistrationId>) {
    let mut t = Tournament::new("Office Cup", TournamentType::DoubleElimination);
    t.open_registration().unwrap();
    let regs: Vec<RegistrationId> = (0..n)
        .map(|_| t.register(Uuid::new_v4(), None, None).unwrap())
        .collect();
    for (i, &reg) in regs.iter().enumerate() {
        t.set_seed(reg, Some(i as u32 + 1)).unwrap();
    }
    (t, regs)
}

fn match_at(t: &Tournament, bracket: BracketType, round: u32, number: u32) -> &TournamentMatch {
    t.matches
        .iter()
        .find(|m| {
            m.bracket_type == bracket && m.round_number == round && m.match_number == number
        })
        .unwrap()
}

fn grand_finals(t: &Tournament) -> &TournamentMatch {
    t.matches
        .iter()
        .filter(|m| m.bracket_type == BracketType::Main)
        .max_by_key(|m| m.round_number)
        .unwrap()
}

/// Complete a ready match by declaring `winner`; asserts success.
fn win(t: &mut Tournament, match_id: uuid::Uuid, winner: RegistrationId) -> Vec<uuid::Uuid> {
    complete_match(t, match_id, winner, Uuid::new_v4()).unwrap()
}

#[test]
fn eight_entrants_build_both_brackets_and_grand_finals() {
    let (mut t, _) = seeded_tournament(8);
    start_tournament(&mut t, &mut rng()).unwrap();

    // winners: 4 + 2 + 1, losers: 2 + 2 + 1 + 1 + 1, grand finals: 1
    assert_eq!(t.matches.len(), 15);
    let losers_rounds = t
        .matches
        .iter()
        .filter(|m| m.bracket_type == BracketType::Losers)
        .map(|m| m.round_number)
        .max();
    assert_eq!(losers_rounds, Some(5)); // 2 * winners_rounds - 1

    let gf = grand_finals(&t);
    assert_eq!(gf.round_number, 4);
    assert_eq!(gf.consolation_match, None);
    assert_eq!(gf.next_match, None);

    // Every main-bracket match except grand finals routes its loser somewhere.
    for m in t.matches.iter().filter(|m| m.bracket_type == BracketType::Main) {
        if m.id != gf.id {
            assert!(m.consolation_match.is_some(), "round {} match {}", m.round_number, m.match_number);
        }
    }

    // Both bracket finals feed grand finals.
    assert_eq!(match_at(&t, BracketType::Main, 3, 1).next_match, Some(gf.id));
    assert_eq!(match_at(&t, BracketType::Losers, 5, 1).next_match, Some(gf.id));
}

#[test]
fn loser_routing_pairs_round_one_and_tracks_later_rounds() {
    let (mut t, _) = seeded_tournament(8);
    start_tournament(&mut t, &mut rng()).unwrap();

    let lb = |round, number| Some(match_at(&t, BracketType::Losers, round, number).id);
    assert_eq!(match_at(&t, BracketType::Main, 1, 1).consolation_match, lb(1, 1));
    assert_eq!(match_at(&t, BracketType::Main, 1, 2).consolation_match, lb(1, 1));
    assert_eq!(match_at(&t, BracketType::Main, 1, 3).consolation_match, lb(1, 2));
    assert_eq!(match_at(&t, BracketType::Main, 1, 4).consolation_match, lb(1, 2));
    assert_eq!(match_at(&t, BracketType::Main, 2, 1).consolation_match, lb(2, 1));
    assert_eq!(match_at(&t, BracketType::Main, 2, 2).consolation_match, lb(2, 2));
    assert_eq!(match_at(&t, BracketType::Main, 3, 1).consolation_match, lb(4, 1));
}

#[test]
fn two_entrants_are_rejected() {
    let mut t = Tournament::new("Office Cup", TournamentType::DoubleElimination);
    t.open_registration().unwrap();
    for _ in 0..2 {
        t.register(Uuid::new_v4(), None, None).unwrap();
    }
    assert_eq!(
        generate_bracket(&mut t, &mut rng()),
        Err(TournamentError::NotEnoughParticipants {
            minimum: 3,
            actual: 2
        })
    );
}

#[test]
fn completing_a_winners_match_routes_winner_and_loser_exactly_once() {
    let (mut t, regs) = seeded_tournament(8);
    start_tournament(&mut t, &mut rng()).unwrap();

    let m11 = match_at(&t, BracketType::Main, 1, 1);
    let (m11_id, winner, loser) = (m11.id, regs[0], regs[7]); // seeds 1 and 8
    assert!(m11.has_team(winner) && m11.has_team(loser));

    let updated = win(&mut t, m11_id, winner);
    assert!(updated.contains(&m11_id));

    let winner_slots = t
        .matches
        .iter()
        .filter(|m| m.id != m11_id && m.has_team(winner))
        .count();
    let loser_slots = t
        .matches
        .iter()
        .filter(|m| m.id != m11_id && m.has_team(loser))
        .count();
    assert_eq!(winner_slots, 1);
    assert_eq!(loser_slots, 1);
    assert!(match_at(&t, BracketType::Main, 2, 1).has_team(winner));
    assert!(match_at(&t, BracketType::Losers, 1, 1).has_team(loser));
}

#[test]
fn walkover_still_routes_the_loser_to_the_losers_bracket() {
    let (mut t, regs) = seeded_tournament(4);
    start_tournament(&mut t, &mut rng()).unwrap();

    // Seed 4 forfeits against seed 1; a walkover loser still drops down.
    let m11 = match_at(&t, BracketType::Main, 1, 1);
    let (m11_id, loser) = (m11.id, regs[3]);
    assert!(m11.has_team(loser));
    record_walkover(&mut t, m11_id, regs[0]).unwrap();

    assert_eq!(match_at(&t, BracketType::Main, 1, 1).status, MatchStatus::Walkover);
    assert!(match_at(&t, BracketType::Losers, 1, 1).has_team(loser));
    let loser_slots = t
        .matches
        .iter()
        .filter(|m| m.id != m11_id && m.has_team(loser))
        .count();
    assert_eq!(loser_slots, 1);
}

#[test]
fn three_entrants_auto_resolve_the_one_sided_losers_match() {
    let (mut t, regs) = seeded_tournament(3);
    start_tournament(&mut t, &mut rng()).unwrap();

    // Seed 1 got the winners-bracket bye.
    let wb_bye = match_at(&t, BracketType::Main, 1, 1);
    assert_eq!(wb_bye.status, MatchStatus::Walkover);
    assert_eq!(wb_bye.winner, Some(regs[0]));

    // Seed 2 beats seed 3; seed 3 drops to a losers match no one else can
    // ever reach, so it resolves as a bye on arrival.
    let m12_id = match_at(&t, BracketType::Main, 1, 2).id;
    win(&mut t, m12_id, regs[1]);

    let lb1 = match_at(&t, BracketType::Losers, 1, 1);
    assert_eq!(lb1.status, MatchStatus::Walkover);
    assert_eq!(lb1.winner, Some(regs[2]));
    assert!(match_at(&t, BracketType::Losers, 2, 1).has_team(regs[2]));
}

#[test]
fn four_entrants_play_through_to_grand_finals() {
    let (mut t, regs) = seeded_tournament(4);
    start_tournament(&mut t, &mut rng()).unwrap();
    let (s1, s2, s3, s4) = (regs[0], regs[1], regs[2], regs[3]);

    assert!(!is_tournament_complete(&t));

    // Winners round 1: seed 1 beats seed 4, seed 2 beats seed 3.
    let m11_id = match_at(&t, BracketType::Main, 1, 1).id;
    win(&mut t, m11_id, s1);
    let m12_id = match_at(&t, BracketType::Main, 1, 2).id;
    win(&mut t, m12_id, s2);

    // Both losers meet in losers round 1; seed 3 survives.
    let lb1 = match_at(&t, BracketType::Losers, 1, 1);
    assert_eq!(lb1.status, MatchStatus::Ready);
    assert!(lb1.has_team(s3) && lb1.has_team(s4));
    let lb1_id = lb1.id;
    win(&mut t, lb1_id, s3);

    // Winners final: seed 1 advances to grand finals, seed 2 drops down.
    let wb_final = match_at(&t, BracketType::Main, 2, 1);
    assert!(wb_final.has_team(s1) && wb_final.has_team(s2));
    let wb_final_id = wb_final.id;
    win(&mut t, wb_final_id, s1);

    // Losers final: seed 2 beats seed 3, then passes through the one-sided
    // last losers round straight into grand finals.
    let lb2 = match_at(&t, BracketType::Losers, 2, 1);
    assert!(lb2.has_team(s2) && lb2.has_team(s3));
    let lb2_id = lb2.id;
    let updated = win(&mut t, lb2_id, s2);
    let lb3 = match_at(&t, BracketType::Losers, 3, 1);
    assert_eq!(lb3.status, MatchStatus::Walkover);
    assert!(updated.contains(&lb3.id));

    let gf = grand_finals(&t);
    assert!(gf.has_team(s1) && gf.has_team(s2));
    assert_eq!(gf.status, MatchStatus::Ready);
    assert!(!is_tournament_complete(&t));

    let gf_id = gf.id;
    win(&mut t, gf_id, s1);
    assert!(is_tournament_complete(&t));
    assert_eq!(t.status, TournamentStatus::Completed);
    // Stays complete.
    assert!(is_tournament_complete(&t));
}
