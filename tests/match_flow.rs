//! Integration tests for match completion, walkovers, and error paths.

use foosball_tournament_web::{
    complete_match, is_tournament_complete, record_match_score, record_walkover, start_tournament,
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
fn running_tournament(n: usize) -> (Tournament, Vec<RegistrationId>) {
    let mut t = Tournament::new("Office Cup", TournamentType::SingleElimination);
    t.open_registration().unwrap();
    let regs: Vec<RegistrationId> = (0..n)
        .map(|_| t.register(Uuid::new_v4(), None, None).unwrap())
        .collect();
    for (i, &reg) in regs.iter().enumerate() {
        t.set_seed(reg, Some(i as u32 + 1)).unwrap();
    }
    start_tournament(&mut t, &mut rng()).unwrap();
    (t, regs)
}

fn match_at(t: &Tournament, round: u32, number: u32) -> &TournamentMatch {
    t.matches
        .iter()
        .find(|m| {
            m.bracket_type == BracketType::Main
                && m.round_number == round
                && m.match_number == number
        })
        .unwrap()
}

#[test]
fn completing_a_pending_match_fails() {
    let (mut t, regs) = running_tournament(4);
    let final_id = match_at(&t, 2, 1).id;
    assert_eq!(
        complete_match(&mut t, final_id, regs[0], Uuid::new_v4()),
        Err(TournamentError::MatchNotReady {
            status: MatchStatus::Pending
        })
    );
}

#[test]
fn completing_a_resolved_match_fails() {
    let (mut t, regs) = running_tournament(4);
    let m11_id = match_at(&t, 1, 1).id;
    complete_match(&mut t, m11_id, regs[0], Uuid::new_v4()).unwrap();
    assert_eq!(
        complete_match(&mut t, m11_id, regs[0], Uuid::new_v4()),
        Err(TournamentError::MatchNotReady {
            status: MatchStatus::Completed
        })
    );
}

#[test]
fn winner_must_be_one_of_the_assigned_teams() {
    let (mut t, regs) = running_tournament(4);
    let m11_id = match_at(&t, 1, 1).id; // seed 1 vs seed 4
    assert_eq!(
        complete_match(&mut t, m11_id, regs[1], Uuid::new_v4()),
        Err(TournamentError::WinnerNotInMatch(regs[1]))
    );
    assert_eq!(match_at(&t, 1, 1).status, MatchStatus::Ready);
}

#[test]
fn unknown_match_id_fails() {
    let (mut t, regs) = running_tournament(4);
    let bogus = Uuid::new_v4();
    assert_eq!(
        complete_match(&mut t, bogus, regs[0], Uuid::new_v4()),
        Err(TournamentError::MatchNotFound(bogus))
    );
}

#[test]
fn tie_scores_are_rejected() {
    let (mut t, _) = running_tournament(4);
    let m11_id = match_at(&t, 1, 1).id;
    assert_eq!(
        record_match_score(&mut t, m11_id, 5, 5, Uuid::new_v4()),
        Err(TournamentError::DrawNotAllowed)
    );
    assert_eq!(match_at(&t, 1, 1).status, MatchStatus::Ready);
}

#[test]
fn score_derives_the_winner_and_advances_it() {
    let (mut t, _) = running_tournament(4);
    let m11 = match_at(&t, 1, 1);
    let (m11_id, team2) = (m11.id, m11.team2.unwrap());
    let game = Uuid::new_v4();

    let updated = record_match_score(&mut t, m11_id, 4, 10, game).unwrap();
    let m11 = match_at(&t, 1, 1);
    assert_eq!(m11.status, MatchStatus::Completed);
    assert_eq!(m11.winner, Some(team2));
    assert_eq!(m11.game, Some(game));
    assert!(match_at(&t, 2, 1).has_team(team2));
    assert_eq!(updated, vec![m11_id, match_at(&t, 2, 1).id]);
}

#[test]
fn walkover_advances_the_winner_without_a_game() {
    let (mut t, regs) = running_tournament(4);
    let m12_id = match_at(&t, 1, 2).id; // seed 2 vs seed 3

    record_walkover(&mut t, m12_id, regs[2]).unwrap();
    let m12 = match_at(&t, 1, 2);
    assert_eq!(m12.status, MatchStatus::Walkover);
    assert_eq!(m12.winner, Some(regs[2]));
    assert_eq!(m12.game, None);
    assert!(match_at(&t, 2, 1).has_team(regs[2]));
}

#[test]
fn walkover_on_a_pending_match_fails() {
    let (mut t, regs) = running_tournament(4);
    let final_id = match_at(&t, 2, 1).id;
    assert_eq!(
        record_walkover(&mut t, final_id, regs[0]),
        Err(TournamentError::MatchNotReady {
            status: MatchStatus::Pending
        })
    );
}

#[test]
fn completion_flag_flips_once_and_stays() {
    let (mut t, regs) = running_tournament(2);
    assert!(!is_tournament_complete(&t));
    assert_eq!(t.status, TournamentStatus::InProgress);

    let final_id = match_at(&t, 1, 1).id;
    complete_match(&mut t, final_id, regs[0], Uuid::new_v4()).unwrap();
    assert!(is_tournament_complete(&t));
    assert_eq!(t.status, TournamentStatus::Completed);
    assert!(is_tournament_complete(&t));
}

#[test]
fn full_single_elimination_playthrough() {
    let (mut t, regs) = running_tournament(4);

    let m11_id = match_at(&t, 1, 1).id;
    complete_match(&mut t, m11_id, regs[0], Uuid::new_v4()).unwrap();
    let m12_id = match_at(&t, 1, 2).id;
    complete_match(&mut t, m12_id, regs[1], Uuid::new_v4()).unwrap();

    let final_match = match_at(&t, 2, 1);
    assert_eq!(final_match.status, MatchStatus::Ready);
    assert!(final_match.has_team(regs[0]) && final_match.has_team(regs[1]));

    let final_id = final_match.id;
    complete_match(&mut t, final_id, regs[1], Uuid::new_v4()).unwrap();
    assert_eq!(t.status, TournamentStatus::Completed);
    assert_eq!(match_at(&t, 2, 1).winner, Some(regs[1]));
}
