//! Integration tests for the tournament record and lifecycle: generate, report, advance, complete.

use bracket_tournament_web::{
    advance_round, canonical_sport_type, generate_bracket, report_result, tournament_progress, GameMatch, MatchStatus,
    Player, PlayerId, Shuffler, Tournament, TournamentError, TournamentStatus, SPORT_TYPES,
};

struct KeepOrder;

impl Shuffler for KeepOrder {
    fn shuffle(&mut self, _ids: &mut [PlayerId]) {}
}

fn tournament_with_players(n: usize) -> Tournament {
    let players: Vec<Player> = (0..n)
        .map(|i| Player::new(format!("P{i}"), "Team"))
        .collect();
    Tournament::with_players("Cup", "Table Tennis", players)
}

/// Report player 1 as winner of every undecided match in the current round.
fn play_current_round(t: &mut Tournament) {
    let open: Vec<_> = t
        .round_matches(t.current_round)
        .into_iter()
        .filter(|m| m.winner_id.is_none())
        .map(|m| (m.id, m.player1_id))
        .collect();
    for (match_id, winner) in open {
        report_result(t, match_id, winner, None).unwrap();
    }
}

#[test]
fn generate_activates_and_sets_rounds() {
    let mut t = tournament_with_players(5);
    generate_bracket(&mut t, &mut KeepOrder).unwrap();

    assert_eq!(t.status, TournamentStatus::Active);
    assert_eq!(t.current_round, 1);
    assert_eq!(t.total_rounds, 3);
    assert_eq!(t.matches.len(), 4);

    assert_eq!(
        generate_bracket(&mut t, &mut KeepOrder),
        Err(TournamentError::BracketAlreadyGenerated)
    );
}

#[test]
fn generate_uses_active_players_only() {
    let mut t = tournament_with_players(3);
    let dropped = t.players[2].id;
    t.deactivate_player(dropped).unwrap();
    generate_bracket(&mut t, &mut KeepOrder).unwrap();

    assert_eq!(t.total_rounds, 1);
    assert_eq!(t.matches.len(), 1);
    assert!(!t.matches[0].involves(dropped));
}

#[test]
fn generate_needs_two_active_players() {
    let mut t = tournament_with_players(1);
    assert_eq!(
        generate_bracket(&mut t, &mut KeepOrder),
        Err(TournamentError::InvalidRoster { players: 1 })
    );
    assert_eq!(t.status, TournamentStatus::Draft);
    assert!(t.matches.is_empty());
}

#[test]
fn advance_requires_completed_round() {
    let mut t = tournament_with_players(4);
    generate_bracket(&mut t, &mut KeepOrder).unwrap();
    assert_eq!(
        advance_round(&mut t),
        Err(TournamentError::RoundNotComplete { round: 1 })
    );

    play_current_round(&mut t);
    advance_round(&mut t).unwrap();
    assert_eq!(t.current_round, 2);
    let final_round = t.round_matches(2);
    assert_eq!(final_round.len(), 1);
    assert_eq!(final_round[0].status, MatchStatus::Pending);
    assert!(final_round[0].player2_id.is_some());
}

#[test]
fn five_player_tournament_runs_to_a_champion() {
    let mut t = tournament_with_players(5);
    generate_bracket(&mut t, &mut KeepOrder).unwrap();

    for round in 1..=3 {
        assert_eq!(t.current_round, round);
        assert_eq!(t.champion(), None);
        play_current_round(&mut t);
        if round < 3 {
            advance_round(&mut t).unwrap();
        }
    }

    assert_eq!(t.status, TournamentStatus::Completed);
    let p = tournament_progress(&t).unwrap();
    assert!(p.is_complete);
    assert_eq!(p.percentage, 100.0);
    // 4 + 2 + 1 matches; player 0 wins every head-to-head in seeding order
    assert_eq!(t.matches.len(), 7);
    assert_eq!(t.champion(), Some(t.players[0].id));
    assert_eq!(advance_round(&mut t), Err(TournamentError::InvalidState));
}

#[test]
fn completed_status_blocks_advance_when_record_is_final() {
    let mut t = tournament_with_players(2);
    generate_bracket(&mut t, &mut KeepOrder).unwrap();
    play_current_round(&mut t);
    assert_eq!(t.status, TournamentStatus::Completed);

    // Force the record back to active: the progress gate still refuses
    t.status = TournamentStatus::Active;
    assert_eq!(advance_round(&mut t), Err(TournamentError::TournamentComplete));
}

#[test]
fn report_validates_match_and_winner() {
    let mut t = tournament_with_players(3);
    generate_bracket(&mut t, &mut KeepOrder).unwrap();
    let head_to_head = t.matches[0].clone();
    let bye = t.matches[1].clone();
    assert!(bye.is_bye());

    assert_eq!(
        report_result(&mut t, bye.id, bye.player1_id, None),
        Err(TournamentError::ByeMatchLocked(bye.id))
    );
    assert_eq!(
        report_result(&mut t, head_to_head.id, bye.player1_id, None),
        Err(TournamentError::NotAParticipant {
            match_id: head_to_head.id,
            player_id: bye.player1_id,
        })
    );
    let missing = uuid::Uuid::new_v4();
    assert_eq!(
        report_result(&mut t, missing, bye.player1_id, None),
        Err(TournamentError::MatchNotFound(missing))
    );

    let winner = head_to_head.player2_id.unwrap();
    report_result(&mut t, head_to_head.id, winner, Some("3-1".to_string())).unwrap();
    let m = t.get_match(head_to_head.id).unwrap();
    assert_eq!(m.winner_id, Some(winner));
    assert_eq!(m.status, MatchStatus::Completed);
    assert_eq!(m.notes.as_deref(), Some("3-1"));
}

#[test]
fn earlier_rounds_are_closed_after_advancing() {
    let mut t = tournament_with_players(4);
    generate_bracket(&mut t, &mut KeepOrder).unwrap();
    play_current_round(&mut t);
    advance_round(&mut t).unwrap();

    let first = t.round_matches(1)[0].clone();
    let loser = first.player2_id.unwrap();
    assert_eq!(
        report_result(&mut t, first.id, loser, None),
        Err(TournamentError::InvalidState)
    );
}

#[test]
fn start_match_moves_pending_to_in_progress() {
    let mut t = tournament_with_players(3);
    generate_bracket(&mut t, &mut KeepOrder).unwrap();
    let id = t.matches[0].id;
    t.start_match(id).unwrap();
    assert_eq!(t.get_match(id).unwrap().status, MatchStatus::InProgress);
    assert_eq!(t.start_match(id), Err(TournamentError::InvalidState));

    let bye_id = t.matches[1].id;
    assert_eq!(t.start_match(bye_id), Err(TournamentError::InvalidState));
}

#[test]
fn insert_matches_rejects_duplicate_slots_atomically() {
    let mut t = tournament_with_players(4);
    generate_bracket(&mut t, &mut KeepOrder).unwrap();
    let before = t.matches.len();

    let fresh = GameMatch::new(t.id, 2, 1, t.players[0].id, t.players[2].id);
    let clash = GameMatch::new(t.id, 1, 2, t.players[1].id, t.players[3].id);
    assert_eq!(
        t.insert_matches(vec![fresh.clone(), clash]),
        Err(TournamentError::DuplicateMatch {
            round_number: 1,
            match_number: 2
        })
    );
    assert_eq!(t.matches.len(), before);

    assert_eq!(
        t.insert_matches(vec![fresh.clone(), fresh.clone()]),
        Err(TournamentError::DuplicateMatch {
            round_number: 2,
            match_number: 1
        })
    );
    let foreign = GameMatch::new(uuid::Uuid::new_v4(), 3, 1, t.players[0].id, t.players[1].id);
    assert_eq!(
        t.insert_matches(vec![foreign]),
        Err(TournamentError::InvalidState)
    );
    assert_eq!(t.matches.len(), before);
}

#[test]
fn roster_edits_only_in_draft() {
    let mut t = tournament_with_players(2);
    assert_eq!(
        t.add_player(Player::new(" p0 ", " team ")),
        Err(TournamentError::DuplicatePlayer {
            name: "p0".to_string(),
            team_name: "team".to_string(),
        })
    );
    assert_eq!(
        t.add_player(Player::new("   ", "Other")),
        Err(TournamentError::EmptyPlayerName)
    );
    t.add_player(Player::new("P0", "Other")).unwrap();
    let id = t.add_player(Player::new("  Newcomer ", "Other")).unwrap();
    assert_eq!(t.get_player(id).unwrap().name, "Newcomer");

    generate_bracket(&mut t, &mut KeepOrder).unwrap();
    assert_eq!(
        t.add_player(Player::new("Late", "Other")),
        Err(TournamentError::InvalidState)
    );
    assert_eq!(t.deactivate_player(id), Err(TournamentError::InvalidState));
}

#[test]
fn blank_player_name_is_reported_as_such() {
    let mut t = tournament_with_players(0);
    let err = t.add_player(Player::new("", "Red")).unwrap_err();
    assert_eq!(err, TournamentError::EmptyPlayerName);
    assert_eq!(err.to_string(), "Player name is required");
}

#[test]
fn sport_types_resolve_to_canonical_spelling() {
    assert_eq!(canonical_sport_type("table tennis"), Ok("Table Tennis"));
    assert_eq!(canonical_sport_type(" Chess "), Ok("Chess"));
    assert_eq!(
        canonical_sport_type("Curling"),
        Err(TournamentError::UnknownSportType("Curling".to_string()))
    );
    assert!(matches!(
        canonical_sport_type(""),
        Err(TournamentError::UnknownSportType(_))
    ));
    assert!(SPORT_TYPES
        .iter()
        .all(|s| canonical_sport_type(s) == Ok(*s)));
}
