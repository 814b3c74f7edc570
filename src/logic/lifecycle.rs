//! Tournament lifecycle: generate the bracket, advance rounds, mark completion.

use crate::logic::advance::build_next_round;
use crate::logic::bracket::{build_initial_round, Shuffler};
use crate::logic::progress::{compute_progress, Progress};
use crate::models::{
    GameMatch, MatchId, Player, PlayerId, Tournament, TournamentError, TournamentStatus,
};

/// Generate round 1 from the active roster and activate the tournament (Draft only).
pub fn generate_bracket<S: Shuffler + ?Sized>(
    tournament: &mut Tournament,
    shuffler: &mut S,
) -> Result<(), TournamentError> {
    if !tournament.matches.is_empty() {
        return Err(TournamentError::BracketAlreadyGenerated);
    }
    if tournament.status != TournamentStatus::Draft {
        return Err(TournamentError::InvalidState);
    }

    let roster: Vec<Player> = tournament.active_players().cloned().collect();
    let round = build_initial_round(&roster, tournament.id, shuffler)?;
    tournament.insert_matches(round.matches)?;
    tournament.status = TournamentStatus::Active;
    tournament.current_round = 1;
    tournament.total_rounds = round.total_rounds;
    log::info!(
        "Tournament {} bracket generated: {} players, {} rounds, {} byes",
        tournament.id,
        roster.len(),
        round.total_rounds,
        round.bye_count
    );

    refresh_status(tournament);
    Ok(())
}

/// Generate the next round from the current round's winners (current round must be complete).
pub fn advance_round(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status != TournamentStatus::Active {
        return Err(TournamentError::InvalidState);
    }
    let progress = tournament_progress(tournament).ok_or(TournamentError::InvalidState)?;
    if progress.is_complete {
        return Err(TournamentError::TournamentComplete);
    }
    if !progress.current_round_completed {
        return Err(TournamentError::RoundNotComplete {
            round: progress.current_round,
        });
    }

    let current: Vec<GameMatch> = tournament
        .round_matches(tournament.current_round)
        .into_iter()
        .cloned()
        .collect();
    let next_round_number = tournament.current_round + 1;
    let next = build_next_round(&current, next_round_number, tournament.id)?;
    tournament.insert_matches(next)?;
    tournament.current_round = next_round_number;
    log::info!(
        "Tournament {} advanced to round {} of {}",
        tournament.id,
        next_round_number,
        tournament.total_rounds
    );

    refresh_status(tournament);
    Ok(())
}

/// Record a match result and complete the tournament if that decided the final.
pub fn report_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner_id: PlayerId,
    notes: Option<String>,
) -> Result<(), TournamentError> {
    tournament.report_match_result(match_id, winner_id, notes)?;
    refresh_status(tournament);
    Ok(())
}

/// Progress of a tournament's bracket (None before generation).
pub fn tournament_progress(tournament: &Tournament) -> Option<Progress> {
    compute_progress(&tournament.matches, tournament.total_rounds)
}

/// Mark an active tournament completed once its final round is decided.
/// Returns true if the status changed.
pub fn refresh_status(tournament: &mut Tournament) -> bool {
    if tournament.status != TournamentStatus::Active {
        return false;
    }
    match tournament_progress(tournament) {
        Some(p) if p.is_complete => {
            tournament.status = TournamentStatus::Completed;
            log::info!("Tournament {} completed", tournament.id);
            true
        }
        _ => false,
    }
}
