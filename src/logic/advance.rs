//! Later rounds: pair the previous round's winners in slot order.

use crate::models::{GameMatch, PlayerId, TournamentError, TournamentId};

/// Generate round `next_round_number` from the matches of the round before it.
///
/// Winners are taken in match-number order and paired (1st v 2nd, 3rd v 4th, ...); no
/// reshuffle. An odd winner out gets a bye. Matches without a winner contribute nothing.
pub fn build_next_round(
    previous_round: &[GameMatch],
    next_round_number: u32,
    tournament_id: TournamentId,
) -> Result<Vec<GameMatch>, TournamentError> {
    let mut ordered: Vec<&GameMatch> = previous_round.iter().collect();
    ordered.sort_by_key(|m| m.match_number);

    let winners: Vec<PlayerId> = ordered.iter().filter_map(|m| m.winner_id).collect();
    if winners.len() < 2 {
        return Err(TournamentError::InsufficientWinners {
            winners: winners.len(),
        });
    }

    let matches = winners
        .chunks(2)
        .zip(1..)
        .map(|(pair, match_number)| match *pair {
            [player1, player2] => {
                GameMatch::new(tournament_id, next_round_number, match_number, player1, player2)
            }
            [player] => GameMatch::bye(tournament_id, next_round_number, match_number, player),
            _ => unreachable!("chunks(2) yields one or two winners"),
        })
        .collect::<Vec<_>>();

    log::debug!(
        "Round {} generated: {} winners -> {} matches",
        next_round_number,
        winners.len(),
        matches.len()
    );
    Ok(matches)
}
