//! Completion tracking and round labels, read-only over the match set.

use crate::models::GameMatch;
use serde::Serialize;
use std::collections::BTreeMap;

/// Snapshot of how far a bracket has been played.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Progress {
    /// Completed plus bye matches.
    pub completed_matches: usize,
    pub total_matches: usize,
    /// 0.0..=100.0, unrounded.
    pub percentage: f64,
    /// Highest round number present.
    pub current_round: u32,
    pub total_rounds: u32,
    /// Every match of `current_round` has a winner.
    pub current_round_completed: bool,
    pub is_complete: bool,
}

impl Progress {
    /// Whether the next round may be generated.
    pub fn can_advance(&self) -> bool {
        self.current_round_completed && !self.is_complete
    }
}

/// Derive progress from all matches of a tournament. `None` before the bracket exists.
///
/// The current round is taken to be the highest round present, which assumes rounds are
/// created one after another without gaps.
pub fn compute_progress(matches: &[GameMatch], total_rounds: u32) -> Option<Progress> {
    let current_round = matches.iter().map(|m| m.round_number).max()?;
    let completed_matches = matches.iter().filter(|m| m.is_decided()).count();
    let total_matches = matches.len();
    let current_round_completed = matches
        .iter()
        .filter(|m| m.round_number == current_round)
        .all(|m| m.winner_id.is_some());

    Some(Progress {
        completed_matches,
        total_matches,
        percentage: completed_matches as f64 / total_matches as f64 * 100.0,
        current_round,
        total_rounds,
        current_round_completed,
        is_complete: current_round == total_rounds && current_round_completed,
    })
}

/// Display name of a round from how many player slots it has.
///
/// Slot counts that aren't a power of two (a round carrying a bye) are named after the next
/// power of two up, so 6 slots is a quarter-final.
pub fn round_name(players_in_round: usize) -> String {
    match players_in_round.next_power_of_two() {
        2 => "Final".to_string(),
        4 => "Semi-Final".to_string(),
        8 => "Quarter-Final".to_string(),
        16 => "Round of 16".to_string(),
        32 => "Round of 32".to_string(),
        n => format!("Round {}", n.trailing_zeros()),
    }
}

/// Matches grouped by round (ascending), each round sorted by match number.
pub fn matches_by_round(matches: &[GameMatch]) -> BTreeMap<u32, Vec<&GameMatch>> {
    let mut rounds: BTreeMap<u32, Vec<&GameMatch>> = BTreeMap::new();
    for m in matches {
        rounds.entry(m.round_number).or_default().push(m);
    }
    for round in rounds.values_mut() {
        round.sort_by_key(|m| m.match_number);
    }
    rounds
}
