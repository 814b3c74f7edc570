//! First round: random seeding into a power-of-two bracket, byes resolved at creation.

use crate::models::{GameMatch, Player, PlayerId, TournamentError, TournamentId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Source of the seeding order for round 1.
///
/// Production code shuffles with `RngShuffler`; tests can supply a fixed order.
pub trait Shuffler {
    fn shuffle(&mut self, ids: &mut [PlayerId]);
}

/// Uniform Fisher-Yates shuffle backed by any `rand` RNG.
pub struct RngShuffler<R: Rng>(pub R);

impl RngShuffler<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Self(rand::thread_rng())
    }
}

impl<R: Rng> Shuffler for RngShuffler<R> {
    fn shuffle(&mut self, ids: &mut [PlayerId]) {
        ids.shuffle(&mut self.0);
    }
}

/// Round 1 of a bracket plus the sizes it was derived from.
#[derive(Clone, Debug)]
pub struct InitialRound {
    pub matches: Vec<GameMatch>,
    /// Rounds needed to reach a single winner.
    pub total_rounds: u32,
    /// Least power of two holding the whole roster.
    pub bracket_size: usize,
    pub bye_count: usize,
}

/// Generate round 1 for `players`.
///
/// 1. Shuffle the roster ids.
/// 2. Size the bracket to the next power of two; the gap is the bye count.
/// 3. Pair slots in order. The last `bye_count` pairs get an empty second slot, so each
///    bye still has one player and advances that player as winner.
pub fn build_initial_round<S: Shuffler + ?Sized>(
    players: &[Player],
    tournament_id: TournamentId,
    shuffler: &mut S,
) -> Result<InitialRound, TournamentError> {
    if players.len() < 2 {
        return Err(TournamentError::InvalidRoster {
            players: players.len(),
        });
    }

    let mut seeded: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
    shuffler.shuffle(&mut seeded);

    let bracket_size = seeded.len().next_power_of_two();
    let total_rounds = bracket_size.trailing_zeros();
    let bye_count = bracket_size - seeded.len();
    log::debug!(
        "Bracket generation: players={} bracket_size={} total_rounds={} byes={}",
        seeded.len(),
        bracket_size,
        total_rounds,
        bye_count
    );

    // Players before `split` meet head to head; everyone after it sits alone in a bye slot.
    let split = seeded.len() - bye_count;
    let (paired, byes) = seeded.split_at(split);

    let mut matches = Vec::with_capacity(bracket_size / 2);
    let mut match_number = 1;
    for pair in paired.chunks_exact(2) {
        matches.push(GameMatch::new(
            tournament_id,
            1,
            match_number,
            pair[0],
            pair[1],
        ));
        match_number += 1;
    }
    for &player_id in byes {
        matches.push(GameMatch::bye(tournament_id, 1, match_number, player_id));
        match_number += 1;
    }

    Ok(InitialRound {
        matches,
        total_rounds,
        bracket_size,
        bye_count,
    })
}
