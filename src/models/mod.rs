//! Data structures for the bracket tournament: players, matches, tournament record.

mod game;
mod player;
mod tournament;

pub use game::{GameMatch, MatchId, MatchStatus};
pub use player::{Player, PlayerId};
pub use tournament::{
    canonical_sport_type, Tournament, TournamentError, TournamentId, TournamentStatus, SPORT_TYPES,
};
