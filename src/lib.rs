//! Single-elimination tournament manager: library with models and bracket logic.

pub mod logic;
pub mod models;

pub use logic::{
    advance_round, build_initial_round, build_next_round, compute_progress, generate_bracket,
    import_roster, matches_by_round, parse_roster_csv, refresh_status, report_result, round_name,
    tournament_progress, validate_roster, InitialRound, Progress, RngShuffler, RosterEntry,
    RosterValidation, Shuffler,
};
pub use models::{
    canonical_sport_type, GameMatch, MatchId, MatchStatus, Player, PlayerId, Tournament,
    TournamentError, TournamentId, TournamentStatus, SPORT_TYPES,
};
