//! Tournament business logic: bracket generation, round advancement, progress, roster import.

mod advance;
mod bracket;
mod lifecycle;
mod progress;
mod roster;

pub use advance::build_next_round;
pub use bracket::{build_initial_round, InitialRound, RngShuffler, Shuffler};
pub use lifecycle::{
    advance_round, generate_bracket, refresh_status, report_result, tournament_progress,
};
pub use progress::{compute_progress, matches_by_round, round_name, Progress};
pub use roster::{import_roster, parse_roster_csv, validate_roster, RosterEntry, RosterValidation};
