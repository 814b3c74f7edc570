//! Tournament record, TournamentStatus and TournamentError.

use crate::models::game::{GameMatch, MatchId, MatchStatus};
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than 2 players: nothing to bracket.
    InvalidRoster { players: usize },
    /// Fewer than 2 recorded winners: no pairing can be formed.
    InsufficientWinners { winners: usize },
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Round 1 already exists for this tournament.
    BracketAlreadyGenerated,
    /// The current round still has matches without a winner.
    RoundNotComplete { round: u32 },
    /// The final round has been decided; there is nothing to advance to.
    TournamentComplete,
    MatchNotFound(MatchId),
    PlayerNotFound(PlayerId),
    /// The reported winner does not play in the match.
    NotAParticipant { match_id: MatchId, player_id: PlayerId },
    /// Byes are decided at creation and cannot be reported.
    ByeMatchLocked(MatchId),
    /// (round_number, match_number) already taken in this tournament.
    DuplicateMatch { round_number: u32, match_number: u32 },
    /// The same name is already on the roster for this team (case-insensitive).
    DuplicatePlayer { name: String, team_name: String },
    /// Player names can't be blank.
    EmptyPlayerName,
    /// Sport is not one of `SPORT_TYPES`.
    UnknownSportType(String),
    /// Roster file could not be read or held no usable rows.
    RosterImport(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidRoster { players } => write!(
                f,
                "At least 2 players are required to create a bracket (have {})",
                players
            ),
            TournamentError::InsufficientWinners { winners } => write!(
                f,
                "Not enough winners to generate next round (have {})",
                winners
            ),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::BracketAlreadyGenerated => {
                write!(f, "Bracket has already been generated")
            }
            TournamentError::RoundNotComplete { round } => {
                write!(f, "Round {} still has matches without a winner", round)
            }
            TournamentError::TournamentComplete => write!(f, "Tournament is already complete"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::NotAParticipant { .. } => {
                write!(f, "Winner must be one of the match's players")
            }
            TournamentError::ByeMatchLocked(_) => write!(f, "A bye match cannot be reported"),
            TournamentError::DuplicateMatch {
                round_number,
                match_number,
            } => write!(
                f,
                "Match {} of round {} already exists",
                match_number, round_number
            ),
            TournamentError::DuplicatePlayer { name, team_name } => write!(
                f,
                "A player named '{}' already exists on team '{}'",
                name, team_name
            ),
            TournamentError::EmptyPlayerName => write!(f, "Player name is required"),
            TournamentError::UnknownSportType(sport) => write!(
                f,
                "Unknown sport type '{}' (expected one of: {})",
                sport,
                SPORT_TYPES.join(", ")
            ),
            TournamentError::RosterImport(msg) => write!(f, "Roster import failed: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Sports a tournament can be created for.
pub const SPORT_TYPES: &[&str] = &[
    "Cricket",
    "Football",
    "Badminton",
    "Table Tennis",
    "Chess",
    "Volleyball",
    "Basketball",
    "Tennis",
];

/// Canonical spelling of a known sport, matched case-insensitively.
pub fn canonical_sport_type(sport_type: &str) -> Result<&'static str, TournamentError> {
    let wanted = sport_type.trim();
    SPORT_TYPES
        .iter()
        .copied()
        .find(|s| s.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| TournamentError::UnknownSportType(wanted.to_string()))
}

/// Overall phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Building the roster; no bracket yet.
    #[default]
    Draft,
    /// Bracket generated, rounds being played.
    Active,
    /// Final round decided.
    Completed,
}

/// Full tournament record: roster, every match of every round, and round counters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub sport_type: String,
    pub description: Option<String>,
    pub status: TournamentStatus,
    /// 0 until the bracket is generated.
    pub current_round: u32,
    /// 0 until the bracket is generated.
    pub total_rounds: u32,
    pub created_at: DateTime<Utc>,
    pub players: Vec<Player>,
    /// All rounds, in insertion order.
    pub matches: Vec<GameMatch>,
}

impl Tournament {
    /// Create a new tournament in Draft status with no players.
    pub fn new(name: impl Into<String>, sport_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            sport_type: sport_type.into(),
            description: None,
            status: TournamentStatus::Draft,
            current_round: 0,
            total_rounds: 0,
            created_at: Utc::now(),
            players: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Create a tournament with an initial roster. Still in Draft until the bracket is generated.
    pub fn with_players(
        name: impl Into<String>,
        sport_type: impl Into<String>,
        players: Vec<Player>,
    ) -> Self {
        Self {
            players,
            ..Self::new(name, sport_type)
        }
    }

    /// Players eligible for bracket generation.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active)
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Add a player (Draft only). Two players may share a name if they play for different teams.
    pub fn add_player(&mut self, player: Player) -> Result<PlayerId, TournamentError> {
        if self.status != TournamentStatus::Draft {
            return Err(TournamentError::InvalidState);
        }
        let name = player.name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        let team_name = player.team_name.trim();
        let key = Player::roster_key(name, team_name);
        if self.players.iter().any(|p| p.key() == key) {
            return Err(TournamentError::DuplicatePlayer {
                name: name.to_string(),
                team_name: team_name.to_string(),
            });
        }
        let player = Player {
            name: name.to_string(),
            team_name: team_name.to_string(),
            ..player
        };
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Deactivate a player by id (Draft only). The player stays on record.
    pub fn deactivate_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Draft {
            return Err(TournamentError::InvalidState);
        }
        self.players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?
            .deactivate();
        Ok(())
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Matches of one round, ordered by match number.
    pub fn round_matches(&self, round_number: u32) -> Vec<&GameMatch> {
        let mut round: Vec<_> = self
            .matches
            .iter()
            .filter(|m| m.round_number == round_number)
            .collect();
        round.sort_by_key(|m| m.match_number);
        round
    }

    /// Persist a batch of new matches, all or nothing.
    ///
    /// Rejects the whole batch if any match belongs to another tournament or reuses a
    /// (round_number, match_number) pair already stored or repeated within the batch.
    pub fn insert_matches(&mut self, batch: Vec<GameMatch>) -> Result<(), TournamentError> {
        let mut taken: HashSet<(u32, u32)> = self
            .matches
            .iter()
            .map(|m| (m.round_number, m.match_number))
            .collect();
        for m in &batch {
            if m.tournament_id != self.id {
                return Err(TournamentError::InvalidState);
            }
            if !taken.insert((m.round_number, m.match_number)) {
                return Err(TournamentError::DuplicateMatch {
                    round_number: m.round_number,
                    match_number: m.match_number,
                });
            }
        }
        self.matches.extend(batch);
        Ok(())
    }

    /// Mark a pending match of the current round as in progress.
    pub fn start_match(&mut self, match_id: MatchId) -> Result<(), TournamentError> {
        let current_round = self.current_round;
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if m.status != MatchStatus::Pending || m.round_number != current_round {
            return Err(TournamentError::InvalidState);
        }
        m.status = MatchStatus::InProgress;
        Ok(())
    }

    /// Record the winner of a match in the current round (re-reporting overwrites).
    pub fn report_match_result(
        &mut self,
        match_id: MatchId,
        winner_id: PlayerId,
        notes: Option<String>,
    ) -> Result<(), TournamentError> {
        if self.status != TournamentStatus::Active {
            return Err(TournamentError::InvalidState);
        }
        let current_round = self.current_round;
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(TournamentError::MatchNotFound(match_id))?;
        if m.is_bye() {
            return Err(TournamentError::ByeMatchLocked(match_id));
        }
        // Earlier rounds already fed the next round's pairings.
        if m.round_number != current_round {
            return Err(TournamentError::InvalidState);
        }
        if !m.involves(winner_id) {
            return Err(TournamentError::NotAParticipant {
                match_id,
                player_id: winner_id,
            });
        }
        m.winner_id = Some(winner_id);
        m.status = MatchStatus::Completed;
        m.notes = notes.filter(|n| !n.trim().is_empty());
        Ok(())
    }

    /// Winner of the final match, once the tournament is completed.
    pub fn champion(&self) -> Option<PlayerId> {
        if self.status != TournamentStatus::Completed {
            return None;
        }
        match self.round_matches(self.total_rounds).as_slice() {
            [last] => last.winner_id,
            _ => None,
        }
    }
}
