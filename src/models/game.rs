//! Match (game) and MatchStatus for single-elimination rounds.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Lifecycle of a match. `Bye` is assigned at creation and never changes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Bye,
}

/// A single bracket match: one or two players, identified by round and slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// 1-based round this match belongs to.
    pub round_number: u32,
    /// 1-based slot within the round.
    pub match_number: u32,
    pub player1_id: PlayerId,
    /// None only for a bye.
    pub player2_id: Option<PlayerId>,
    /// None until reported (set at creation for byes).
    pub winner_id: Option<PlayerId>,
    pub status: MatchStatus,
    pub notes: Option<String>,
}

impl GameMatch {
    /// A pending head-to-head match with no winner yet.
    pub fn new(
        tournament_id: TournamentId,
        round_number: u32,
        match_number: u32,
        player1_id: PlayerId,
        player2_id: PlayerId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round_number,
            match_number,
            player1_id,
            player2_id: Some(player2_id),
            winner_id: None,
            status: MatchStatus::Pending,
            notes: None,
        }
    }

    /// A bye: the sole participant advances immediately.
    pub fn bye(
        tournament_id: TournamentId,
        round_number: u32,
        match_number: u32,
        player_id: PlayerId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round_number,
            match_number,
            player1_id: player_id,
            player2_id: None,
            winner_id: Some(player_id),
            status: MatchStatus::Bye,
            notes: None,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.status == MatchStatus::Bye
    }

    /// Completed or bye.
    pub fn is_decided(&self) -> bool {
        matches!(self.status, MatchStatus::Completed | MatchStatus::Bye)
    }

    /// Whether `player_id` plays in this match.
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.player1_id == player_id || self.player2_id == Some(player_id)
    }
}
