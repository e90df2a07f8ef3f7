use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{CustomWordId, RoundId, SessionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    InProgress,
    Won,
    LostByGuesses,
    LostByTimeout,
}

impl RoundOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RoundOutcome::InProgress)
    }

    pub fn is_loss(self) -> bool {
        matches!(self, RoundOutcome::LostByGuesses | RoundOutcome::LostByTimeout)
    }
}

/// Where the target word of a round came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WordOrigin {
    Builtin {
        category: String,
    },
    Custom {
        id: CustomWordId,
        creator_name: String,
        category: String,
    },
    Supplied,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundSnapshot {
    pub id: RoundId,
    /// Target with unrevealed letters shown as `_`
    pub masked_word: String,
    /// Only present once the round is over
    pub word: Option<String>,
    pub word_length: u32,
    pub guessed_letters: Vec<char>,
    pub correct_letters: Vec<char>,
    pub incorrect_letters: Vec<char>,
    pub wrong_guesses: u32,
    pub max_wrong_guesses: u32,
    pub time_remaining: u32,
    pub time_budget: u32,
    pub outcome: RoundOutcome,
    pub points: Option<u32>,
    pub origin: WordOrigin,
}

/// Wins and losses for one session, never persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionTally {
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub player_name: Option<String>,
    pub tally: SessionTally,
    /// `None` until the first round starts
    pub round: Option<RoundSnapshot>,
}
