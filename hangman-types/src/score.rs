use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ScoreId;

pub const DEFAULT_LEADERBOARD_LIMIT: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Score {
    pub id: ScoreId,
    pub player: String,
    pub word: String,
    #[serde(rename = "score")]
    pub points: u32,
    pub time_taken: u32,
    pub created_at: String, // ISO 8601 string, assigned by the store
}

/// Result of a won round on its way to a score sink.
///
/// Serializes to the body the score-submission endpoint expects:
/// `{player, word, score, time_taken}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreSubmission {
    pub player: String,
    pub word: String,
    #[serde(rename = "score")]
    pub points: u32,
    pub time_taken: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    #[serde(alias = "score")]
    Points,
    TimeTaken,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LEADERBOARD_LIMIT
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            sort: SortField::Points,
            direction: SortDirection::Desc,
            limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }
}

impl LeaderboardQuery {
    pub fn new(sort: SortField, direction: SortDirection, limit: u64) -> Self {
        Self {
            sort,
            direction,
            limit,
        }
    }
}
