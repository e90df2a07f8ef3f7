use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::CustomWordId;

pub const DEFAULT_CUSTOM_CATEGORY: &str = "Custom";

/// A word submitted by a player for others to guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomWord {
    pub id: CustomWordId,
    pub word: String,
    pub creator_name: String,
    pub category: String,
    pub is_used: bool,
    pub created_at: String, // ISO 8601 string
}

/// A validated submission, ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomWord {
    pub word: String,
    pub creator_name: String,
    pub category: String,
}

/// Listing entry for the "play a custom word" picker. The word itself stays hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomWordSummary {
    pub id: CustomWordId,
    pub creator_name: String,
    pub category: String,
    pub word_length: u32,
    pub created_at: String,
}

impl From<&CustomWord> for CustomWordSummary {
    fn from(word: &CustomWord) -> Self {
        CustomWordSummary {
            id: word.id,
            creator_name: word.creator_name.clone(),
            category: word.category.clone(),
            word_length: word.word.chars().count() as u32,
            created_at: word.created_at.clone(),
        }
    }
}
