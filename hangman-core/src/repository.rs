use async_trait::async_trait;
use hangman_types::{
    CustomWord, CustomWordId, HangmanError, LeaderboardQuery, NewCustomWord, Score,
    ScoreSubmission,
};

/// Storage for the `custom_words` collection
#[async_trait]
pub trait CustomWordRepository: Send + Sync {
    async fn insert(&self, word: NewCustomWord) -> Result<CustomWord, HangmanError>;

    /// Words with `is_used = false`, newest first
    async fn list_unused(&self) -> Result<Vec<CustomWord>, HangmanError>;

    /// Flip `is_used` from false to true. Returns the word only if this call
    /// performed the flip; unknown or already used ids give `None`.
    async fn mark_used(&self, id: CustomWordId) -> Result<Option<CustomWord>, HangmanError>;
}

/// Storage for the `scores` collection
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    async fn insert(&self, score: ScoreSubmission) -> Result<Score, HangmanError>;

    async fn top(&self, query: LeaderboardQuery) -> Result<Vec<Score>, HangmanError>;
}

/// Anything that accepts finished scores: the `scores` table or a remote endpoint
#[async_trait]
pub trait ScoreSink: Send + Sync {
    async fn submit(&self, score: &ScoreSubmission) -> Result<(), HangmanError>;
}
