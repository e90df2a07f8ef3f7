use async_trait::async_trait;
use hangman_types::{
    CustomWord, CustomWordId, HangmanError, LeaderboardQuery, NewCustomWord, Score,
    ScoreSubmission, SortDirection, SortField,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{CustomWordRepository, ScoreRepository};

/// Custom words held in process memory, kept in insertion order
#[derive(Debug, Default)]
pub struct InMemoryCustomWordRepository {
    words: RwLock<Vec<CustomWord>>,
}

impl InMemoryCustomWordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.words.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.words.read().await.is_empty()
    }

    pub async fn find_by_id(&self, id: CustomWordId) -> Option<CustomWord> {
        self.words.read().await.iter().find(|w| w.id == id).cloned()
    }
}

#[async_trait]
impl CustomWordRepository for InMemoryCustomWordRepository {
    async fn insert(&self, word: NewCustomWord) -> Result<CustomWord, HangmanError> {
        let custom_word = CustomWord {
            id: Uuid::new_v4(),
            word: word.word,
            creator_name: word.creator_name,
            category: word.category,
            is_used: false,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.words.write().await.push(custom_word.clone());
        Ok(custom_word)
    }

    async fn list_unused(&self) -> Result<Vec<CustomWord>, HangmanError> {
        let words = self.words.read().await;
        Ok(words.iter().rev().filter(|w| !w.is_used).cloned().collect())
    }

    async fn mark_used(&self, id: CustomWordId) -> Result<Option<CustomWord>, HangmanError> {
        let mut words = self.words.write().await;
        match words.iter_mut().find(|w| w.id == id) {
            Some(word) if !word.is_used => {
                word.is_used = true;
                Ok(Some(word.clone()))
            }
            _ => Ok(None),
        }
    }
}

/// Scores held in process memory
#[derive(Debug, Default)]
pub struct InMemoryScoreRepository {
    scores: RwLock<Vec<Score>>,
}

impl InMemoryScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Score> {
        self.scores.read().await.clone()
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn insert(&self, score: ScoreSubmission) -> Result<Score, HangmanError> {
        let score = Score {
            id: Uuid::new_v4(),
            player: score.player,
            word: score.word,
            points: score.points,
            time_taken: score.time_taken,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.scores.write().await.push(score.clone());
        Ok(score)
    }

    async fn top(&self, query: LeaderboardQuery) -> Result<Vec<Score>, HangmanError> {
        let mut scores = self.scores.read().await.clone();

        let key = |s: &Score| match query.sort {
            SortField::Points => s.points,
            SortField::TimeTaken => s.time_taken,
        };

        // Ties go oldest first in either direction, like the database store
        scores.sort_by(|a, b| {
            let ordering = match query.direction {
                SortDirection::Asc => key(a).cmp(&key(b)),
                SortDirection::Desc => key(b).cmp(&key(a)),
            };
            ordering.then_with(|| a.created_at.cmp(&b.created_at))
        });

        scores.truncate(query.limit as usize);
        Ok(scores)
    }
}
