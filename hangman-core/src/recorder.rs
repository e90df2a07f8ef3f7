use std::sync::Arc;

use async_trait::async_trait;
use hangman_types::{HangmanError, LeaderboardQuery, Score, ScoreSubmission};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{ScoreRepository, ScoreSink};

/// Sends scores straight into a [`ScoreRepository`]
pub struct RepositorySink {
    repository: Arc<dyn ScoreRepository>,
}

impl RepositorySink {
    pub fn new(repository: Arc<dyn ScoreRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ScoreSink for RepositorySink {
    async fn submit(&self, score: &ScoreSubmission) -> Result<(), HangmanError> {
        self.repository.insert(score.clone()).await.map(|_| ())
    }
}

/// Shown when the leaderboard cannot be read, so it is never empty
pub fn placeholder_scores() -> Vec<Score> {
    let now = chrono::Utc::now().to_rfc3339();
    [
        ("Champion", 180, "VICTORY", 65),
        ("WordMaster", 165, "PUZZLE", 78),
        ("QuickGuesser", 152, "HANGMAN", 45),
    ]
    .into_iter()
    .map(|(player, points, word, time_taken)| Score {
        id: Uuid::new_v4(),
        player: player.to_string(),
        word: word.to_string(),
        points,
        time_taken,
        created_at: now.clone(),
    })
    .collect()
}

/// Records won rounds and reads the leaderboard.
///
/// Neither operation fails from the caller's point of view: a lost score is
/// logged and dropped, and an unreadable leaderboard falls back to
/// [`placeholder_scores`].
pub struct ScoreRecorder {
    repository: Arc<dyn ScoreRepository>,
    sink: Arc<dyn ScoreSink>,
}

impl ScoreRecorder {
    /// Record into and read from the same repository
    pub fn new(repository: Arc<dyn ScoreRepository>) -> Self {
        let sink: Arc<dyn ScoreSink> = Arc::new(RepositorySink::new(repository.clone()));
        Self { repository, sink }
    }

    /// Record through `sink` (e.g. a remote endpoint) while reading the
    /// leaderboard from `repository`
    pub fn with_sink(repository: Arc<dyn ScoreRepository>, sink: Arc<dyn ScoreSink>) -> Self {
        Self { repository, sink }
    }

    /// Returns whether the score reached the sink
    pub async fn record(&self, score: ScoreSubmission) -> bool {
        match self.sink.submit(&score).await {
            Ok(()) => {
                info!(
                    "Recorded score {} for {} ({} in {}s)",
                    score.points, score.player, score.word, score.time_taken
                );
                true
            }
            Err(err) => {
                warn!("Dropping score for {}: {}", score.player, err);
                false
            }
        }
    }

    pub async fn leaderboard(&self, query: LeaderboardQuery) -> Vec<Score> {
        match self.repository.top(query).await {
            Ok(scores) => scores,
            Err(err) => {
                warn!("Failed to fetch leaderboard, showing placeholders: {}", err);
                let mut scores = placeholder_scores();
                scores.truncate(query.limit as usize);
                scores
            }
        }
    }
}
