use std::sync::Arc;

use hangman_types::{CustomWord, CustomWordId, HangmanError, NewCustomWord};
use tracing::{info, warn};

use crate::{CustomWordRepository, TargetWord, normalize_category, validate_creator_name};

/// A custom word that was just claimed and can be played immediately
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedWord {
    pub id: CustomWordId,
    pub word: TargetWord,
    pub creator_name: String,
    pub category: String,
}

/// Submission and one-time claiming of player-made words
pub struct CustomWordRegistry {
    repository: Arc<dyn CustomWordRepository>,
}

impl CustomWordRegistry {
    pub fn new(repository: Arc<dyn CustomWordRepository>) -> Self {
        Self { repository }
    }

    pub async fn submit(
        &self,
        word: &str,
        creator_name: &str,
        category: Option<&str>,
    ) -> Result<CustomWord, HangmanError> {
        let creator_name = validate_creator_name(creator_name)?;
        let word = TargetWord::parse(word)?;
        let category = normalize_category(category);

        let created = self
            .repository
            .insert(NewCustomWord {
                word: word.into_string(),
                creator_name,
                category,
            })
            .await?;

        info!(
            "Custom word {} submitted by {} in {}",
            created.id, created.creator_name, created.category
        );
        Ok(created)
    }

    pub async fn list_available(&self) -> Result<Vec<CustomWord>, HangmanError> {
        self.repository.list_unused().await.map_err(|err| {
            warn!("Failed to fetch custom words: {}", err);
            err
        })
    }

    /// Mark `id` used and hand back its word. Of two concurrent claims on the
    /// same id at most one gets the word; the other sees `NotFound`.
    pub async fn claim(&self, id: CustomWordId) -> Result<ClaimedWord, HangmanError> {
        let claimed = self
            .repository
            .mark_used(id)
            .await?
            .ok_or_else(|| HangmanError::not_found(format!("Custom word {}", id)))?;

        // Stored words were validated on submission, but the table may have been
        // written by something else
        let word = TargetWord::parse(&claimed.word).map_err(|err| {
            warn!("Custom word {} is not playable: {}", id, err);
            HangmanError::not_found(format!("Playable custom word {}", id))
        })?;

        info!("Custom word {} claimed", id);
        Ok(ClaimedWord {
            id: claimed.id,
            word,
            creator_name: claimed.creator_name,
            category: claimed.category,
        })
    }
}
