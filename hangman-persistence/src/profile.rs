use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hangman_core::PlayerNameStore;
use hangman_types::HangmanError;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_PROFILE_PATH: &str = "player_profile.json";

#[derive(Debug, Serialize, Deserialize)]
struct PlayerProfile {
    player_name: String,
}

/// Keeps the player name in a small JSON file between runs
#[derive(Debug, Clone)]
pub struct FilePlayerNameStore {
    path: PathBuf,
}

impl FilePlayerNameStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PlayerNameStore for FilePlayerNameStore {
    async fn load(&self) -> Result<Option<String>, HangmanError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(HangmanError::persistence(err.to_string())),
        };

        match serde_json::from_str::<PlayerProfile>(&contents) {
            Ok(profile) if !profile.player_name.trim().is_empty() => Ok(Some(profile.player_name)),
            Ok(_) => Ok(None),
            Err(err) => {
                warn!("Ignoring unreadable profile {}: {}", self.path.display(), err);
                Ok(None)
            }
        }
    }

    async fn save(&self, name: &str) -> Result<(), HangmanError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| HangmanError::persistence(err.to_string()))?;
        }

        let profile = PlayerProfile {
            player_name: name.to_string(),
        };
        let contents = serde_json::to_string_pretty(&profile)
            .map_err(|err| HangmanError::persistence(err.to_string()))?;

        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|err| HangmanError::persistence(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_profile_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("hangman-profile-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[tokio::test]
    async fn test_missing_file_loads_nothing() {
        let store = FilePlayerNameStore::new(temp_profile_path("profile.json"));
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let path = temp_profile_path("profile.json");
        let store = FilePlayerNameStore::new(&path);

        store.save("Ada").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("Ada"));

        store.save("Grace").await.unwrap();
        let reopened = FilePlayerNameStore::new(&path);
        assert_eq!(reopened.load().await.unwrap().as_deref(), Some("Grace"));

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains("\"player_name\""));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_ignored() {
        let path = temp_profile_path("profile.json");
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = FilePlayerNameStore::new(&path);
        assert_eq!(store.load().await.unwrap(), None);
    }
}
