use async_trait::async_trait;
use hangman_types::HangmanError;
use tokio::sync::RwLock;

/// The locally persisted player name, read at startup to pre-fill sessions
#[async_trait]
pub trait PlayerNameStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>, HangmanError>;

    async fn save(&self, name: &str) -> Result<(), HangmanError>;
}

#[derive(Debug, Default)]
pub struct InMemoryPlayerNameStore {
    name: RwLock<Option<String>>,
}

impl InMemoryPlayerNameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: RwLock::new(Some(name.into())),
        }
    }
}

#[async_trait]
impl PlayerNameStore for InMemoryPlayerNameStore {
    async fn load(&self) -> Result<Option<String>, HangmanError> {
        Ok(self.name.read().await.clone())
    }

    async fn save(&self, name: &str) -> Result<(), HangmanError> {
        *self.name.write().await = Some(name.to_string());
        Ok(())
    }
}
