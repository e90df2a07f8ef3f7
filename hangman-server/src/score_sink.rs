use async_trait::async_trait;
use hangman_core::ScoreSink;
use hangman_types::{HangmanError, ScoreSubmission};
use reqwest::Client;

/// POSTs `{player, word, score, time_taken}` to a remote score service
#[derive(Debug, Clone)]
pub struct HttpScoreSink {
    client: Client,
    endpoint: String,
}

impl HttpScoreSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScoreSink for HttpScoreSink {
    async fn submit(&self, score: &ScoreSubmission) -> Result<(), HangmanError> {
        self.client
            .post(&self.endpoint)
            .json(score)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| HangmanError::persistence(format!("Score endpoint: {}", err)))?;

        Ok(())
    }
}
