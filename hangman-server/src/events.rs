use std::sync::Arc;

use hangman_core::{RoundEvent, RoundEventHandler, ScoreRecorder};
use hangman_types::ScoreSubmission;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Logs every round transition
#[derive(Debug, Default)]
pub struct TracingEventHandler;

impl RoundEventHandler for TracingEventHandler {
    fn handle_event(&mut self, event: &RoundEvent) {
        match event {
            RoundEvent::RoundStarted {
                session_id,
                round_id,
                word_length,
                origin,
            } => info!(
                "Session {} started round {} ({} letters, {:?})",
                session_id, round_id, word_length, origin
            ),
            RoundEvent::LetterGuessed {
                session_id,
                letter,
                correct,
                ..
            } => debug!(
                "Session {} guessed {} ({})",
                session_id,
                letter,
                if *correct { "hit" } else { "miss" }
            ),
            RoundEvent::RoundWon {
                session_id, score, ..
            } => info!(
                "Session {} won {} for {} points",
                session_id, score.word, score.points
            ),
            RoundEvent::RoundLost {
                session_id,
                word,
                outcome,
                ..
            } => info!("Session {} lost {} ({:?})", session_id, word, outcome),
        }
    }
}

/// Hands won-round scores to the background recorder without blocking the round
#[derive(Debug, Clone)]
pub struct ScoreForwarder {
    sender: mpsc::UnboundedSender<ScoreSubmission>,
}

impl ScoreForwarder {
    pub fn new(sender: mpsc::UnboundedSender<ScoreSubmission>) -> Self {
        Self { sender }
    }
}

impl RoundEventHandler for ScoreForwarder {
    fn handle_event(&mut self, event: &RoundEvent) {
        if let RoundEvent::RoundWon { score, .. } = event {
            if self.sender.send(score.clone()).is_err() {
                warn!("Score worker is gone, dropping score for {}", score.player);
            }
        }
    }
}

/// Spawn the task that drains forwarded scores into `recorder`. It exits
/// once every sender has been dropped.
pub fn spawn_score_worker(
    recorder: Arc<ScoreRecorder>,
) -> (mpsc::UnboundedSender<ScoreSubmission>, JoinHandle<()>) {
    let (sender, mut receiver) = mpsc::unbounded_channel::<ScoreSubmission>();

    let handle = tokio::spawn(async move {
        while let Some(score) = receiver.recv().await {
            recorder.record(score).await;
        }
        debug!("Score worker stopped");
    });

    (sender, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangman_core::InMemoryScoreRepository;
    use uuid::Uuid;

    fn won_event(player: &str) -> RoundEvent {
        RoundEvent::RoundWon {
            session_id: Uuid::new_v4(),
            round_id: Uuid::new_v4(),
            score: ScoreSubmission {
                player: player.to_string(),
                word: "CAT".to_string(),
                points: 200,
                time_taken: 0,
            },
        }
    }

    #[tokio::test]
    async fn test_forwarded_scores_are_recorded() {
        let repository = Arc::new(InMemoryScoreRepository::new());
        let recorder = Arc::new(ScoreRecorder::new(repository.clone()));
        let (sender, worker) = spawn_score_worker(recorder);

        let mut forwarder = ScoreForwarder::new(sender);
        forwarder.handle_event(&won_event("Ada"));
        forwarder.handle_event(&RoundEvent::RoundLost {
            session_id: Uuid::new_v4(),
            round_id: Uuid::new_v4(),
            word: "DOG".to_string(),
            outcome: hangman_types::RoundOutcome::LostByGuesses,
        });
        forwarder.handle_event(&won_event("Bob"));
        drop(forwarder);

        worker.await.unwrap();
        let players: Vec<String> = repository.all().await.into_iter().map(|s| s.player).collect();
        assert_eq!(players, vec!["Ada", "Bob"]);
    }

    #[tokio::test]
    async fn test_forwarder_survives_stopped_worker() {
        let (sender, receiver) = mpsc::unbounded_channel();
        drop(receiver);

        let mut forwarder = ScoreForwarder::new(sender);
        forwarder.handle_event(&won_event("Ada"));
    }
}
