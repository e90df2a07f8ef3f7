use hangman_types::{
    RoundId, RoundOutcome, ScoreSubmission, SessionId, SessionSnapshot, SessionTally, WordOrigin,
};
use tracing::debug;

use crate::{
    GuessOutcome, Round, RoundEvent, RoundEventBus, RoundEventHandler, TargetWord, TickOutcome,
};

pub const ANONYMOUS_PLAYER: &str = "Anonymous";

/// One player's game: the current round, the wins/losses tally and the name
/// scores are recorded under.
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    player_name: Option<String>,
    round: Option<Round>,
    tally: SessionTally,
    event_bus: RoundEventBus,
}

impl GameSession {
    pub fn new(id: SessionId, player_name: Option<String>) -> Self {
        Self {
            id,
            player_name,
            round: None,
            tally: SessionTally::default(),
            event_bus: RoundEventBus::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn RoundEventHandler>) {
        self.event_bus.add_handler(handler);
    }

    /// Replace the current round, finished or not. An abandoned round does
    /// not count towards the tally.
    pub fn start_round(&mut self, word: TargetWord, origin: WordOrigin) -> RoundId {
        self.install_round(Round::start(word, origin))
    }

    pub fn install_round(&mut self, round: Round) -> RoundId {
        if let Some(previous) = &self.round {
            if !previous.is_over() {
                debug!(
                    "Session {} abandoned round {} in progress",
                    self.id,
                    previous.id()
                );
            }
        }

        let round_id = round.id();
        let event = RoundEvent::RoundStarted {
            session_id: self.id,
            round_id,
            word_length: round.target().len() as u32,
            origin: round.origin().clone(),
        };

        self.round = Some(round);
        self.event_bus.publish(event);
        round_id
    }

    /// Guess against the current round. Without a round the guess is ignored.
    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        let Some(round) = self.round.as_mut() else {
            return GuessOutcome::Ignored(crate::IgnoredGuess::RoundOver);
        };

        let outcome = round.guess(letter);
        let round_id = round.id();

        match outcome {
            GuessOutcome::Ignored(_) => {}
            GuessOutcome::Correct { letter } | GuessOutcome::Incorrect { letter, .. } => {
                let correct = matches!(outcome, GuessOutcome::Correct { .. });
                self.event_bus.publish(RoundEvent::LetterGuessed {
                    session_id: self.id,
                    round_id,
                    letter,
                    correct,
                });
            }
            GuessOutcome::Won {
                letter,
                points,
                time_taken,
            } => {
                self.event_bus.publish(RoundEvent::LetterGuessed {
                    session_id: self.id,
                    round_id,
                    letter,
                    correct: true,
                });
                self.tally.wins += 1;

                let score = ScoreSubmission {
                    player: self.player_label().to_string(),
                    word: self.current_word().unwrap_or_default(),
                    points,
                    time_taken,
                };
                self.event_bus.publish(RoundEvent::RoundWon {
                    session_id: self.id,
                    round_id,
                    score,
                });
            }
            GuessOutcome::LostByGuesses { letter } => {
                self.event_bus.publish(RoundEvent::LetterGuessed {
                    session_id: self.id,
                    round_id,
                    letter,
                    correct: false,
                });
                self.record_loss(round_id, RoundOutcome::LostByGuesses);
            }
        }

        outcome
    }

    /// Countdown tick for `round_id`. Ticks meant for a round that has
    /// since been replaced are ignored.
    pub fn tick(&mut self, round_id: RoundId) -> TickOutcome {
        let Some(round) = self.round.as_mut() else {
            return TickOutcome::Ignored;
        };

        if round.id() != round_id {
            debug!(
                "Session {} ignoring stale tick for round {}",
                self.id, round_id
            );
            return TickOutcome::Ignored;
        }

        let outcome = round.tick();
        if outcome == TickOutcome::TimedOut {
            self.record_loss(round_id, RoundOutcome::LostByTimeout);
        }

        outcome
    }

    fn record_loss(&mut self, round_id: RoundId, outcome: RoundOutcome) {
        self.tally.losses += 1;
        let word = self.current_word().unwrap_or_default();
        self.event_bus.publish(RoundEvent::RoundLost {
            session_id: self.id,
            round_id,
            word,
            outcome,
        });
    }

    fn current_word(&self) -> Option<String> {
        self.round.as_ref().map(|r| r.target().to_string())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn is_round_active(&self) -> bool {
        self.round.as_ref().is_some_and(|r| !r.is_over())
    }

    pub fn tally(&self) -> SessionTally {
        self.tally
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_deref()
    }

    /// Name used on the leaderboard
    pub fn player_label(&self) -> &str {
        self.player_name.as_deref().unwrap_or(ANONYMOUS_PLAYER)
    }

    pub fn set_player_name(&mut self, name: String) {
        self.player_name = Some(name);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            player_name: self.player_name.clone(),
            tally: self.tally,
            round: self.round.as_ref().map(Round::snapshot),
        }
    }
}
