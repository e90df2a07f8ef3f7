use hangman_types::{RoundId, RoundOutcome, ScoreSubmission, SessionId, WordOrigin};

#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    RoundStarted {
        session_id: SessionId,
        round_id: RoundId,
        word_length: u32,
        origin: WordOrigin,
    },
    LetterGuessed {
        session_id: SessionId,
        round_id: RoundId,
        letter: char,
        correct: bool,
    },
    RoundWon {
        session_id: SessionId,
        round_id: RoundId,
        score: ScoreSubmission,
    },
    RoundLost {
        session_id: SessionId,
        round_id: RoundId,
        word: String,
        outcome: RoundOutcome,
    },
}

impl RoundEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            RoundEvent::RoundStarted { session_id, .. } => *session_id,
            RoundEvent::LetterGuessed { session_id, .. } => *session_id,
            RoundEvent::RoundWon { session_id, .. } => *session_id,
            RoundEvent::RoundLost { session_id, .. } => *session_id,
        }
    }

    pub fn round_id(&self) -> RoundId {
        match self {
            RoundEvent::RoundStarted { round_id, .. } => *round_id,
            RoundEvent::LetterGuessed { round_id, .. } => *round_id,
            RoundEvent::RoundWon { round_id, .. } => *round_id,
            RoundEvent::RoundLost { round_id, .. } => *round_id,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RoundEvent::RoundWon { .. } | RoundEvent::RoundLost { .. }
        )
    }
}

/// Event handler trait for reacting to round transitions
pub trait RoundEventHandler: Send + Sync {
    fn handle_event(&mut self, event: &RoundEvent);
}

/// Simple event bus for distributing round events
#[derive(Default)]
pub struct RoundEventBus {
    handlers: Vec<Box<dyn RoundEventHandler>>,
}

impl RoundEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn RoundEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn publish(&mut self, event: RoundEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(&event);
        }
    }
}

impl std::fmt::Debug for RoundEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    struct TestHandler {
        events: Arc<Mutex<Vec<RoundEvent>>>,
    }

    impl RoundEventHandler for TestHandler {
        fn handle_event(&mut self, event: &RoundEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_event_bus_fans_out() {
        let mut bus = RoundEventBus::new();
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        bus.add_handler(Box::new(TestHandler {
            events: first.clone(),
        }));
        bus.add_handler(Box::new(TestHandler {
            events: second.clone(),
        }));
        assert_eq!(bus.handler_count(), 2);

        let session_id = Uuid::new_v4();
        let round_id = Uuid::new_v4();
        bus.publish(RoundEvent::RoundLost {
            session_id,
            round_id,
            word: "DOG".to_string(),
            outcome: RoundOutcome::LostByTimeout,
        });

        for events in [first, second] {
            let events = events.lock().unwrap();
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].session_id(), session_id);
            assert_eq!(events[0].round_id(), round_id);
            assert!(events[0].is_terminal());
        }
    }
}
