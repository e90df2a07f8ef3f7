#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use hangman_core::{
    CustomWordRegistry, GameSession, InMemoryCustomWordRepository, InMemoryScoreRepository,
    RoundEvent, RoundEventHandler, ScoreRecorder, TargetWord,
};
use hangman_types::{ScoreSubmission, WordOrigin};
use uuid::Uuid;

/// Event collector for testing event emissions
#[derive(Clone, Default)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<RoundEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<RoundEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn won_scores(&self) -> Vec<ScoreSubmission> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                RoundEvent::RoundWon { score, .. } => Some(score.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&RoundEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl RoundEventHandler for EventCollector {
    fn handle_event(&mut self, event: &RoundEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn word(raw: &str) -> TargetWord {
    TargetWord::parse(raw).unwrap()
}

/// Creates a session with a collector attached
pub fn create_test_session(player: Option<&str>) -> (GameSession, EventCollector) {
    let collector = EventCollector::new();
    let mut session = GameSession::new(Uuid::new_v4(), player.map(str::to_string));
    session.add_handler(Box::new(collector.clone()));
    (session, collector)
}

/// Starts a round with a caller-supplied word
pub fn start_supplied_round(session: &mut GameSession, raw: &str) -> Uuid {
    session.start_round(word(raw), WordOrigin::Supplied)
}

pub fn guess_all(session: &mut GameSession, letters: &str) {
    for letter in letters.chars() {
        session.guess(letter);
    }
}

pub struct TestBackend {
    pub words: Arc<InMemoryCustomWordRepository>,
    pub scores: Arc<InMemoryScoreRepository>,
    pub registry: CustomWordRegistry,
    pub recorder: ScoreRecorder,
}

/// Registry and recorder backed by in-memory repositories
pub fn create_test_backend() -> TestBackend {
    let words = Arc::new(InMemoryCustomWordRepository::new());
    let scores = Arc::new(InMemoryScoreRepository::new());

    TestBackend {
        registry: CustomWordRegistry::new(words.clone()),
        recorder: ScoreRecorder::new(scores.clone()),
        words,
        scores,
    }
}
