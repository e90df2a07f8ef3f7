use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::{Arc, Weak};
use std::time::Duration;

use hangman_core::{
    CustomWordRegistry, GameSession, PlayerNameStore, ScoreRecorder, TargetWord, TickOutcome,
    WordSource, parse_letter, validate_creator_name,
};
use hangman_types::{
    CustomWordSummary, HangmanError, LeaderboardQuery, RoundId, RoundRequest, Score,
    ScoreSubmission, SessionId, SessionSnapshot, SubmitCustomWordRequest, WordOrigin,
};
use tokio::sync::{RwLock, mpsc};
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::countdown::CountdownHandle;
use crate::events::{ScoreForwarder, TracingEventHandler, spawn_score_worker};

pub const MAX_LEADERBOARD_LIMIT: u64 = 100;

#[derive(Debug)]
struct ActiveSession {
    session: GameSession,
    countdown: Option<CountdownHandle>,
    last_activity: Instant,
}

impl ActiveSession {
    fn new(session: GameSession) -> Self {
        Self {
            session,
            countdown: None,
            last_activity: Instant::now(),
        }
    }

    fn update_activity(&mut self) {
        self.last_activity = Instant::now();
    }

    fn is_expired(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }

    fn stop_countdown(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.cancel();
        }
    }
}

/// Owns every live game session along with the collaborators rounds need:
/// the word source, the custom word registry, the score recorder and the
/// player name store.
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, ActiveSession>>,
    word_source: WordSource,
    registry: Arc<CustomWordRegistry>,
    recorder: Arc<ScoreRecorder>,
    player_store: Arc<dyn PlayerNameStore>,
    score_sender: mpsc::UnboundedSender<ScoreSubmission>,
    tick_interval: Duration,
}

impl SessionManager {
    /// Must be called inside a tokio runtime; spawns the score worker.
    pub fn new(
        word_source: WordSource,
        registry: Arc<CustomWordRegistry>,
        recorder: Arc<ScoreRecorder>,
        player_store: Arc<dyn PlayerNameStore>,
        tick_interval: Duration,
    ) -> Arc<Self> {
        let (score_sender, _worker) = spawn_score_worker(recorder.clone());

        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            word_source,
            registry,
            recorder,
            player_store,
            score_sender,
            tick_interval,
        })
    }

    pub async fn create_session(&self) -> SessionSnapshot {
        let player_name = match self.player_store.load().await {
            Ok(name) => name,
            Err(err) => {
                warn!("Failed to load stored player name: {}", err);
                None
            }
        };

        let session_id = Uuid::new_v4();
        let mut session = GameSession::new(session_id, player_name);
        session.add_handler(Box::new(TracingEventHandler));
        session.add_handler(Box::new(ScoreForwarder::new(self.score_sender.clone())));

        let snapshot = session.snapshot();
        self.sessions
            .write()
            .await
            .insert(session_id, ActiveSession::new(session));

        info!("Created session {}", session_id);
        snapshot
    }

    pub async fn snapshot(&self, session_id: SessionId) -> Result<SessionSnapshot, HangmanError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&session_id)
            .map(|active| active.session.snapshot())
            .ok_or_else(|| session_not_found(session_id))
    }

    /// Resolve the requested word, replace the session's round with a fresh
    /// one and restart its countdown. Any countdown of the previous round is
    /// cancelled first.
    pub async fn start_round(
        self: &Arc<Self>,
        session_id: SessionId,
        request: RoundRequest,
    ) -> Result<SessionSnapshot, HangmanError> {
        // Do not burn a custom word on a session that does not exist
        if !self.sessions.read().await.contains_key(&session_id) {
            return Err(session_not_found(session_id));
        }

        let (word, origin) = self.resolve_word(request).await?;

        let mut sessions = self.sessions.write().await;
        let active = sessions.get_mut(&session_id).ok_or_else(|| {
            warn!("Session {} ended while its word was being claimed", session_id);
            session_not_found(session_id)
        })?;

        active.update_activity();
        active.stop_countdown();

        let round_id = active.session.start_round(word, origin);
        active.countdown = Some(self.spawn_countdown(session_id, round_id));

        Ok(active.session.snapshot())
    }

    async fn resolve_word(
        &self,
        request: RoundRequest,
    ) -> Result<(TargetWord, WordOrigin), HangmanError> {
        match request {
            RoundRequest::Random { category } => {
                let picked = self.word_source.pick_random_word(category.as_deref());
                Ok((
                    picked.word,
                    WordOrigin::Builtin {
                        category: picked.category,
                    },
                ))
            }
            RoundRequest::Custom { id } => {
                let claimed = self.registry.claim(id).await?;
                Ok((
                    claimed.word,
                    WordOrigin::Custom {
                        id: claimed.id,
                        creator_name: claimed.creator_name,
                        category: claimed.category,
                    },
                ))
            }
            RoundRequest::Word { word } => Ok((TargetWord::parse(&word)?, WordOrigin::Supplied)),
        }
    }

    fn spawn_countdown(self: &Arc<Self>, session_id: SessionId, round_id: RoundId) -> CountdownHandle {
        let manager: Weak<Self> = Arc::downgrade(self);

        CountdownHandle::spawn(self.tick_interval, move || {
            let manager = manager.clone();
            async move {
                match manager.upgrade() {
                    Some(manager) => manager.tick(session_id, round_id).await,
                    None => ControlFlow::Break(()),
                }
            }
        })
    }

    async fn tick(&self, session_id: SessionId, round_id: RoundId) -> ControlFlow<()> {
        let mut sessions = self.sessions.write().await;
        let Some(active) = sessions.get_mut(&session_id) else {
            return ControlFlow::Break(());
        };

        match active.session.tick(round_id) {
            TickOutcome::Ticked { .. } => ControlFlow::Continue(()),
            TickOutcome::TimedOut => {
                info!("Session {} ran out of time on round {}", session_id, round_id);
                ControlFlow::Break(())
            }
            TickOutcome::Ignored => ControlFlow::Break(()),
        }
    }

    pub async fn guess(
        &self,
        session_id: SessionId,
        letter: &str,
    ) -> Result<SessionSnapshot, HangmanError> {
        let letter = parse_letter(letter)
            .ok_or_else(|| HangmanError::validation("Guesses must be a single letter A-Z"))?;

        let mut sessions = self.sessions.write().await;
        let active = sessions
            .get_mut(&session_id)
            .ok_or_else(|| session_not_found(session_id))?;

        active.update_activity();
        if active.session.guess(letter).is_terminal() {
            active.stop_countdown();
        }

        Ok(active.session.snapshot())
    }

    /// Set the name scores are recorded under and remember it for the next
    /// session. A failed save is logged; the session keeps the name either way.
    pub async fn set_player_name(
        &self,
        session_id: SessionId,
        name: &str,
    ) -> Result<SessionSnapshot, HangmanError> {
        let name = validate_creator_name(name)?;

        let snapshot = {
            let mut sessions = self.sessions.write().await;
            let active = sessions
                .get_mut(&session_id)
                .ok_or_else(|| session_not_found(session_id))?;

            active.update_activity();
            active.session.set_player_name(name.clone());
            active.session.snapshot()
        };

        if let Err(err) = self.player_store.save(&name).await {
            warn!("Failed to persist player name: {}", err);
        }

        Ok(snapshot)
    }

    pub async fn remove_session(&self, session_id: SessionId) -> Result<(), HangmanError> {
        let removed = self.sessions.write().await.remove(&session_id);

        match removed {
            Some(mut active) => {
                active.stop_countdown();
                info!("Removed session {}", session_id);
                Ok(())
            }
            None => Err(session_not_found(session_id)),
        }
    }

    /// Drop sessions with no player activity for longer than `timeout`.
    /// Returns how many were removed.
    pub async fn cleanup_idle_sessions(&self, timeout: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|session_id, active| {
            if active.is_expired(timeout) {
                active.stop_countdown();
                info!("Removed idle session {}", session_id);
                false
            } else {
                true
            }
        });

        before - sessions.len()
    }

    pub async fn active_session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn list_custom_words(&self) -> Result<Vec<CustomWordSummary>, HangmanError> {
        let words = self.registry.list_available().await?;
        Ok(words.iter().map(CustomWordSummary::from).collect())
    }

    pub async fn submit_custom_word(
        &self,
        request: SubmitCustomWordRequest,
    ) -> Result<CustomWordSummary, HangmanError> {
        let created = self
            .registry
            .submit(
                &request.word,
                &request.creator_name,
                request.category.as_deref(),
            )
            .await?;

        Ok(CustomWordSummary::from(&created))
    }

    pub async fn leaderboard(&self, mut query: LeaderboardQuery) -> Vec<Score> {
        query.limit = query.limit.clamp(1, MAX_LEADERBOARD_LIMIT);
        self.recorder.leaderboard(query).await
    }

    pub fn categories(&self) -> Vec<String> {
        self.word_source.categories()
    }
}

fn session_not_found(session_id: SessionId) -> HangmanError {
    HangmanError::not_found(format!("Session {}", session_id))
}
