//! Game session: the facade the presentation layer drives.
//!
//! Wraps the round engine behind a single-writer lock so UI callbacks are
//! serialized, and publishes a `RoundState` snapshot after every successful
//! mutation. Readers either subscribe to the snapshot channel or poll.

mod reveal;
mod vote;

use crate::content::ContentCatalog;
use crate::engine::RoundEngine;
use crate::error::{GameError, GameResult};
use crate::round::RoundState;
use crate::settings::GameSettings;
use crate::types::*;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared session state
#[derive(Clone)]
pub struct GameSession {
    pub engine: Arc<RwLock<RoundEngine>>,
    /// Broadcast channel carrying a snapshot after each mutation
    pub snapshots: broadcast::Sender<RoundState>,
}

impl GameSession {
    pub fn new(catalog: ContentCatalog) -> Self {
        Self::from_engine(RoundEngine::new(Arc::new(catalog)))
    }

    /// Session whose every random draw is reproducible from `seed`
    pub fn with_seed(catalog: ContentCatalog, seed: u64) -> Self {
        Self::from_engine(RoundEngine::with_seed(Arc::new(catalog), seed))
    }

    pub fn from_engine(engine: RoundEngine) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            engine: Arc::new(RwLock::new(engine)),
            snapshots: tx,
        }
    }

    /// Receive a snapshot after every successful mutation
    pub fn subscribe(&self) -> broadcast::Receiver<RoundState> {
        self.snapshots.subscribe()
    }

    /// Run `op` under the write lock and publish the resulting state if it succeeds
    async fn mutate<T>(
        &self,
        op: impl FnOnce(&mut RoundEngine) -> GameResult<T>,
    ) -> GameResult<T> {
        let mut engine = self.engine.write().await;
        let value = op(&mut *engine)?;

        // Ignore send errors (no subscribers is fine)
        let _ = self.snapshots.send(engine.state().clone());
        tracing::debug!("Published snapshot in phase {:?}", engine.state().phase);
        Ok(value)
    }

    async fn read<T>(&self, op: impl FnOnce(&RoundState) -> T) -> T {
        let engine = self.engine.read().await;
        op(engine.state())
    }

    /// Poll the current state
    pub async fn snapshot(&self) -> RoundState {
        self.read(RoundState::clone).await
    }

    pub async fn phase(&self) -> GamePhase {
        self.read(|s| s.phase).await
    }

    pub async fn settings(&self) -> GameSettings {
        self.read(|s| s.settings.clone()).await
    }

    pub async fn players(&self) -> Vec<Player> {
        self.read(|s| s.players.clone()).await
    }

    /// Category names offered on the settings screen
    pub async fn category_names(&self) -> Vec<CategoryName> {
        self.engine.read().await.catalog().category_names()
    }

    pub async fn start_new_round(
        &self,
        settings: GameSettings,
        players: Vec<Player>,
    ) -> GameResult<RoundState> {
        self.mutate(|engine| engine.start_new_round(settings, players).cloned())
            .await
    }

    /// Start a round for a table the saved settings may not fit.
    ///
    /// The player count follows the roster and the fixed liar count is pulled
    /// under its cap. If the round is still refused for its settings or its
    /// content, it is retried once with default settings.
    pub async fn start_round_with_fallback(
        &self,
        settings: GameSettings,
        players: Vec<Player>,
    ) -> GameResult<RoundState> {
        let mut settings = GameSettings {
            player_count: players.len(),
            ..settings
        };
        settings.adjust_liar_count();

        match self.start_new_round(settings, players.clone()).await {
            Err(e @ (GameError::InvalidSettings(_) | GameError::ContentUnavailable { .. })) => {
                tracing::warn!("Round refused: {}. Retrying with default settings.", e);
                let defaults = GameSettings {
                    player_count: players.len(),
                    ..GameSettings::default()
                };
                self.start_new_round(defaults, players).await
            }
            result => result,
        }
    }

    pub async fn play_again(&self) -> GameResult<RoundState> {
        self.mutate(|engine| engine.play_again().cloned()).await
    }

    pub async fn transition_phase(&self, to: GamePhase) -> GameResult<()> {
        self.mutate(|engine| engine.transition_phase(to)).await
    }

    pub async fn starting_player(&self) -> Option<Player> {
        self.read(|s| s.starting_player().cloned()).await
    }

    pub async fn category_name(&self) -> String {
        self.read(|s| s.category_name().to_string()).await
    }

    pub async fn secret_word(&self) -> String {
        self.read(|s| s.secret_word().to_string()).await
    }

    pub async fn main_question(&self) -> String {
        self.read(|s| s.main_question().to_string()).await
    }

    pub async fn liars(&self) -> Vec<Player> {
        self.read(|s| s.liars()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn session(seed: u64) -> GameSession {
        GameSession::with_seed(ContentCatalog::builtin(), seed)
    }

    fn settings() -> GameSettings {
        GameSettings {
            player_count: 4,
            selected_categories: BTreeSet::from(["Animals".to_string()]),
            ..GameSettings::default()
        }
    }

    #[tokio::test]
    async fn test_new_session_is_in_setup() {
        let session = session(1);
        assert_eq!(session.phase().await, GamePhase::Setup);
        assert!(session.players().await.is_empty());
        assert_eq!(session.category_name().await, "Unknown");
        assert!(session.category_names().await.contains(&"Animals".to_string()));
    }

    #[tokio::test]
    async fn test_start_round_publishes_snapshot() {
        let session = session(2);
        let mut rx = session.subscribe();

        let state = session
            .start_new_round(settings(), default_players(4))
            .await
            .unwrap();
        let published = rx.recv().await.unwrap();

        assert_eq!(published, state);
        assert_eq!(published.phase, GamePhase::RoleReveal);
        assert_eq!(session.category_name().await, "Animals");
        assert!(!session.secret_word().await.is_empty());
        assert_eq!(session.liars().await.len(), 1);
    }

    #[tokio::test]
    async fn test_refused_operation_publishes_nothing() {
        let session = session(3);
        let mut rx = session.subscribe();

        let result = session.transition_phase(GamePhase::Voting).await;
        assert!(matches!(
            result,
            Err(GameError::InvalidPhaseTransition { .. })
        ));
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_sessions_share_engine() {
        let session = session(4);
        let clone = session.clone();

        session
            .start_new_round(settings(), default_players(4))
            .await
            .unwrap();
        assert_eq!(clone.phase().await, GamePhase::RoleReveal);
        assert_eq!(clone.snapshot().await, session.snapshot().await);
    }

    #[tokio::test]
    async fn test_seeded_sessions_agree() {
        let players = default_players(6);
        let a = session(42);
        let b = session(42);

        let state_a = a.start_new_round(settings(), players.clone()).await.unwrap();
        let state_b = b.start_new_round(settings(), players).await.unwrap();
        assert_eq!(state_a, state_b);
    }

    #[tokio::test]
    async fn test_starting_player_is_innocent() {
        let session = session(5);
        session
            .start_new_round(settings(), default_players(5))
            .await
            .unwrap();

        let starter = session.starting_player().await.unwrap();
        assert!(!starter.is_liar);
    }
}
