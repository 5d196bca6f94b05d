//! Round engine: the only writer of `RoundState`.
//!
//! Every operation either completes and leaves the round consistent, or is
//! refused with a `GameError` and leaves it untouched. All randomness comes
//! from the engine's own `Rng`, so a seeded engine replays identically.

pub mod guess;
pub mod roles;

use crate::content::ContentCatalog;
use crate::error::{GameError, GameResult};
use crate::round::RoundState;
use crate::settings::GameSettings;
use crate::types::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;

pub use guess::{generate_liar_guess_options, GUESS_OPTION_COUNT};

fn find_duplicate_id(players: &[Player]) -> Option<&str> {
    let mut ids = HashSet::new();
    players
        .iter()
        .map(|p| p.id.as_str())
        .find(|id| !ids.insert(*id))
}

pub struct RoundEngine<R = StdRng> {
    state: RoundState,
    catalog: Arc<ContentCatalog>,
    rng: R,
}

impl RoundEngine<StdRng> {
    /// Engine seeded from OS entropy
    pub fn new(catalog: Arc<ContentCatalog>) -> Self {
        Self::with_rng(catalog, StdRng::from_os_rng())
    }

    /// Reproducible engine: same seed and inputs give the same rounds
    pub fn with_seed(catalog: Arc<ContentCatalog>, seed: u64) -> Self {
        Self::with_rng(catalog, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RoundEngine<R> {
    pub fn with_rng(catalog: Arc<ContentCatalog>, rng: R) -> Self {
        Self {
            state: RoundState::default(),
            catalog,
            rng,
        }
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// Set up a fresh round for `players` and move to role reveal.
    ///
    /// The roster is authoritative for the player count. Empty category
    /// selections default to the whole catalog. Nothing changes if the
    /// settings are invalid or no content matches them.
    pub fn start_new_round(
        &mut self,
        settings: GameSettings,
        players: Vec<Player>,
    ) -> GameResult<&RoundState> {
        if settings.player_count != players.len() {
            tracing::debug!(
                "Settings say {} players, roster has {}; using the roster",
                settings.player_count,
                players.len()
            );
        }
        let settings = GameSettings {
            player_count: players.len(),
            ..settings
        }
        .with_default_categories(&self.catalog);
        settings.validate()?;

        if let Some(dup) = find_duplicate_id(&players) {
            return Err(GameError::InvalidSettings(format!(
                "player id {} appears more than once",
                dup
            )));
        }

        let content = self
            .catalog
            .select_content(&settings, &mut self.rng)
            .ok_or(GameError::ContentUnavailable {
                mode: settings.game_mode,
                difficulty: settings.difficulty,
            })?;

        let mut state = RoundState {
            players,
            settings,
            ..RoundState::default()
        };
        state.reset_for_new_round();
        state.content = Some(content);
        self.state = state;

        let liar_count = self.assign_liars();
        self.select_starting_player();
        if self.state.settings.game_mode == GameMode::Word {
            self.generate_liar_guess_options();
        }

        tracing::info!(
            "Started {:?} round with {} players and {} liar(s) in category {}",
            self.state.settings.game_mode,
            self.state.players.len(),
            liar_count,
            self.state.category_name()
        );
        tracing::debug!("Secret word: {:?}", self.state.secret_word());

        Ok(&self.state)
    }

    /// Same settings, same seats and names, fresh roles and content
    pub fn play_again(&mut self) -> GameResult<&RoundState> {
        let settings = self.state.settings.clone();
        let players = self.state.players.iter().map(Player::identity).collect();
        self.start_new_round(settings, players)
    }

    fn generate_liar_guess_options(&mut self) {
        let Some(correct) = self.state.content.as_ref().and_then(|c| c.word()) else {
            return;
        };
        let all_words: Vec<&str> = self
            .catalog
            .all_words(&self.state.settings.selected_categories)
            .into_iter()
            .map(|w| w.word.as_str())
            .collect();
        let options = generate_liar_guess_options(&correct.word, &all_words, &mut self.rng);
        self.state.liar_guess_options = options;
    }

    /// Check if a phase transition is valid
    fn is_valid_phase_transition(from: GamePhase, to: GamePhase) -> bool {
        use GamePhase::*;

        matches!(
            (from, to),
            (Setup, PlayerNames)
                | (PlayerNames, Setup)
                | (RoleReveal, Discussion)
                | (Discussion, Voting)
                | (Voting, Results)
                | (Results, LiarGuess)
                | (Results, GameOver)
                | (LiarGuess, GameOver)
                | (GameOver, Setup)
        )
    }

    /// Validate preconditions for a phase transition
    fn validate_phase_preconditions(&self, to: GamePhase) -> GameResult<()> {
        let state = &self.state;
        match to {
            GamePhase::Discussion if !state.all_players_revealed() => {
                Err(GameError::PhasePrecondition(format!(
                    "{} of {} players have revealed",
                    state.revealed_count(),
                    state.players.len()
                )))
            }
            GamePhase::Results if !state.all_players_voted() => {
                Err(GameError::PhasePrecondition(format!(
                    "{} of {} players have voted",
                    state.voted_count(),
                    state.players.len()
                )))
            }
            GamePhase::LiarGuess if !state.should_offer_liar_guess() => {
                Err(GameError::LiarGuessUnavailable)
            }
            GamePhase::GameOver if state.outcome.is_none() => {
                if state.phase == GamePhase::LiarGuess {
                    Err(GameError::PhasePrecondition(
                        "the liar has not guessed yet".to_string(),
                    ))
                } else if state.should_offer_liar_guess() {
                    Err(GameError::PhasePrecondition(
                        "the liar's last-chance guess is still pending".to_string(),
                    ))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    /// Move to `to` if the phase graph allows it and its precondition holds.
    ///
    /// Entering `Results` settles the vote. Leaving `Results` for `GameOver`
    /// with a caught liar and no guess on offer gives the round to the group.
    pub fn transition_phase(&mut self, to: GamePhase) -> GameResult<()> {
        let from = self.state.phase;
        if !Self::is_valid_phase_transition(from, to) {
            tracing::warn!("Refused phase transition from {:?} to {:?}", from, to);
            return Err(GameError::InvalidPhaseTransition { from, to });
        }
        self.validate_phase_preconditions(to)?;

        match to {
            GamePhase::Results if self.state.vote_result.is_none() => {
                self.calculate_vote_result()?;
            }
            GamePhase::GameOver if self.state.outcome.is_none() => {
                self.state.outcome = Some(GameOutcome::GroupWins);
            }
            _ => {}
        }

        self.state.phase = to;
        tracing::info!("Phase {:?} -> {:?}", from, to);
        Ok(())
    }

    fn require_phase(&self, expected: GamePhase) -> GameResult<()> {
        if self.state.phase != expected {
            return Err(GameError::WrongPhase {
                expected,
                actual: self.state.phase,
            });
        }
        Ok(())
    }

    pub fn mark_current_player_revealed(&mut self) -> GameResult<()> {
        self.require_phase(GamePhase::RoleReveal)?;
        self.state.mark_current_player_revealed().inspect_err(|e| {
            tracing::warn!("Reveal refused: {}", e);
        })
    }

    /// Record the current voter's pick. The caller must not offer the
    /// voter themselves as a target.
    pub fn record_vote(&mut self, target_id: &str) -> GameResult<()> {
        self.require_phase(GamePhase::Voting)?;
        self.state.record_vote(target_id).inspect_err(|e| {
            tracing::warn!("Vote refused: {}", e);
        })
    }

    /// Settle the vote from the current tallies
    pub fn calculate_vote_result(&mut self) -> GameResult<VoteResult> {
        let result = self.state.calculate_vote_result()?.clone();
        tracing::info!(
            "Vote result: {} (outcome {:?})",
            result.title(),
            self.state.outcome
        );
        Ok(result)
    }

    pub fn should_offer_liar_guess(&self) -> bool {
        self.state.should_offer_liar_guess()
    }

    /// Judge the caught liar's single guess at the secret word
    pub fn process_liar_guess(&mut self, selected_word: &str) -> GameResult<GameOutcome> {
        self.require_phase(GamePhase::LiarGuess)?;
        if !self.state.should_offer_liar_guess() {
            return Err(GameError::LiarGuessUnavailable);
        }
        if self.state.liar_guess_correct.is_some() {
            return Err(GameError::LiarGuessAlreadyMade);
        }

        let outcome = self.state.process_liar_guess(selected_word);
        tracing::info!("Liar guessed {:?}: {:?}", selected_word, outcome);
        Ok(outcome)
    }
}
