use crate::content::ContentCatalog;
use crate::error::{GameError, GameResult};
use crate::types::{CategoryName, Difficulty, GameMode, LiarCountMode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Fewest players a round can be played with
pub const MIN_PLAYERS: usize = 3;
/// Upper bound the setup screen allows
pub const MAX_PLAYERS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameSettings {
    pub player_count: usize,
    pub liar_count_mode: LiarCountMode,
    pub fixed_liar_count: usize,
    pub game_mode: GameMode,
    /// Empty means every category in the catalog
    pub selected_categories: BTreeSet<CategoryName>,
    pub difficulty: Difficulty,
    pub show_category_to_liar: bool,
    pub show_hint_to_liar: bool,
    pub liar_never_goes_first: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            player_count: 4,
            liar_count_mode: LiarCountMode::Fixed,
            fixed_liar_count: 1,
            game_mode: GameMode::Word,
            selected_categories: BTreeSet::new(),
            difficulty: Difficulty::Medium,
            show_category_to_liar: true,
            show_hint_to_liar: false,
            liar_never_goes_first: true,
        }
    }
}

impl GameSettings {
    /// One liar per three players, never fewer than one
    pub fn max_liar_count(&self) -> usize {
        (self.player_count / 3).max(1)
    }

    /// Range the random liar-count mode draws from
    pub fn recommended_liar_range(&self) -> RangeInclusive<usize> {
        1..=self.max_liar_count().min(3)
    }

    /// Number of liars for a round. Random mode draws from `rng`, so two
    /// calls may disagree; callers should compute it once per round.
    pub fn actual_liar_count<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match self.liar_count_mode {
            LiarCountMode::Fixed => self.fixed_liar_count.min(self.max_liar_count()),
            LiarCountMode::Random => rng.random_range(self.recommended_liar_range()),
        }
    }

    /// Pull the fixed liar count back under the cap after the player count changed
    pub fn adjust_liar_count(&mut self) {
        if self.fixed_liar_count > self.max_liar_count() {
            self.fixed_liar_count = self.max_liar_count();
        }
    }

    /// Fill an empty category selection with every category of `catalog`
    pub fn with_default_categories(mut self, catalog: &ContentCatalog) -> Self {
        if self.selected_categories.is_empty() {
            self.selected_categories = catalog.category_names().into_iter().collect();
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Check the rules a round can start under. Run it after
    /// `with_default_categories`, an empty selection is rejected here.
    pub fn validate(&self) -> GameResult<()> {
        if self.player_count < MIN_PLAYERS {
            return Err(GameError::InvalidSettings(format!(
                "at least {} players are required, got {}",
                MIN_PLAYERS, self.player_count
            )));
        }
        if self.fixed_liar_count < 1 {
            return Err(GameError::InvalidSettings(
                "liar count must be at least 1".to_string(),
            ));
        }
        if self.fixed_liar_count > self.max_liar_count() {
            return Err(GameError::InvalidSettings(format!(
                "{} liars is more than the {} allowed for {} players",
                self.fixed_liar_count,
                self.max_liar_count(),
                self.player_count
            )));
        }
        if self.selected_categories.is_empty() {
            return Err(GameError::InvalidSettings(
                "no categories selected".to_string(),
            ));
        }
        Ok(())
    }
}
