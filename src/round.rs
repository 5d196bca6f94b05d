//! Authoritative record of one round.
//!
//! Mutations here only guard indices and keep derived counters consistent.
//! Which phase an operation is allowed in is the engine's business.

use crate::content::RoundContent;
use crate::error::{GameError, GameResult};
use crate::settings::GameSettings;
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundState {
    pub phase: GamePhase,
    /// Seating order; fixes reveal and voting order for the round
    pub players: Vec<Player>,
    pub settings: GameSettings,
    pub content: Option<RoundContent>,
    pub starting_player_index: usize,
    pub current_reveal_index: usize,
    pub current_voting_index: usize,
    pub vote_result: Option<VoteResult>,
    pub outcome: Option<GameOutcome>,
    pub liar_guess_options: Vec<String>,
    pub liar_guess_correct: Option<bool>,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Setup,
            players: Vec::new(),
            settings: GameSettings::default(),
            content: None,
            starting_player_index: 0,
            current_reveal_index: 0,
            current_voting_index: 0,
            vote_result: None,
            outcome: None,
            liar_guess_options: Vec::new(),
            liar_guess_correct: None,
        }
    }
}

impl RoundState {
    /// Clear every per-round field, keeping player identities and seating
    pub fn reset_for_new_round(&mut self) {
        self.phase = GamePhase::RoleReveal;
        self.content = None;
        self.starting_player_index = 0;
        self.current_reveal_index = 0;
        self.current_voting_index = 0;
        self.vote_result = None;
        self.outcome = None;
        self.liar_guess_options.clear();
        self.liar_guess_correct = None;

        for player in &mut self.players {
            player.clear_round_fields();
        }
    }

    pub fn current_reveal_player(&self) -> Option<&Player> {
        self.players.get(self.current_reveal_index)
    }

    pub fn current_voting_player(&self) -> Option<&Player> {
        self.players.get(self.current_voting_index)
    }

    pub fn starting_player(&self) -> Option<&Player> {
        self.players.get(self.starting_player_index)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn liars(&self) -> Vec<Player> {
        liars(&self.players)
    }

    pub fn innocents(&self) -> Vec<Player> {
        innocents(&self.players)
    }

    pub fn category_name(&self) -> &str {
        self.content
            .as_ref()
            .map(|c| c.category_name())
            .unwrap_or("Unknown")
    }

    pub fn secret_word(&self) -> &str {
        self.content.as_ref().map(|c| c.secret_word()).unwrap_or("")
    }

    pub fn hint(&self) -> &str {
        self.content.as_ref().map(|c| c.hint()).unwrap_or("")
    }

    pub fn main_question(&self) -> &str {
        self.content.as_ref().map(|c| c.main_question()).unwrap_or("")
    }

    pub fn liar_question(&self) -> &str {
        self.content.as_ref().map(|c| c.liar_question()).unwrap_or("")
    }

    pub fn all_players_revealed(&self) -> bool {
        self.players.iter().all(|p| p.has_revealed)
    }

    pub fn all_players_voted(&self) -> bool {
        self.players.iter().all(|p| p.has_voted)
    }

    pub fn revealed_count(&self) -> usize {
        self.players.iter().filter(|p| p.has_revealed).count()
    }

    pub fn voted_count(&self) -> usize {
        self.players.iter().filter(|p| p.has_voted).count()
    }

    /// Fraction of players who have seen their role, 0 with no players
    pub fn reveal_progress(&self) -> f64 {
        ratio(self.revealed_count(), self.players.len())
    }

    /// Fraction of players who have voted, 0 with no players
    pub fn voting_progress(&self) -> f64 {
        ratio(self.voted_count(), self.players.len())
    }

    /// What `player` sees when the device is handed to them
    pub fn reveal_content_for(&self, player: &Player) -> RevealContent {
        let settings = &self.settings;
        match (player.is_liar, settings.game_mode) {
            (true, GameMode::Word) => {
                let mut lines = Vec::new();
                if settings.show_category_to_liar {
                    lines.push(format!("Category: {}", self.category_name()));
                }
                if settings.show_hint_to_liar && !self.hint().is_empty() {
                    lines.push(format!("Hint: {}", self.hint()));
                }
                RevealContent {
                    is_liar: true,
                    content: "Blend in with the group...".to_string(),
                    subtitle: (!lines.is_empty()).then(|| lines.join("\n")),
                }
            }
            (true, GameMode::Question) => RevealContent {
                is_liar: true,
                content: self.liar_question().to_string(),
                subtitle: Some("Your question is different!".to_string()),
            },
            (false, GameMode::Word) => RevealContent {
                is_liar: false,
                content: self.secret_word().to_string(),
                subtitle: Some(format!("Category: {}", self.category_name())),
            },
            (false, GameMode::Question) => RevealContent {
                is_liar: false,
                content: self.main_question().to_string(),
                subtitle: None,
            },
        }
    }

    /// Mark the player at the reveal index and move on to the next seat
    pub fn mark_current_player_revealed(&mut self) -> GameResult<()> {
        let player = self
            .players
            .get_mut(self.current_reveal_index)
            .ok_or(GameError::RevealComplete)?;
        player.has_revealed = true;
        self.current_reveal_index += 1;
        Ok(())
    }

    /// Record the vote of the player at the voting index.
    ///
    /// Self-votes are not rejected here; the vote-target list handed to the
    /// voter already excludes them.
    pub fn record_vote(&mut self, target_id: &str) -> GameResult<()> {
        if self.current_voting_index >= self.players.len() {
            return Err(GameError::VotingComplete);
        }
        let target_index = self
            .players
            .iter()
            .position(|p| p.id == target_id)
            .ok_or_else(|| GameError::UnknownPlayer(target_id.to_string()))?;

        let voter = &mut self.players[self.current_voting_index];
        voter.has_voted = true;
        voter.voted_for_id = Some(target_id.to_string());
        self.players[target_index].votes_received += 1;
        self.current_voting_index += 1;
        Ok(())
    }

    /// Settle the vote. Ties go to the liar; a caught liar leaves the
    /// outcome open until the last-chance guess is resolved.
    pub fn calculate_vote_result(&mut self) -> GameResult<&VoteResult> {
        let max_votes = self
            .players
            .iter()
            .map(|p| p.votes_received)
            .max()
            .unwrap_or(0);
        let most_voted: Vec<Player> = self
            .players
            .iter()
            .filter(|p| p.votes_received == max_votes)
            .cloned()
            .collect();

        let (result, outcome) = match most_voted.as_slice() {
            [] => return Err(GameError::NoPlayers),
            [voted] if voted.is_liar => (
                VoteResult::LiarCaught {
                    liar: voted.clone(),
                },
                None,
            ),
            [voted] => (
                VoteResult::LiarEscaped {
                    voted_player: voted.clone(),
                    liars: self.liars(),
                },
                Some(GameOutcome::LiarWins),
            ),
            _ => (
                VoteResult::Tie {
                    players: most_voted.clone(),
                    liars: self.liars(),
                },
                Some(GameOutcome::LiarWins),
            ),
        };

        self.outcome = outcome;
        let result: &VoteResult = self.vote_result.insert(result);
        Ok(result)
    }

    /// True only when the liar was caught in word mode
    pub fn should_offer_liar_guess(&self) -> bool {
        matches!(self.vote_result, Some(VoteResult::LiarCaught { .. }))
            && self.settings.game_mode == GameMode::Word
    }

    /// Compare the liar's pick against the secret word, ignoring case
    pub fn process_liar_guess(&mut self, selected_word: &str) -> GameOutcome {
        let correct = selected_word.to_lowercase() == self.secret_word().to_lowercase();
        let outcome = if correct {
            GameOutcome::LiarStolenWin
        } else {
            GameOutcome::GroupWins
        };
        self.liar_guess_correct = Some(correct);
        self.outcome = Some(outcome);
        outcome
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
