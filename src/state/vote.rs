use super::GameSession;
use crate::error::{GameError, GameResult};
use crate::types::*;

impl GameSession {
    /// Player casting the next vote, `None` once everyone has voted
    pub async fn current_voting_player(&self) -> Option<Player> {
        self.read(|s| s.current_voting_player().cloned()).await
    }

    /// Everyone the current voter may pick, which excludes the voter.
    /// Empty once voting is complete.
    pub async fn vote_targets(&self) -> Vec<Player> {
        self.read(|s| match s.current_voting_player() {
            Some(voter) => s
                .players
                .iter()
                .filter(|p| p.id != voter.id)
                .cloned()
                .collect(),
            None => Vec::new(),
        })
        .await
    }

    pub async fn record_vote(&self, target_id: &str) -> GameResult<()> {
        self.mutate(|engine| engine.record_vote(target_id)).await
    }

    pub async fn all_players_voted(&self) -> bool {
        self.read(|s| s.all_players_voted()).await
    }

    /// Voters over table size, 0 for an empty table
    pub async fn voting_progress(&self) -> f64 {
        self.read(|s| s.voting_progress()).await
    }

    /// Close the vote by moving to the results phase, which settles it
    pub async fn calculate_results(&self) -> GameResult<VoteResult> {
        self.mutate(|engine| {
            engine.transition_phase(GamePhase::Results)?;
            engine
                .state()
                .vote_result
                .clone()
                .ok_or(GameError::NoPlayers)
        })
        .await
    }

    pub async fn vote_result(&self) -> Option<VoteResult> {
        self.read(|s| s.vote_result.clone()).await
    }

    pub async fn outcome(&self) -> Option<GameOutcome> {
        self.read(|s| s.outcome).await
    }

    pub async fn should_offer_liar_guess(&self) -> bool {
        self.read(|s| s.should_offer_liar_guess()).await
    }

    pub async fn liar_guess_options(&self) -> Vec<String> {
        self.read(|s| s.liar_guess_options.clone()).await
    }

    pub async fn process_liar_guess(&self, selected_word: &str) -> GameResult<GameOutcome> {
        self.mutate(|engine| engine.process_liar_guess(selected_word))
            .await
    }

    pub async fn liar_guess_correct(&self) -> Option<bool> {
        self.read(|s| s.liar_guess_correct).await
    }
}
