use super::GameSession;
use crate::error::GameResult;
use crate::types::{Player, RevealContent};

impl GameSession {
    /// Player who should hold the device now, `None` once everyone has seen their role
    pub async fn current_reveal_player(&self) -> Option<Player> {
        self.read(|s| s.current_reveal_player().cloned()).await
    }

    /// Role card for the player holding the device
    pub async fn current_reveal_content(&self) -> Option<RevealContent> {
        self.read(|s| {
            s.current_reveal_player()
                .map(|player| s.reveal_content_for(player))
        })
        .await
    }

    pub async fn reveal_content_for(&self, player: &Player) -> RevealContent {
        self.read(|s| s.reveal_content_for(player)).await
    }

    pub async fn mark_current_player_revealed(&self) -> GameResult<()> {
        self.mutate(|engine| engine.mark_current_player_revealed())
            .await
    }

    pub async fn all_players_revealed(&self) -> bool {
        self.read(|s| s.all_players_revealed()).await
    }

    /// Revealed players over table size, 0 for an empty table
    pub async fn reveal_progress(&self) -> f64 {
        self.read(|s| s.reveal_progress()).await
    }
}

#[cfg(test)]
mod tests {
    use crate::content::ContentCatalog;
    use crate::error::GameError;
    use crate::settings::GameSettings;
    use crate::state::GameSession;
    use crate::types::*;

    #[tokio::test]
    async fn test_reveal_walks_the_table() {
        let session = GameSession::with_seed(ContentCatalog::builtin(), 10);
        let players = default_players(4);
        session
            .start_new_round(GameSettings::default(), players.clone())
            .await
            .unwrap();
        assert_eq!(session.reveal_progress().await, 0.0);

        for (seat, expected) in players.iter().enumerate() {
            let current = session.current_reveal_player().await.unwrap();
            assert_eq!(current.id, expected.id);

            let card = session.current_reveal_content().await.unwrap();
            let secret = session.secret_word().await;
            if current.is_liar {
                assert_eq!(card.content, "Blend in with the group...");
            } else {
                assert_eq!(card.content, secret);
            }

            session.mark_current_player_revealed().await.unwrap();
            assert_eq!(
                session.reveal_progress().await,
                (seat + 1) as f64 / players.len() as f64
            );
        }

        assert!(session.all_players_revealed().await);
        assert!(session.current_reveal_player().await.is_none());
        assert!(session.current_reveal_content().await.is_none());
        assert_eq!(
            session.mark_current_player_revealed().await,
            Err(GameError::RevealComplete)
        );
    }

    #[tokio::test]
    async fn test_question_mode_cards() {
        let session = GameSession::with_seed(ContentCatalog::builtin(), 11);
        let settings = GameSettings {
            game_mode: GameMode::Question,
            ..GameSettings::default()
        };
        session
            .start_new_round(settings, default_players(3))
            .await
            .unwrap();

        let state = session.snapshot().await;
        let liar = state.liars()[0].clone();
        let innocent = state.innocents()[0].clone();

        let liar_card = session.reveal_content_for(&liar).await;
        assert_eq!(liar_card.content, state.liar_question());
        assert_eq!(
            liar_card.subtitle.as_deref(),
            Some("Your question is different!")
        );

        let innocent_card = session.reveal_content_for(&innocent).await;
        assert_eq!(innocent_card.content, state.main_question());
        assert!(innocent_card.subtitle.is_none());
    }
}
