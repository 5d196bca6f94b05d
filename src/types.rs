use serde::{Deserialize, Serialize};

/// Opaque ID types for type safety
pub type PlayerId = String;
pub type CategoryName = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    Setup,
    PlayerNames,
    RoleReveal,
    Discussion,
    Voting,
    Results,
    LiarGuess,
    GameOver,
}

impl GamePhase {
    pub fn display_title(&self) -> &'static str {
        match self {
            GamePhase::Setup => "Setup",
            GamePhase::PlayerNames => "Players",
            GamePhase::RoleReveal => "Reveal Roles",
            GamePhase::Discussion => "Discussion",
            GamePhase::Voting => "Voting",
            GamePhase::Results => "Results",
            GamePhase::LiarGuess => "Last Chance",
            GamePhase::GameOver => "Game Over",
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            GamePhase::Setup => "Configure your game settings",
            GamePhase::PlayerNames => "Enter player names",
            GamePhase::RoleReveal => "Pass the device to see your role",
            GamePhase::Discussion => "Give clues and find the liar!",
            GamePhase::Voting => "Vote for who you think is the liar",
            GamePhase::Results => "See who got caught!",
            GamePhase::LiarGuess => "The liar gets one last chance...",
            GamePhase::GameOver => "Game complete!",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Everyone but the liar sees the same secret word
    #[default]
    Word,
    /// The liar answers a different question
    Question,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Cumulative tier filter: a round at `self` may use items of `tier`
    /// when `tier` is no harder than `self`.
    pub fn admits(&self, tier: Difficulty) -> bool {
        tier <= *self
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LiarCountMode {
    #[default]
    Fixed,
    Random,
}

/// A seat at the table. Identity (`id`, `name`) survives across rounds,
/// everything else is per-round and cleared by `RoundState::reset_for_new_round`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub is_liar: bool,
    #[serde(default)]
    pub has_revealed: bool,
    #[serde(default)]
    pub has_voted: bool,
    #[serde(default)]
    pub voted_for_id: Option<PlayerId>,
    #[serde(default)]
    pub votes_received: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ulid::Ulid::new().to_string(), name)
    }

    pub fn with_id(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_liar: false,
            has_revealed: false,
            has_voted: false,
            voted_for_id: None,
            votes_received: 0,
        }
    }

    /// Same identity, fresh per-round fields
    pub fn identity(&self) -> Self {
        Self::with_id(self.id.clone(), self.name.clone())
    }

    pub fn clear_round_fields(&mut self) {
        self.is_liar = false;
        self.has_revealed = false;
        self.has_voted = false;
        self.voted_for_id = None;
        self.votes_received = 0;
    }
}

/// "Player 1" .. "Player N"
pub fn default_players(count: usize) -> Vec<Player> {
    (1..=count)
        .map(|n| Player::new(format!("Player {}", n)))
        .collect()
}

pub fn liars(players: &[Player]) -> Vec<Player> {
    players.iter().filter(|p| p.is_liar).cloned().collect()
}

pub fn innocents(players: &[Player]) -> Vec<Player> {
    players.iter().filter(|p| !p.is_liar).cloned().collect()
}

fn joined_names(players: &[Player]) -> String {
    players
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw result of the vote, before the liar's last-chance guess
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoteResult {
    LiarCaught { liar: Player },
    LiarEscaped { voted_player: Player, liars: Vec<Player> },
    Tie { players: Vec<Player>, liars: Vec<Player> },
}

impl VoteResult {
    /// Ties count as a liar win
    pub fn liar_wins(&self) -> bool {
        !matches!(self, VoteResult::LiarCaught { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            VoteResult::LiarCaught { .. } => "Liar Caught!",
            VoteResult::LiarEscaped { .. } => "Liar Escaped!",
            VoteResult::Tie { .. } => "It's a Tie!",
        }
    }

    pub fn subtitle(&self) -> String {
        match self {
            VoteResult::LiarCaught { liar } => {
                format!("{} was the liar and got caught!", liar.name)
            }
            VoteResult::LiarEscaped {
                voted_player,
                liars,
            } => format!(
                "{} was innocent! The liar was {}.",
                voted_player.name,
                joined_names(liars)
            ),
            VoteResult::Tie { liars, .. } => {
                format!("Votes were tied! The liar {} wins!", joined_names(liars))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    GroupWins,
    LiarWins,
    /// Caught, but named the secret word
    LiarStolenWin,
}

impl GameOutcome {
    pub fn is_liar_victory(&self) -> bool {
        matches!(self, GameOutcome::LiarWins | GameOutcome::LiarStolenWin)
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameOutcome::GroupWins => "Group Wins!",
            GameOutcome::LiarWins => "Liar Wins!",
            GameOutcome::LiarStolenWin => "Liar Steals the Win!",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            GameOutcome::GroupWins => "The group successfully identified the liar!",
            GameOutcome::LiarWins => "The liar successfully blended in!",
            GameOutcome::LiarStolenWin => "The liar was caught but guessed the word correctly!",
        }
    }
}

/// What a player sees when the device is passed to them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevealContent {
    pub is_liar: bool,
    pub content: String,
    pub subtitle: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_is_cumulative() {
        assert!(Difficulty::Easy.admits(Difficulty::Easy));
        assert!(!Difficulty::Easy.admits(Difficulty::Medium));
        assert!(Difficulty::Medium.admits(Difficulty::Easy));
        assert!(Difficulty::Medium.admits(Difficulty::Medium));
        assert!(!Difficulty::Medium.admits(Difficulty::Hard));
        assert!(Difficulty::Hard.admits(Difficulty::Easy));
        assert!(Difficulty::Hard.admits(Difficulty::Hard));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_clear_round_fields_keeps_identity() {
        let mut player = Player::with_id("p1", "Alice");
        player.is_liar = true;
        player.has_revealed = true;
        player.has_voted = true;
        player.voted_for_id = Some("p2".to_string());
        player.votes_received = 3;

        player.clear_round_fields();

        assert_eq!(player, Player::with_id("p1", "Alice"));
    }

    #[test]
    fn test_default_players_have_unique_ids() {
        let players = default_players(4);
        assert_eq!(players.len(), 4);
        assert_eq!(players[0].name, "Player 1");
        assert_eq!(players[3].name, "Player 4");

        let mut ids: Vec<_> = players.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_vote_result_text() {
        let mut liar = Player::with_id("p1", "Alice");
        liar.is_liar = true;
        let bob = Player::with_id("p2", "Bob");

        let escaped = VoteResult::LiarEscaped {
            voted_player: bob.clone(),
            liars: vec![liar.clone()],
        };
        assert!(escaped.liar_wins());
        assert_eq!(escaped.subtitle(), "Bob was innocent! The liar was Alice.");

        let caught = VoteResult::LiarCaught { liar };
        assert!(!caught.liar_wins());
        assert_eq!(caught.title(), "Liar Caught!");
    }

    #[test]
    fn test_vote_result_serializes_tagged() {
        let result = VoteResult::Tie {
            players: vec![],
            liars: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "tie");
    }
}
