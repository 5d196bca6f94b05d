//! Saved preferences: the last settings, the last table of names and the
//! categories a group marked as favorites.
//!
//! Stored as a single JSON blob so the next launch can skip setup.

use crate::error::PrefsError;
use crate::settings::GameSettings;
use crate::types::{CategoryName, Player};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Schema version for the preferences file
/// Version 1: settings, player names, favorite categories
pub const PREFS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedPreferences {
    pub schema_version: u32,
    /// Save timestamp (RFC 3339)
    pub saved_at: String,
    #[serde(default)]
    pub settings: GameSettings,
    /// Seat order of the last table
    #[serde(default)]
    pub player_names: Vec<String>,
    #[serde(default)]
    pub favorite_categories: BTreeSet<CategoryName>,
}

impl Default for SavedPreferences {
    fn default() -> Self {
        Self {
            schema_version: PREFS_SCHEMA_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            settings: GameSettings::default(),
            player_names: Vec::new(),
            favorite_categories: BTreeSet::new(),
        }
    }
}

impl SavedPreferences {
    /// Capture the table and settings of a finished round
    pub fn from_round(settings: &GameSettings, players: &[Player]) -> Self {
        Self {
            settings: settings.clone(),
            player_names: players.iter().map(|p| p.name.clone()).collect(),
            ..Self::default()
        }
    }

    /// Fresh players for the saved names, in seat order
    pub fn roster(&self) -> Vec<Player> {
        self.player_names.iter().map(Player::new).collect()
    }

    /// Flip a category in or out of the favorites; returns whether it is now a favorite
    pub fn toggle_favorite(&mut self, category: &str) -> bool {
        if self.favorite_categories.remove(category) {
            false
        } else {
            self.favorite_categories.insert(category.to_string());
            true
        }
    }

    pub fn validate(&self) -> Result<(), PrefsError> {
        if self.schema_version > PREFS_SCHEMA_VERSION {
            return Err(PrefsError::UnsupportedSchema {
                found: self.schema_version,
                supported: PREFS_SCHEMA_VERSION,
            });
        }
        Ok(())
    }

    /// Read preferences from `path`. A missing file gives the defaults.
    pub async fn load(path: &Path) -> Result<Self, PrefsError> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No preferences at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let prefs: Self = serde_json::from_str(&raw)?;
        prefs.validate()?;
        tracing::info!(
            "Loaded preferences for {} player(s) from {}",
            prefs.player_names.len(),
            path.display()
        );
        Ok(prefs)
    }

    /// Write preferences to `path`, stamping the save time
    pub async fn save(&mut self, path: &Path) -> Result<(), PrefsError> {
        self.schema_version = PREFS_SCHEMA_VERSION;
        self.saved_at = chrono::Utc::now().to_rfc3339();
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        tracing::info!("Saved preferences to {}", path.display());
        Ok(())
    }

    /// Forget everything: remove the file and return the defaults
    pub async fn reset(path: &Path) -> Result<Self, PrefsError> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => tracing::info!("Removed preferences at {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{default_players, GameMode};

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = SavedPreferences::load(&dir.path().join("prefs.json"))
            .await
            .unwrap();

        assert_eq!(prefs.schema_version, PREFS_SCHEMA_VERSION);
        assert_eq!(prefs.settings, GameSettings::default());
        assert!(prefs.player_names.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let settings = GameSettings {
            game_mode: GameMode::Question,
            ..GameSettings::default()
        };
        let mut prefs = SavedPreferences::from_round(&settings, &default_players(3));
        prefs.toggle_favorite("Animals");
        prefs.save(&path).await.unwrap();

        let loaded = SavedPreferences::load(&path).await.unwrap();
        assert_eq!(loaded.settings.game_mode, GameMode::Question);
        assert_eq!(
            loaded.player_names,
            vec!["Player 1", "Player 2", "Player 3"]
        );
        assert!(loaded.favorite_categories.contains("Animals"));
        assert_eq!(loaded.roster().len(), 3);
    }

    #[tokio::test]
    async fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(
            &path,
            r#"{"schema_version": 1, "saved_at": "2024-01-01T00:00:00Z", "player_names": ["Ana", "Bo"]}"#,
        )
        .unwrap();

        let prefs = SavedPreferences::load(&path).await.unwrap();
        assert_eq!(prefs.player_names, vec!["Ana", "Bo"]);
        assert_eq!(prefs.settings, GameSettings::default());
    }

    #[tokio::test]
    async fn test_newer_schema_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let future = SavedPreferences {
            schema_version: PREFS_SCHEMA_VERSION + 1,
            ..SavedPreferences::default()
        };
        std::fs::write(&path, serde_json::to_string(&future).unwrap()).unwrap();

        let result = SavedPreferences::load(&path).await;
        assert!(matches!(
            result,
            Err(PrefsError::UnsupportedSchema { found: 2, supported: 1 })
        ));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            SavedPreferences::load(&path).await,
            Err(PrefsError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_reset_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut prefs = SavedPreferences::from_round(&GameSettings::default(), &default_players(4));
        prefs.save(&path).await.unwrap();

        let reset = SavedPreferences::reset(&path).await.unwrap();
        assert!(reset.player_names.is_empty());
        assert!(!path.exists());

        // Resetting twice is fine
        SavedPreferences::reset(&path).await.unwrap();
    }

    #[test]
    fn test_toggle_favorite() {
        let mut prefs = SavedPreferences::default();
        assert!(prefs.toggle_favorite("Food"));
        assert!(!prefs.toggle_favorite("Food"));
        assert!(prefs.favorite_categories.is_empty());
    }
}
