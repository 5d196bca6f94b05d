//! Content catalog: categories of secret words and question pairs.
//!
//! The catalog is read-only once loaded and is only consulted while a round
//! is being set up. It can come from a JSON file or from the built-in set;
//! the engine does not care which.

mod builtin;

use crate::error::CatalogError;
use crate::settings::GameSettings;
use crate::types::{CategoryName, Difficulty, GameMode};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// Unknown or missing tiers are treated as medium
fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Difficulty, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordItem {
    pub word: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPair {
    pub main_question: String,
    pub liar_question: String,
    #[serde(default, deserialize_with = "lenient_difficulty")]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: CategoryName,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub words: Vec<WordItem>,
    #[serde(default)]
    pub question_pairs: Vec<QuestionPair>,
}

impl Category {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn question_count(&self) -> usize {
        self.question_pairs.len()
    }

    /// Words at `difficulty` and every easier tier
    pub fn words_for(&self, difficulty: Difficulty) -> Vec<&WordItem> {
        self.words
            .iter()
            .filter(|w| difficulty.admits(w.difficulty))
            .collect()
    }

    /// Question pairs at `difficulty` and every easier tier
    pub fn questions_for(&self, difficulty: Difficulty) -> Vec<&QuestionPair> {
        self.question_pairs
            .iter()
            .filter(|q| difficulty.admits(q.difficulty))
            .collect()
    }
}

/// The item a round is played with. Word mode and question mode are
/// mutually exclusive, so only one of them can ever be present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RoundItem {
    Word(WordItem),
    Question(QuestionPair),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundContent {
    pub category: Category,
    pub item: RoundItem,
}

impl RoundContent {
    pub fn word(&self) -> Option<&WordItem> {
        match &self.item {
            RoundItem::Word(word) => Some(word),
            RoundItem::Question(_) => None,
        }
    }

    pub fn question_pair(&self) -> Option<&QuestionPair> {
        match &self.item {
            RoundItem::Word(_) => None,
            RoundItem::Question(pair) => Some(pair),
        }
    }

    pub fn category_name(&self) -> &str {
        &self.category.name
    }

    pub fn secret_word(&self) -> &str {
        self.word().map(|w| w.word.as_str()).unwrap_or("")
    }

    pub fn hint(&self) -> &str {
        self.word().map(|w| w.hint.as_str()).unwrap_or("")
    }

    pub fn main_question(&self) -> &str {
        self.question_pair()
            .map(|q| q.main_question.as_str())
            .unwrap_or("")
    }

    pub fn liar_question(&self) -> &str {
        self.question_pair()
            .map(|q| q.liar_question.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentCatalog {
    pub categories: Vec<Category>,
}

impl ContentCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Catalog shipped with the binary, used when no file is configured
    /// or the configured one cannot be read
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// Parse and validate a JSON catalog (`{"categories": [...]}`)
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: ContentCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load `path` if given, falling back to the built-in catalog
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("Using built-in content catalog");
            return Self::builtin();
        };

        match Self::load(path) {
            Ok(catalog) => {
                tracing::info!(
                    "Loaded {} categories from {}",
                    catalog.categories.len(),
                    path.display()
                );
                catalog
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load catalog from {}: {}. Using built-in content.",
                    path.display(),
                    e
                );
                Self::builtin()
            }
        }
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.categories.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.name.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.name.clone()));
            }
        }
        Ok(())
    }

    pub fn category_names(&self) -> Vec<CategoryName> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Categories whose names are in `names`; an empty set selects all.
    /// Catalog order is kept so seeded draws are reproducible.
    pub fn categories_named(&self, names: &BTreeSet<CategoryName>) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| names.is_empty() || names.contains(&c.name))
            .collect()
    }

    /// Pick a category, then an item from it, for the settings' mode and
    /// difficulty. `None` when the category/difficulty filter leaves nothing.
    pub fn select_content<R: Rng + ?Sized>(
        &self,
        settings: &GameSettings,
        rng: &mut R,
    ) -> Option<RoundContent> {
        let categories = self.categories_named(&settings.selected_categories);
        let category = *categories.choose(rng)?;

        let item = match settings.game_mode {
            GameMode::Word => {
                let word = *category.words_for(settings.difficulty).choose(rng)?;
                RoundItem::Word(word.clone())
            }
            GameMode::Question => {
                let pair = *category.questions_for(settings.difficulty).choose(rng)?;
                RoundItem::Question(pair.clone())
            }
        };

        Some(RoundContent {
            category: category.clone(),
            item,
        })
    }

    /// Every word across the selected categories, regardless of difficulty
    pub fn all_words(&self, names: &BTreeSet<CategoryName>) -> Vec<&WordItem> {
        self.categories_named(names)
            .into_iter()
            .flat_map(|c| c.words.iter())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SMALL_CATALOG: &str = r#"{
        "categories": [
            {
                "name": "Animals",
                "icon": "pawprint",
                "words": [
                    {"word": "Dog", "hint": "Barks", "difficulty": "easy"},
                    {"word": "Okapi", "hint": "Forest giraffe", "difficulty": "hard"}
                ],
                "questionPairs": [
                    {"mainQuestion": "Favorite pet?", "liarQuestion": "Scariest animal?", "difficulty": "medium"}
                ]
            },
            {
                "name": "Food",
                "icon": "fork.knife",
                "words": [
                    {"word": "Pizza", "hint": "Slices", "difficulty": "extreme"}
                ],
                "questionPairs": []
            }
        ]
    }"#;

    fn settings(mode: GameMode, difficulty: Difficulty, categories: &[&str]) -> GameSettings {
        GameSettings {
            game_mode: mode,
            difficulty,
            selected_categories: categories.iter().map(|c| c.to_string()).collect(),
            ..GameSettings::default()
        }
    }

    #[test]
    fn test_parse_catalog() {
        let catalog = ContentCatalog::from_json_str(SMALL_CATALOG).unwrap();
        assert_eq!(catalog.category_names(), vec!["Animals", "Food"]);

        let animals = catalog.category("Animals").unwrap();
        assert_eq!(animals.word_count(), 2);
        assert_eq!(animals.question_count(), 1);
        assert_eq!(
            animals.question_pairs[0].liar_question,
            "Scariest animal?"
        );

        // Unknown tier falls back to medium
        let food = catalog.category("Food").unwrap();
        assert_eq!(food.words[0].difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_reject_duplicate_and_empty_catalogs() {
        let duplicate = r#"{"categories": [{"name": "A"}, {"name": "A"}]}"#;
        assert!(matches!(
            ContentCatalog::from_json_str(duplicate),
            Err(CatalogError::DuplicateCategory(name)) if name == "A"
        ));

        assert!(matches!(
            ContentCatalog::from_json_str(r#"{"categories": []}"#),
            Err(CatalogError::Empty)
        ));

        assert!(matches!(
            ContentCatalog::from_json_str("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_words_for_difficulty() {
        let catalog = ContentCatalog::from_json_str(SMALL_CATALOG).unwrap();
        let animals = catalog.category("Animals").unwrap();

        let easy: Vec<_> = animals.words_for(Difficulty::Easy);
        assert_eq!(easy.len(), 1);
        assert_eq!(easy[0].word, "Dog");
        assert_eq!(animals.words_for(Difficulty::Medium).len(), 1);
        assert_eq!(animals.words_for(Difficulty::Hard).len(), 2);

        assert!(animals.questions_for(Difficulty::Easy).is_empty());
        assert_eq!(animals.questions_for(Difficulty::Medium).len(), 1);
    }

    #[test]
    fn test_select_word_content() {
        let catalog = ContentCatalog::from_json_str(SMALL_CATALOG).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..20 {
            let content = catalog
                .select_content(
                    &settings(GameMode::Word, Difficulty::Easy, &["Animals"]),
                    &mut rng,
                )
                .unwrap();
            assert_eq!(content.category_name(), "Animals");
            assert_eq!(content.secret_word(), "Dog");
            assert_eq!(content.hint(), "Barks");
            assert!(content.question_pair().is_none());
        }
    }

    #[test]
    fn test_select_question_content() {
        let catalog = ContentCatalog::from_json_str(SMALL_CATALOG).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let content = catalog
            .select_content(
                &settings(GameMode::Question, Difficulty::Hard, &["Animals"]),
                &mut rng,
            )
            .unwrap();
        assert!(content.word().is_none());
        assert_eq!(content.main_question(), "Favorite pet?");
        assert_eq!(content.liar_question(), "Scariest animal?");
        assert_eq!(content.secret_word(), "");
    }

    #[test]
    fn test_select_content_impossible_filter() {
        let catalog = ContentCatalog::from_json_str(SMALL_CATALOG).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        // Food has no easy words
        assert!(catalog
            .select_content(
                &settings(GameMode::Word, Difficulty::Easy, &["Food"]),
                &mut rng
            )
            .is_none());

        // Unknown category
        assert!(catalog
            .select_content(
                &settings(GameMode::Word, Difficulty::Hard, &["Space"]),
                &mut rng
            )
            .is_none());
    }

    #[test]
    fn test_empty_selection_means_all() {
        let catalog = ContentCatalog::from_json_str(SMALL_CATALOG).unwrap();
        assert_eq!(catalog.categories_named(&BTreeSet::new()).len(), 2);
        assert_eq!(catalog.all_words(&BTreeSet::new()).len(), 3);

        let only_food = BTreeSet::from(["Food".to_string()]);
        let words = catalog.all_words(&only_food);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "Pizza");
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = ContentCatalog::builtin();
        assert!(catalog.validate().is_ok());
        for category in &catalog.categories {
            assert!(
                !category.words_for(Difficulty::Easy).is_empty(),
                "{} has no easy words",
                category.name
            );
            assert!(
                !category.questions_for(Difficulty::Easy).is_empty(),
                "{} has no easy questions",
                category.name
            );
        }
    }

    #[test]
    fn test_load_or_builtin_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ nope").unwrap();

        let catalog = ContentCatalog::load_or_builtin(Some(&path));
        assert_eq!(catalog, ContentCatalog::builtin());

        let good = dir.path().join("content.json");
        std::fs::write(&good, SMALL_CATALOG).unwrap();
        let catalog = ContentCatalog::load_or_builtin(Some(&good));
        assert_eq!(catalog.category_names(), vec!["Animals", "Food"]);
    }
}
