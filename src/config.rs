use std::path::PathBuf;

/// Default location of the saved preferences file
pub const DEFAULT_PREFS_PATH: &str = "shadowword_prefs.json";

/// Runtime configuration for the terminal game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON catalog to load instead of the built-in one
    pub content_path: Option<PathBuf>,
    pub prefs_path: PathBuf,
    /// Fixed seed for reproducible sessions
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content_path: None,
            prefs_path: PathBuf::from(DEFAULT_PREFS_PATH),
            seed: None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let content_path = non_empty_var("SHADOWWORD_CONTENT_PATH").map(PathBuf::from);

        let prefs_path = non_empty_var("SHADOWWORD_PREFS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_PATH));

        let seed = non_empty_var("SHADOWWORD_SEED").and_then(|raw| match raw.parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                tracing::warn!("Ignoring SHADOWWORD_SEED={:?}: not a u64", raw);
                None
            }
        });

        if let Some(seed) = seed {
            tracing::info!("Using fixed seed {}", seed);
        }

        Self {
            content_path,
            prefs_path,
            seed,
        }
    }
}
