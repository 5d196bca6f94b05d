// Public API for the terminal driver and integration tests

pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod prefs;
pub mod round;
pub mod settings;
pub mod state;
pub mod types;
