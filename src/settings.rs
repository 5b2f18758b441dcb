//! Game settings
//!
//! Loaded from an optional JSON file; any missing field takes its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Tunables for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for pickup kinds and enemy fire
    pub seed: u64,
    /// Lives at the start of every level
    pub starting_lives: u8,

    // === Formation ===
    pub enemy_rows: u32,
    pub enemy_cols: u32,
    /// Seconds between enemy shots (`None` disables enemy fire)
    pub enemy_fire_interval: Option<f32>,

    /// Digit keys 1-3 apply power-ups directly
    pub test_triggers: bool,

    /// Journal file (`None` logs to the console only)
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            starting_lives: 3,

            enemy_rows: 3,
            enemy_cols: 8,
            enemy_fire_interval: Some(1.5),

            test_triggers: true,

            log_file: Some(PathBuf::from("logs/game.log")),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Settings for a quiet, deterministic session (no enemy fire, no file log)
    pub fn headless() -> Self {
        Self {
            enemy_fire_interval: None,
            log_file: None,
            ..Self::default()
        }
    }
}
