//! Save/load of the high score and settings
//!
//! Features:
//! - Key-value `Store` contract with in-memory and JSON-file backends
//! - Per-field fallback to defaults on missing or invalid values
//! - Atomic file writes (tmp → save)
//!
//! Loading never fails. Saving reports errors, which callers log and drop.

mod store;

pub use store::{JsonFileStore, MemoryStore, Store};

use thiserror::Error;

use crate::highscores::HighScore;
use crate::settings::{ScaleFactor, Settings, TextSize};

pub const KEY_HIGH_SCORE: &str = "dino_high_score";
pub const KEY_DARK_MODE: &str = "dino_is_dark_mode";
pub const KEY_TEXT_SIZE: &str = "dino_text_size_modifier";
pub const KEY_SCALE: &str = "dino_scale_factor";
pub const KEY_VIBRATION: &str = "dino_vibration_enabled";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Everything persisted between sessions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SaveData {
    pub high_score: HighScore,
    pub settings: Settings,
}

impl SaveData {
    /// Read every field, falling back to its default when absent or invalid
    pub fn load(store: &dyn Store) -> Self {
        let defaults = Settings::default();
        let data = Self {
            high_score: read(store, KEY_HIGH_SCORE, |v| v.parse::<f64>().ok())
                .map(HighScore::new)
                .unwrap_or_default(),
            settings: Settings {
                dark_mode: read(store, KEY_DARK_MODE, parse_bool).unwrap_or(defaults.dark_mode),
                text_size: read(store, KEY_TEXT_SIZE, |v| {
                    v.parse::<f32>().ok().and_then(TextSize::from_modifier)
                })
                .unwrap_or(defaults.text_size),
                scale: read(store, KEY_SCALE, |v| {
                    v.parse::<f32>().ok().and_then(ScaleFactor::from_factor)
                })
                .unwrap_or(defaults.scale),
                vibration: read(store, KEY_VIBRATION, parse_bool).unwrap_or(defaults.vibration),
            },
        };
        log::info!(
            "Loaded save data (high score {}, text {}, scale {})",
            data.high_score.points(),
            data.settings.text_size.as_str(),
            data.settings.scale.as_str()
        );
        data
    }

    /// Write every field and flush
    pub fn save(&self, store: &mut dyn Store) -> Result<(), PersistenceError> {
        let s = &self.settings;
        store.set(KEY_HIGH_SCORE, &self.high_score.value().to_string())?;
        store.set(KEY_DARK_MODE, &s.dark_mode.to_string())?;
        store.set(KEY_TEXT_SIZE, &s.text_size.modifier().to_string())?;
        store.set(KEY_SCALE, &s.scale.factor().to_string())?;
        store.set(KEY_VIBRATION, &s.vibration.to_string())?;
        store.flush()?;
        log::info!("Save data written");
        Ok(())
    }
}

fn read<T>(store: &dyn Store, key: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    match store.get(key) {
        Ok(Some(raw)) => {
            let value = parse(raw.trim());
            if value.is_none() {
                log::warn!("Ignoring invalid value for {key}: {raw:?}");
            }
            value
        }
        Ok(None) => None,
        Err(e) => {
            log::warn!("Could not read {key}: {e}");
            None
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
