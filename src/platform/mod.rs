//! Platform abstraction layer
//!
//! The simulation talks to the device only through these traits:
//! - Haptic pulses
//! - Screen keep-awake hints
//! - Page navigation
//! - Localized text lookup
//!
//! The `Log*` implementations are headless stand-ins that only log.

pub mod time;

use std::collections::HashMap;
use std::time::Duration;

pub use time::FixedTicker;

/// Vibration strength
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseStrength {
    Gentle,
    Strong,
}

/// One vibration request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticPulse {
    pub strength: PulseStrength,
    pub duration: Duration,
}

impl HapticPulse {
    /// Jumps, button presses, settings toggles
    pub const TAP: Self = Self {
        strength: PulseStrength::Gentle,
        duration: Duration::from_millis(100),
    };
    /// Game over without a new record
    pub const SOFT: Self = Self {
        strength: PulseStrength::Gentle,
        duration: Duration::from_millis(50),
    };
    /// Game over with a new record
    pub const RECORD: Self = Self {
        strength: PulseStrength::Strong,
        duration: Duration::from_millis(100),
    };
}

pub trait Haptics {
    fn pulse(&mut self, pulse: HapticPulse);
}

pub trait ScreenControl {
    /// Keep the display on for at least `duration`
    fn keep_awake(&mut self, duration: Duration);
    /// Return to the system's normal screen timeout
    fn release(&mut self);
}

pub trait Navigator {
    fn open_settings(&mut self);
    fn back(&mut self);
}

/// Opaque string lookup by key
pub trait Localizer {
    fn text(&self, key: &str) -> String;
}

/// The collaborators a game session drives
pub struct Platform {
    pub haptics: Box<dyn Haptics>,
    pub screen: Box<dyn ScreenControl>,
    pub navigator: Box<dyn Navigator>,
}

impl Platform {
    pub fn headless() -> Self {
        Self {
            haptics: Box::new(LogHaptics),
            screen: Box::new(LogScreen),
            navigator: Box::new(LogNavigator),
        }
    }
}

#[derive(Debug, Default)]
pub struct LogHaptics;

impl Haptics for LogHaptics {
    fn pulse(&mut self, pulse: HapticPulse) {
        log::debug!("Haptic pulse {:?} for {:?}", pulse.strength, pulse.duration);
    }
}

#[derive(Debug, Default)]
pub struct LogScreen;

impl ScreenControl for LogScreen {
    fn keep_awake(&mut self, duration: Duration) {
        log::debug!("Keep screen awake for {:?}", duration);
    }

    fn release(&mut self) {
        log::debug!("Screen timeout restored");
    }
}

#[derive(Debug, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn open_settings(&mut self) {
        log::info!("Navigate: settings");
    }

    fn back(&mut self) {
        log::info!("Navigate: back");
    }
}

/// Built-in English strings; unknown keys echo back
#[derive(Debug, Clone)]
pub struct StaticText {
    strings: HashMap<&'static str, &'static str>,
}

impl Default for StaticText {
    fn default() -> Self {
        let strings = [
            ("title", "Dino Run"),
            ("startBtnTxt", "Start"),
            ("settingBtnTxt", "Settings"),
            ("restartTxt", "Restart"),
            ("resumeText", "Resume"),
            ("pauseText", "Paused"),
            ("gameOverText", "GAME OVER"),
            ("scoreText", "Score:"),
            ("highScoreText", "High Score:"),
            ("newHighScoreMsg", "New High Score!"),
        ]
        .into_iter()
        .collect();
        Self { strings }
    }
}

impl Localizer for StaticText {
    fn text(&self, key: &str) -> String {
        self.strings
            .get(key)
            .map(|s| s.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}
