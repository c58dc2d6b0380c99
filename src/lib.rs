//! Dino Run - a side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `render`: Frame snapshots for whatever draws the scene
//! - `platform`: Haptics, screen and navigation collaborators
//! - `persistence`: Key-value save data
//! - `tuning`: Data-driven game balance
//! - `game`: Session driver tying the above together

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, IntentSender};
pub use highscores::HighScore;
pub use settings::{ScaleFactor, SettingToggle, Settings, TextSize};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed simulation rate
    pub const FPS: u32 = 60;
    /// Length of one tick in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / FPS as f64;
    pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

    /// Element scale used until settings say otherwise
    pub const DEFAULT_SCALE: f32 = 0.7;

    /// Running animation advance per tick (frames)
    pub const PLAYER_ANIM_RATE: f32 = 0.3;
    /// Wing flap advance per tick (frames)
    pub const WING_ANIM_RATE: f32 = 0.2;

    /// Keep-awake is renewed this often during a run (25 s)
    pub const KEEP_AWAKE_INTERVAL_TICKS: u32 = 25 * FPS;
    /// Each renewal covers this long, overlapping the next one
    pub const KEEP_AWAKE_DURATION: Duration = Duration::from_secs(30);
}

#[cfg(test)]
mod tests {
    use super::consts::*;

    #[test]
    fn test_frame_timing_agrees() {
        let from_duration = FRAME_DURATION.as_secs_f64() * 1000.0;
        assert!((from_duration - FRAME_MS).abs() < 1e-6);
    }
}
