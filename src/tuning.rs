//! Data-driven game balance
//!
//! Every length and velocity here is in unscaled design pixels. The session
//! multiplies them by its scale factor at the point of use.

use serde::{Deserialize, Serialize};

/// Hitbox insets, in design pixels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HitboxTuning {
    /// Horizontal inset applied to the player's left edge
    pub player_left: f32,
    /// Total width removed from the player box
    pub player_width: f32,
    /// Total height removed from the player box (standing and ducking)
    pub player_height: f32,
    /// Horizontal inset on the left of ground obstacles
    pub ground_left: f32,
    /// Total width removed from ground obstacles
    pub ground_width: f32,
    /// Inset on every side of flying obstacles
    pub flying_edge: f32,
}

impl Default for HitboxTuning {
    fn default() -> Self {
        Self {
            player_left: 15.0,
            player_width: 30.0,
            player_height: 10.0,
            ground_left: 10.0,
            ground_width: 20.0,
            flying_edge: 5.0,
        }
    }
}

/// Balance constants for a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_impulse: f32,
    /// Distance of the ground line above the bottom of the screen
    pub ground_margin: f32,
    /// Fixed horizontal position of the player
    pub player_x: f32,
    /// Standing body size
    pub stand_width: f32,
    pub stand_height: f32,
    /// Ducking body size (the ducking sprite is wider)
    pub duck_width: f32,
    pub duck_height: f32,
    /// Overlap between the body sprite's bottom and the ground line
    pub foot_overlap: f32,
    /// Milliseconds a duck must be held before the body lowers
    pub duck_delay_ms: f64,

    // === Scrolling & difficulty ===
    /// Starting scroll speed (pixels per tick)
    pub base_speed: f32,
    /// Speed added at each score threshold
    pub speed_step: f32,
    /// Score distance between speed steps
    pub speed_step_interval: f64,
    /// Score added for every simulated tick
    pub score_per_tick: f64,
    /// Ground track tile width (offset wraps here)
    pub track_tile_width: f32,
    /// Cloud speed as a fraction of the scroll speed
    pub cloud_parallax: f32,

    // === Spawning ===
    /// Per-tick probability of a cloud
    pub cloud_spawn_rate: f64,
    /// Per-tick probability of an obstacle once the gap allows one
    pub obstacle_spawn_rate: f64,
    /// Minimum distance between the right edge and the latest obstacle
    pub min_gap: f32,
    /// Uniform jitter added on top of `min_gap`
    pub gap_jitter: f32,
    /// Score below which only ground obstacles spawn
    pub flying_min_score: f64,
    /// Chance of a flying obstacle once `flying_min_score` is reached
    pub flying_chance: f64,

    pub hitbox: HitboxTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            jump_impulse: -18.0,
            ground_margin: 120.0,
            player_x: 80.0,
            stand_width: 88.0,
            stand_height: 94.0,
            duck_width: 118.0,
            duck_height: 60.0,
            foot_overlap: 3.0,
            duck_delay_ms: 200.0,

            base_speed: 10.0,
            speed_step: 1.0,
            speed_step_interval: 100.0,
            score_per_tick: 0.1,
            track_tile_width: 2404.0,
            cloud_parallax: 0.3,

            cloud_spawn_rate: 0.01,
            obstacle_spawn_rate: 0.01,
            min_gap: 100.0,
            gap_jitter: 50.0,
            flying_min_score: 500.0,
            flying_chance: 0.3,

            hitbox: HitboxTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 2.0, "hitbox": { "flying_edge": 1.0 } }"#)
            .unwrap();
        assert_eq!(tuning.gravity, 2.0);
        assert_eq!(tuning.jump_impulse, -18.0);
        assert_eq!(tuning.hitbox.flying_edge, 1.0);
        assert_eq!(tuning.hitbox.ground_left, 10.0);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("not json").is_err());
    }
}
