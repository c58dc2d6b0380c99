//! Runner simulation
//!
//! Physics, spawning, difficulty and collision for one session. Everything
//! advances in whole ticks and draws from the session's seeded RNG, so a seed
//! plus an intent sequence replays exactly. Nothing in here touches the
//! renderer or the platform.

pub mod aabb;
pub mod collision;
pub mod difficulty;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use aabb::{Aabb, overlaps};
pub use collision::{first_collision, obstacle_hitbox, player_hitbox};
pub use input::{Intent, UiLayout, apply_intent};
pub use state::{
    BodyPresets, Cloud, GameEvent, GameMode, GameState, GroundCatalog, Obstacle, ObstacleKind,
    Player, Pose, SessionConfig, Viewport,
};
pub use tick::tick;
