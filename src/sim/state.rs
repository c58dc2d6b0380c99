//! Session state and entity models
//!
//! `GameState` owns everything a playthrough mutates. Subsystems receive it
//! explicitly; nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::aabb::Aabb;
use super::input::UiLayout;
use crate::consts::*;
use crate::highscores::HighScore;
use crate::tuning::Tuning;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Title screen, waiting for Start
    #[default]
    Menu,
    /// Active simulation
    Playing,
    /// Simulation frozen, overlay shown
    Paused,
    /// Run ended, waiting for Restart
    GameOver,
}

/// Player pose, derived from the body flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Standing,
    Airborne,
    Ducking,
    Dead,
}

/// Scaled body size presets for the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPresets {
    pub stand: Vec2,
    pub duck: Vec2,
    /// How far the sprite's bottom sinks below the feet line
    pub foot_overlap: f32,
}

impl BodyPresets {
    pub fn from_tuning(tuning: &Tuning, scale: f32) -> Self {
        Self {
            stand: Vec2::new(tuning.stand_width, tuning.stand_height) * scale,
            duck: Vec2::new(tuning.duck_width, tuning.duck_height) * scale,
            foot_overlap: tuning.foot_overlap * scale,
        }
    }
}

/// The player-controlled runner
///
/// `pos.y` is the feet line: it never goes below the ground line.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel_y: f32,
    pub size: Vec2,
    pub airborne: bool,
    pub ducking: bool,
    pub dead: bool,
    /// Animation phase in [0, 2)
    pub anim_phase: f32,
    pub presets: BodyPresets,
}

impl Player {
    pub fn new(x: f32, ground_y: f32, presets: BodyPresets) -> Self {
        Self {
            pos: Vec2::new(x, ground_y),
            vel_y: 0.0,
            size: presets.stand,
            airborne: false,
            ducking: false,
            dead: false,
            anim_phase: 0.0,
            presets,
        }
    }

    pub fn pose(&self) -> Pose {
        if self.dead {
            Pose::Dead
        } else if self.airborne {
            Pose::Airborne
        } else if self.ducking {
            Pose::Ducking
        } else {
            Pose::Standing
        }
    }

    /// Start a jump. Only allowed while standing.
    pub fn jump(&mut self, impulse: f32) -> bool {
        if self.pose() != Pose::Standing {
            return false;
        }
        self.vel_y = impulse;
        self.airborne = true;
        true
    }

    /// Apply the duck hold. `held_ms` is `None` when no duck input is active.
    pub fn update_duck(&mut self, held_ms: Option<f64>, delay_ms: f64) {
        if self.airborne || self.dead {
            return;
        }
        match held_ms {
            Some(held) if held >= delay_ms => {
                if !self.ducking {
                    self.ducking = true;
                    self.size = self.presets.duck;
                }
            }
            Some(_) => {}
            None => {
                if self.ducking {
                    self.stand_up();
                }
            }
        }
    }

    fn stand_up(&mut self) {
        self.ducking = false;
        self.size = self.presets.stand;
    }

    /// Gravity integration with the ground line as a clamp floor
    pub fn integrate(&mut self, gravity: f32, ground_y: f32) {
        if self.dead {
            return;
        }
        self.vel_y += gravity;
        self.pos.y += self.vel_y;
        if self.pos.y >= ground_y {
            self.pos.y = ground_y;
            self.vel_y = 0.0;
            self.airborne = false;
        }
    }

    /// Advance the run cycle; frozen while airborne or dead
    pub fn animate(&mut self) {
        if !self.dead && !self.airborne {
            self.anim_phase = (self.anim_phase + PLAYER_ANIM_RATE) % 2.0;
        }
    }

    /// Which of the two alternating pose frames to show
    pub fn anim_frame(&self) -> u8 {
        (self.anim_phase.floor() as u32 % 2) as u8
    }

    /// Freeze physics and show the death pose
    pub fn kill(&mut self) {
        self.dead = true;
        self.vel_y = 0.0;
        self.airborne = false;
        if self.ducking {
            self.stand_up();
        }
    }

    /// Sprite box: feet-anchored, sinking `foot_overlap` into the ground
    pub fn visual_box(&self) -> Aabb {
        let top = self.pos.y - self.size.y + self.presets.foot_overlap;
        Aabb::new(self.pos.x, top, self.size.x, self.size.y)
    }
}

/// Ground obstacle catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundCatalog {
    /// Short cacti (low-ground)
    Small,
    /// Tall cacti (high-ground)
    Large,
}

impl GroundCatalog {
    pub fn sizes(&self) -> &'static [(f32, f32); 3] {
        match self {
            GroundCatalog::Small => &SMALL_GROUND_SIZES,
            GroundCatalog::Large => &LARGE_GROUND_SIZES,
        }
    }
}

/// Small cacti: three widths, one height
pub const SMALL_GROUND_SIZES: [(f32, f32); 3] = [(40.0, 71.0), (68.0, 71.0), (105.0, 71.0)];
/// Large cacti: three widths, one height
pub const LARGE_GROUND_SIZES: [(f32, f32); 3] = [(48.0, 95.0), (99.0, 95.0), (102.0, 95.0)];
/// Flying obstacle sprite size
pub const FLYING_SIZE: (f32, f32) = (93.0, 62.0);
/// Flight heights above the ground line
pub const FLYING_ALTITUDES: [f32; 4] = [50.0, 75.0, 100.0, 125.0];

/// What an obstacle is, with its visual variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Ground { catalog: GroundCatalog, variant: u8 },
    Flying { altitude: u8 },
}

impl ObstacleKind {
    /// Unscaled sprite size from the catalog
    pub fn design_size(&self) -> Vec2 {
        let (w, h) = match *self {
            ObstacleKind::Ground { catalog, variant } => {
                catalog.sizes()[variant as usize % 3]
            }
            ObstacleKind::Flying { .. } => FLYING_SIZE,
        };
        Vec2::new(w, h)
    }

    pub fn is_flying(&self) -> bool {
        matches!(self, ObstacleKind::Flying { .. })
    }
}

/// A scrolling obstacle; `pos` is the top-left corner
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// Place a new obstacle at `x` relative to the ground line
    pub fn spawn(kind: ObstacleKind, x: f32, ground_y: f32, scale: f32, foot_overlap: f32) -> Self {
        let size = kind.design_size() * scale;
        let y = match kind {
            ObstacleKind::Ground { .. } => ground_y - size.y + foot_overlap,
            ObstacleKind::Flying { altitude } => {
                ground_y - FLYING_ALTITUDES[altitude as usize % FLYING_ALTITUDES.len()] * scale
            }
        };
        Self {
            kind,
            pos: Vec2::new(x, y),
            size,
        }
    }

    pub fn visual_box(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.size)
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Decorative cloud
#[derive(Debug, Clone)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Cloud {
    pub fn visual_box(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.size)
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// Screen dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 480.0,
        }
    }
}

/// Things that happened during intent handling or a tick.
/// Drained by the driver and mapped to haptics, display and navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Jumped,
    /// An overlay button was hit
    ButtonPressed,
    Paused,
    Resumed,
    GameOver { new_record: bool },
    OpenSettings,
}

/// Duck hold bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DuckInput {
    pub held: bool,
    /// Session clock when the hold began
    pub since_ms: f64,
}

/// Fixed parameters of a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub viewport: Viewport,
    pub scale: f32,
    pub tuning: Tuning,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Viewport::default(), DEFAULT_SCALE)
    }
}

impl SessionConfig {
    pub fn new(viewport: Viewport, scale: f32) -> Self {
        Self {
            viewport,
            scale,
            tuning: Tuning::default(),
        }
    }
}

/// One playthrough's mutable state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Element scale factor of the current run
    pub scale: f32,
    /// Scale the next `start` switches to
    pub next_scale: f32,
    pub mode: GameMode,
    pub score: f64,
    pub high_score: HighScore,
    /// Set on game over when the run beat the previous best
    pub new_record: bool,
    /// Scroll speed in pixels per tick
    pub speed: f32,
    pub ground_offset: f32,
    pub last_speed_increase_score: f64,
    pub duck: DuckInput,
    /// Tick counter (advances in every mode)
    pub time_ticks: u64,
    pub player: Player,
    /// Spawn order is preserved: the last element is the newest
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    /// Shared wing-flap phase for flying obstacles
    pub wing_phase: f32,
    /// Hit regions supplied by the renderer
    pub layout: UiLayout,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, config: SessionConfig, high_score: f64) -> Self {
        let SessionConfig {
            viewport,
            scale,
            tuning,
        } = config;
        let ground_y = viewport.height - tuning.ground_margin * scale;
        let player = Player::new(
            tuning.player_x * scale,
            ground_y,
            BodyPresets::from_tuning(&tuning, scale),
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            speed: tuning.base_speed * scale,
            tuning,
            viewport,
            scale,
            next_scale: scale,
            mode: GameMode::Menu,
            score: 0.0,
            high_score: HighScore::new(high_score),
            new_record: false,
            ground_offset: 0.0,
            last_speed_increase_score: 0.0,
            duck: DuckInput::default(),
            time_ticks: 0,
            player,
            obstacles: Vec::new(),
            clouds: Vec::new(),
            wing_phase: 0.0,
            layout: UiLayout::for_viewport(viewport),
            events: Vec::new(),
        }
    }

    /// Design pixels to screen pixels
    #[inline]
    pub fn px(&self, design: f32) -> f32 {
        design * self.scale
    }

    /// The feet line of a standing player
    pub fn ground_y(&self) -> f32 {
        self.viewport.height - self.px(self.tuning.ground_margin)
    }

    /// Session clock in milliseconds, derived from the tick counter
    pub fn now_ms(&self) -> f64 {
        self.time_ticks as f64 * FRAME_MS
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin a fresh run (also used for restart)
    pub fn start(&mut self) {
        self.scale = self.next_scale;
        let ground_y = self.ground_y();
        self.player = Player::new(
            self.px(self.tuning.player_x),
            ground_y,
            BodyPresets::from_tuning(&self.tuning, self.scale),
        );
        self.mode = GameMode::Playing;
        self.score = 0.0;
        self.new_record = false;
        self.speed = self.px(self.tuning.base_speed);
        self.last_speed_increase_score = 0.0;
        self.ground_offset = 0.0;
        self.wing_phase = 0.0;
        self.duck = DuckInput::default();
        self.obstacles.clear();
        self.clouds.clear();
        self.emit(GameEvent::Started);
        log::info!("Game started (seed {}, scale {:.1})", self.seed, self.scale);
    }

    pub fn pause(&mut self) {
        if self.mode == GameMode::Playing {
            self.mode = GameMode::Paused;
            self.emit(GameEvent::Paused);
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.mode == GameMode::Paused {
            self.mode = GameMode::Playing;
            self.emit(GameEvent::Resumed);
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.mode {
            GameMode::Playing => self.pause(),
            GameMode::Paused => self.resume(),
            _ => {}
        }
    }

    /// End the run, updating the high score
    pub fn game_over(&mut self) {
        if self.mode != GameMode::Playing {
            return;
        }
        self.mode = GameMode::GameOver;
        self.player.kill();
        self.duck = DuckInput::default();
        self.new_record = self.high_score.record(self.score);
        self.emit(GameEvent::GameOver {
            new_record: self.new_record,
        });
        log::info!(
            "Game over! Score: {}, High score: {}",
            self.score.floor(),
            self.high_score.points()
        );
    }
}
