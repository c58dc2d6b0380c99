//! Read-only frame snapshot for the external renderer
//!
//! `Frame::capture` turns the session into a flat list of sprite draws plus
//! HUD text and an optional modal overlay. Drawing itself happens elsewhere.

use crate::platform::{Localizer, StaticText};
use crate::settings::Settings;
use crate::sim::{Aabb, GameMode, GameState, GroundCatalog, ObstacleKind, Pose, UiLayout};

/// Base text sizes, before the text-size modifier
pub mod text_size {
    pub const TITLE: f32 = 28.0;
    pub const INSTRUCTIONS: f32 = 20.0;
    pub const SCORE: f32 = 20.0;
    pub const HIGH_SCORE: f32 = 16.0;
    pub const GAME_OVER: f32 = 24.0;
}

/// Track sprite height and its offset above the ground line
const TRACK_HEIGHT: f32 = 28.0;
const TRACK_RISE: f32 = 20.0;
/// Flying sprites bob down on their second frame
const WING_BOB: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: u32,
    pub text: u32,
    pub highlight: u32,
}

impl Palette {
    pub const LIGHT: Self = Self {
        background: 0xf7f7f7,
        text: 0x535353,
        highlight: 0xff6b6b,
    };
    pub const DARK: Self = Self {
        background: 0x363636,
        text: 0xffffff,
        highlight: 0xff6b6b,
    };

    pub fn for_dark_mode(dark: bool) -> Self {
        if dark { Self::DARK } else { Self::LIGHT }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    PlayerIdle,
    PlayerRun(u8),
    PlayerDuck(u8),
    PlayerJump,
    PlayerDead,
    Cactus { catalog: GroundCatalog, variant: u8 },
    Bird(u8),
    Cloud,
    Track,
}

impl Sprite {
    /// Asset name
    pub fn image(&self) -> &'static str {
        match *self {
            Sprite::PlayerIdle => "DinoStart.png",
            Sprite::PlayerRun(0) => "DinoRun1.png",
            Sprite::PlayerRun(_) => "DinoRun2.png",
            Sprite::PlayerDuck(0) => "DinoDuck1.png",
            Sprite::PlayerDuck(_) => "DinoDuck2.png",
            Sprite::PlayerJump => "DinoJump.png",
            Sprite::PlayerDead => "DinoDead.png",
            Sprite::Cactus { catalog, variant } => match (catalog, variant % 3) {
                (GroundCatalog::Large, 0) => "LargeCactus1.png",
                (GroundCatalog::Large, 1) => "LargeCactus2.png",
                (GroundCatalog::Large, _) => "LargeCactus3.png",
                (GroundCatalog::Small, 0) => "SmallCactus1.png",
                (GroundCatalog::Small, 1) => "SmallCactus2.png",
                (GroundCatalog::Small, _) => "SmallCactus3.png",
            },
            Sprite::Bird(0) => "Bird1.png",
            Sprite::Bird(_) => "Bird2.png",
            Sprite::Cloud => "Cloud.png",
            Sprite::Track => "Track.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    pub sprite: Sprite,
    pub rect: Aabb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Menu,
    Paused,
    GameOver { new_record: bool },
}

impl Overlay {
    /// Localization keys for the overlay's lines, top to bottom
    pub fn text_keys(&self) -> &'static [&'static str] {
        match self {
            Overlay::Menu => &["title", "startBtnTxt", "settingBtnTxt"],
            Overlay::Paused => &["pauseText", "resumeText"],
            Overlay::GameOver { new_record: true } => &["gameOverText", "newHighScoreMsg", "restartTxt"],
            Overlay::GameOver { new_record: false } => &["gameOverText", "restartTxt"],
        }
    }

    /// Overlay lines resolved through `text`
    pub fn lines(&self, text: &dyn Localizer) -> Vec<String> {
        self.text_keys().iter().map(|key| text.text(key)).collect()
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub mode: GameMode,
    pub palette: Palette,
    pub text_scale: f32,
    /// Back-to-front draw order
    pub draws: Vec<Draw>,
    pub score: u64,
    /// Present only once a positive high score exists
    pub high_score: Option<u64>,
    pub overlay: Option<Overlay>,
}

impl Frame {
    pub fn capture(state: &GameState, settings: &Settings) -> Self {
        let draws = match state.mode {
            GameMode::Menu => vec![menu_player(state)],
            _ => scene(state),
        };
        let overlay = match state.mode {
            GameMode::Menu => Some(Overlay::Menu),
            GameMode::Playing => None,
            GameMode::Paused => Some(Overlay::Paused),
            GameMode::GameOver => Some(Overlay::GameOver {
                new_record: state.new_record,
            }),
        };
        Self {
            mode: state.mode,
            palette: Palette::for_dark_mode(settings.dark_mode),
            text_scale: settings.text_size.modifier(),
            draws,
            score: state.score.floor() as u64,
            high_score: state.high_score.is_set().then(|| state.high_score.points()),
            overlay,
        }
    }

    /// Five-digit zero-padded score
    pub fn score_text(&self) -> String {
        format!("{:05}", self.score)
    }

    pub fn high_score_text(&self) -> Option<String> {
        self.high_score.map(|hs| format!("HI {:05}", hs))
    }

    /// Scaled font size for a base size from [`text_size`]
    pub fn text_size(&self, base: f32) -> f32 {
        base * self.text_scale
    }
}

fn player_sprite(state: &GameState) -> Sprite {
    let frame = state.player.anim_frame();
    match state.player.pose() {
        Pose::Standing => Sprite::PlayerRun(frame),
        Pose::Ducking => Sprite::PlayerDuck(frame),
        Pose::Airborne => Sprite::PlayerJump,
        Pose::Dead => Sprite::PlayerDead,
    }
}

fn menu_player(state: &GameState) -> Draw {
    let size = state.player.presets.stand;
    let feet_x = state.viewport.width / 2.0 - state.px(20.0);
    let feet_y = state.viewport.height / 2.0 - state.px(100.0);
    Draw {
        sprite: Sprite::PlayerIdle,
        rect: Aabb::new(
            feet_x,
            feet_y - size.y + state.player.presets.foot_overlap,
            size.x,
            size.y,
        ),
    }
}

fn scene(state: &GameState) -> Vec<Draw> {
    let mut draws = Vec::with_capacity(state.clouds.len() + state.obstacles.len() + 4);

    draws.extend(state.clouds.iter().map(|c| Draw {
        sprite: Sprite::Cloud,
        rect: c.visual_box(),
    }));

    let tile = state.px(state.tuning.track_tile_width);
    if tile > 0.0 {
        let y = state.ground_y() - state.px(TRACK_RISE);
        let mut x = -state.ground_offset;
        while x < state.viewport.width {
            draws.push(Draw {
                sprite: Sprite::Track,
                rect: Aabb::new(x, y, tile, state.px(TRACK_HEIGHT)),
            });
            x += tile;
        }
    }

    draws.push(Draw {
        sprite: player_sprite(state),
        rect: state.player.visual_box(),
    });

    let wing_frame = (state.wing_phase.floor() as u32 % 2) as u8;
    draws.extend(state.obstacles.iter().map(|o| match o.kind {
        ObstacleKind::Ground { catalog, variant } => Draw {
            sprite: Sprite::Cactus { catalog, variant },
            rect: o.visual_box(),
        },
        ObstacleKind::Flying { .. } => {
            let mut rect = o.visual_box();
            if wing_frame == 1 {
                rect.y += state.px(WING_BOB);
            }
            Draw {
                sprite: Sprite::Bird(wing_frame),
                rect,
            }
        }
    }));

    draws
}

/// Consumer of frames
pub trait Renderer {
    fn draw(&mut self, frame: &Frame);

    /// Button regions as actually laid out, if they differ from the defaults
    fn layout(&self) -> Option<UiLayout> {
        None
    }
}

/// Renderer that only logs: overlay text on change, a summary once per second
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
    overlay: Option<Overlay>,
    text: StaticText,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame) {
        self.frames += 1;
        if frame.overlay != self.overlay {
            self.overlay = frame.overlay;
            if let Some(overlay) = frame.overlay {
                log::info!("[{}]", overlay.lines(&self.text).join(" | "));
            }
        }
        if self.frames.is_multiple_of(60) {
            log::debug!(
                "{:?} score {} hi {} ({} sprites)",
                frame.mode,
                frame.score_text(),
                frame.high_score_text().unwrap_or_default(),
                frame.draws.len()
            );
        }
    }
}
