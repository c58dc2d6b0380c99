//! Dino Run headless runner
//!
//! Plays a session with a simple autopilot for a bounded time, then writes
//! the save file. Usage: `dino-run [SAVE_PATH] [SECONDS]`. `DINO_TUNING` may
//! point at a JSON file of balance overrides.

use std::env;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use dino_run::Game;
use dino_run::consts::*;
use dino_run::persistence::JsonFileStore;
use dino_run::platform::{FixedTicker, Platform};
use dino_run::render::LogRenderer;
use dino_run::sim::{Aabb, GameMode, GameState, Intent, Viewport, obstacle_hitbox, player_hitbox};
use dino_run::tuning::Tuning;

const DEFAULT_SAVE_PATH: &str = "dino_run_save.json";
const DEFAULT_SECONDS: u64 = 60;
/// Ticks to linger on the game-over screen before restarting
const RESTART_DELAY_TICKS: u64 = 90;
/// Lead time, in ticks of travel, before a ground obstacle reaches the player
const JUMP_LEAD_TICKS: f32 = 7.0;
/// Ducking needs the hold delay to elapse first
const DUCK_LEAD_TICKS: f32 = 18.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let save_path = args.next().unwrap_or_else(|| DEFAULT_SAVE_PATH.to_string());
    let seconds = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_SECONDS);

    let store = match JsonFileStore::open(&save_path) {
        Ok(store) => store,
        Err(e) => {
            log::warn!("Could not open {}: {}, starting fresh", save_path, e);
            JsonFileStore::empty(&save_path)
        }
    };

    log::info!("Save file: {}", store.path().display());

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Dino Run (headless) starting, seed {}, {} s", seed, seconds);

    let mut game = Game::new(
        seed,
        Viewport::default(),
        load_tuning(),
        Box::new(store),
        Platform::headless(),
        Box::new(LogRenderer::default()),
    );

    let intents = game.intents();
    let mut pilot = Autopilot::default();
    let mut best_run = 0.0f64;
    let limit = seconds * u64::from(FPS);
    let mut ticker = FixedTicker::new(FRAME_DURATION);

    game.run(&mut ticker, |state| {
        if state.mode == GameMode::GameOver {
            best_run = best_run.max(state.score);
        }
        if let Some(intent) = pilot.decide(state) {
            intents.send(intent);
        }
        state.time_ticks >= limit
    });

    log::info!(
        "Finished {} runs, best {}, high score {}",
        pilot.runs,
        best_run.max(game.state.score).floor(),
        game.state.high_score.points()
    );
    let data = game.teardown();
    log::debug!("Final save data: {:?}", data);
}

fn load_tuning() -> Tuning {
    let Ok(path) = env::var("DINO_TUNING") else {
        return Tuning::default();
    };
    let parsed = fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Ignoring tuning file {}: {}", path, e);
            Tuning::default()
        }
    }
}

/// Presses buttons and dodges whatever is nearest
#[derive(Debug, Default)]
struct Autopilot {
    /// Completed runs
    runs: u32,
    ducking: bool,
    game_over_at: Option<u64>,
}

impl Autopilot {
    fn decide(&mut self, state: &GameState) -> Option<Intent> {
        match state.mode {
            GameMode::Menu => Some(press(state.layout.start)),
            GameMode::Paused => Some(press(state.layout.resume)),
            GameMode::GameOver => {
                self.ducking = false;
                if self.game_over_at.is_none() {
                    self.runs += 1;
                }
                let since = *self.game_over_at.get_or_insert(state.time_ticks);
                (state.time_ticks - since >= RESTART_DELAY_TICKS).then(|| {
                    self.game_over_at = None;
                    press(state.layout.restart)
                })
            }
            GameMode::Playing => self.dodge(state),
        }
    }

    fn dodge(&mut self, state: &GameState) -> Option<Intent> {
        let insets = &state.tuning.hitbox;
        let body = player_hitbox(&state.player, insets, state.scale);
        // Top of the ducking hitbox when fully lowered
        let duck_top = state.ground_y() - state.px(state.tuning.duck_height - state.tuning.foot_overlap);

        let next = state
            .obstacles
            .iter()
            .map(|o| (o, obstacle_hitbox(o, insets, state.scale)))
            .filter(|(_, hit)| hit.right() > body.x)
            .min_by(|a, b| a.1.x.total_cmp(&b.1.x));

        let Some((obstacle, hit)) = next else {
            return self.stand();
        };
        let gap = hit.x - body.right();
        let duckable = obstacle.kind.is_flying() && hit.bottom() <= duck_top;

        if duckable {
            if gap <= state.speed * DUCK_LEAD_TICKS && !self.ducking {
                self.ducking = true;
                return Some(Intent::DuckStart);
            }
            None
        } else if self.ducking {
            self.stand()
        } else if gap <= state.speed * JUMP_LEAD_TICKS && !state.player.airborne {
            Some(Intent::Jump)
        } else {
            None
        }
    }

    fn stand(&mut self) -> Option<Intent> {
        if self.ducking {
            self.ducking = false;
            Some(Intent::DuckEnd)
        } else {
            None
        }
    }
}

fn press(button: Aabb) -> Intent {
    Intent::PointerUpAt {
        x: button.x + button.width / 2.0,
        y: button.y + button.height / 2.0,
    }
}
