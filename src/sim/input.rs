//! Input intents and the mode transitions they drive
//!
//! Intents arrive between ticks and mutate the session immediately; the next
//! tick observes the result. Intents that make no sense for the current mode
//! are dropped.

use super::aabb::Aabb;
use super::state::{DuckInput, GameEvent, GameMode, GameState, Viewport};

/// An already-decoded user action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Jump,
    DuckStart,
    DuckEnd,
    TogglePause,
    /// Pointer released at screen coordinates
    PointerUpAt { x: f32, y: f32 },
    Back,
    SwipeRight,
}

/// Overlay button regions, supplied by whoever draws them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiLayout {
    pub start: Aabb,
    pub settings: Aabb,
    pub restart: Aabb,
    pub resume: Aabb,
}

/// Padding around button labels
pub const BUTTON_PADDING: f32 = 6.0;
/// Label metrics assumed when no renderer has reported real ones
const DEFAULT_LABEL_SIZE: (f32, f32) = (120.0, 24.0);

impl UiLayout {
    /// Centered buttons at the standard offsets from the screen middle
    pub fn for_viewport(viewport: Viewport) -> Self {
        let (w, h) = DEFAULT_LABEL_SIZE;
        let mid = viewport.height / 2.0;
        Self {
            start: Self::button(viewport, mid + 70.0, w, h),
            settings: Self::button(viewport, mid + 140.0, w, h),
            restart: Self::button(viewport, mid + 60.0, w, h),
            resume: Self::button(viewport, mid + 30.0, w, h),
        }
    }

    /// Hit region for a horizontally centered label at `top`
    pub fn button(viewport: Viewport, top: f32, label_width: f32, label_height: f32) -> Aabb {
        Aabb::new(
            (viewport.width - label_width) / 2.0 - BUTTON_PADDING,
            top,
            label_width + 2.0 * BUTTON_PADDING,
            label_height + BUTTON_PADDING,
        )
    }
}

/// Apply one intent to the session
pub fn apply_intent(state: &mut GameState, intent: Intent) {
    match intent {
        Intent::Jump => {
            if state.mode == GameMode::Playing {
                try_jump(state);
            }
        }
        Intent::DuckStart => {
            if state.mode == GameMode::Playing {
                state.duck = DuckInput {
                    held: true,
                    since_ms: state.now_ms(),
                };
            }
        }
        Intent::DuckEnd => state.duck.held = false,
        Intent::TogglePause | Intent::Back | Intent::SwipeRight => state.toggle_pause(),
        Intent::PointerUpAt { x, y } => pointer_up(state, x, y),
    }
}

fn try_jump(state: &mut GameState) {
    let impulse = state.px(state.tuning.jump_impulse);
    if state.player.jump(impulse) {
        state.emit(GameEvent::Jumped);
    } else {
        log::trace!("Jump ignored ({:?})", state.player.pose());
    }
}

fn pointer_up(state: &mut GameState, x: f32, y: f32) {
    let layout = state.layout;
    match state.mode {
        GameMode::Menu => {
            if layout.start.contains(x, y) {
                state.start();
                state.emit(GameEvent::ButtonPressed);
            } else if layout.settings.contains(x, y) {
                state.emit(GameEvent::OpenSettings);
                state.emit(GameEvent::ButtonPressed);
            }
        }
        GameMode::Playing => {
            // A tap is a jump, and lifting the finger ends any duck hold
            try_jump(state);
            state.duck.held = false;
        }
        GameMode::GameOver => {
            if layout.restart.contains(x, y) {
                state.start();
                state.emit(GameEvent::ButtonPressed);
            }
        }
        GameMode::Paused => {
            if layout.resume.contains(x, y) {
                state.resume();
                state.emit(GameEvent::ButtonPressed);
            }
        }
    }
}
