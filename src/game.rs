//! Session driver
//!
//! Owns the simulation and its collaborators. Each step drains queued
//! intents, runs one tick, turns raised events into haptic, screen and
//! navigation requests, then hands a frame to the renderer. Rendering runs
//! in every mode so overlays keep responding while the simulation is frozen.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::consts::*;
use crate::persistence::{SaveData, Store};
use crate::platform::{FixedTicker, HapticPulse, Platform};
use crate::render::{Frame, Renderer};
use crate::settings::{SettingToggle, Settings};
use crate::sim::{GameEvent, GameMode, GameState, Intent, SessionConfig, Viewport, apply_intent, tick};
use crate::tuning::Tuning;

/// Cloneable handle for posting intents from input callbacks
#[derive(Debug, Clone)]
pub struct IntentSender(Sender<Intent>);

impl IntentSender {
    /// Queue an intent for the next step. Dropped if the game is gone.
    pub fn send(&self, intent: Intent) {
        if self.0.send(intent).is_err() {
            log::trace!("Intent {:?} dropped, session closed", intent);
        }
    }
}

pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    platform: Platform,
    renderer: Box<dyn Renderer>,
    store: Box<dyn Store>,
    intents_tx: Sender<Intent>,
    intents_rx: Receiver<Intent>,
    /// Ticks since the last keep-awake request
    awake_ticks: u32,
}

impl Game {
    /// Build a session from whatever the store holds
    pub fn new(
        seed: u64,
        viewport: Viewport,
        tuning: Tuning,
        store: Box<dyn Store>,
        platform: Platform,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        let save = SaveData::load(store.as_ref());
        let config = SessionConfig {
            viewport,
            scale: save.settings.scale.factor(),
            tuning,
        };
        let (intents_tx, intents_rx) = mpsc::channel();
        Self {
            state: GameState::new(seed, config, save.high_score.value()),
            settings: save.settings,
            platform,
            renderer,
            store,
            intents_tx,
            intents_rx,
            awake_ticks: 0,
        }
    }

    pub fn intents(&self) -> IntentSender {
        IntentSender(self.intents_tx.clone())
    }

    /// One fixed tick: input, simulation, side effects, render
    pub fn step(&mut self) {
        while let Ok(intent) = self.intents_rx.try_recv() {
            apply_intent(&mut self.state, intent);
        }

        tick(&mut self.state);

        for event in self.state.drain_events() {
            self.dispatch(event);
        }
        self.keep_awake();

        let frame = Frame::capture(&self.state, &self.settings);
        self.renderer.draw(&frame);
        if let Some(layout) = self.renderer.layout() {
            self.state.layout = layout;
        }
    }

    /// Step on the ticker's cadence until `done` says stop
    pub fn run(&mut self, ticker: &mut FixedTicker, mut done: impl FnMut(&GameState) -> bool) {
        log::debug!("Stepping every {:?}", ticker.period());
        while !done(&self.state) {
            ticker.wait();
            self.step();
        }
        if ticker.skipped > 0 {
            log::info!("{} ticks skipped after overruns", ticker.skipped);
        }
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Started => {
                self.awake_ticks = 0;
            }
            GameEvent::Jumped | GameEvent::ButtonPressed => self.vibrate(HapticPulse::TAP),
            GameEvent::GameOver { new_record } => {
                self.vibrate(if new_record {
                    HapticPulse::RECORD
                } else {
                    HapticPulse::SOFT
                });
                self.platform.screen.release();
            }
            GameEvent::OpenSettings => self.platform.navigator.open_settings(),
            GameEvent::Paused | GameEvent::Resumed => {}
        }
    }

    fn vibrate(&mut self, pulse: HapticPulse) {
        if self.settings.vibration {
            self.platform.haptics.pulse(pulse);
        }
    }

    fn keep_awake(&mut self) {
        if !matches!(self.state.mode, GameMode::Playing | GameMode::Paused) {
            return;
        }
        self.awake_ticks += 1;
        if self.awake_ticks >= KEEP_AWAKE_INTERVAL_TICKS {
            self.awake_ticks = 0;
            self.platform.screen.keep_awake(KEEP_AWAKE_DURATION);
        }
    }

    /// Settings-page action. The scale applies from the next start.
    pub fn toggle_setting(&mut self, toggle: SettingToggle) {
        if self.settings.apply(toggle) {
            self.platform.haptics.pulse(HapticPulse::TAP);
        }
        if toggle == SettingToggle::Scale {
            self.state.next_scale = self.settings.scale.factor();
        }
    }

    /// Leave the settings page
    pub fn close_settings(&mut self) {
        self.vibrate(HapticPulse::TAP);
        self.platform.navigator.back();
    }

    /// Current high score and settings
    pub fn save_data(&self) -> SaveData {
        SaveData {
            high_score: self.state.high_score,
            settings: self.settings.clone(),
        }
    }

    /// End the session: restore the screen timeout and write back, best effort
    pub fn teardown(mut self) -> SaveData {
        self.platform.screen.release();
        let data = self.save_data();
        if let Err(e) = data.save(self.store.as_mut()) {
            log::warn!("Failed to save game data: {}", e);
        }
        data
    }
}
