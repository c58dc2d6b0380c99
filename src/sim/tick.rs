//! Fixed timestep simulation tick
//!
//! Order within a playing tick: player, scrolling entities, difficulty,
//! spawner, collision. Other modes only advance the clock.

use super::collision::first_collision;
use super::state::{GameMode, GameState};
use super::{difficulty, spawn};
use crate::consts::*;

/// Advance the session by one tick
pub fn tick(state: &mut GameState) {
    state.time_ticks += 1;

    if state.mode != GameMode::Playing {
        return;
    }

    update_player(state);
    scroll_entities(state);
    difficulty::advance(state);
    spawn::spawn_entities(state);

    if first_collision(&state.player, &state.obstacles, &state.tuning.hitbox, state.scale).is_some() {
        state.game_over();
    }
}

fn update_player(state: &mut GameState) {
    let held_ms = state
        .duck
        .held
        .then(|| state.now_ms() - state.duck.since_ms);
    let gravity = state.px(state.tuning.gravity);
    let ground_y = state.ground_y();

    let player = &mut state.player;
    player.update_duck(held_ms, state.tuning.duck_delay_ms);
    player.integrate(gravity, ground_y);
    player.animate();

    if !player.dead {
        state.wing_phase = (state.wing_phase + WING_ANIM_RATE) % 2.0;
    }
}

/// Move obstacles, clouds and the ground track left; drop what has left the screen
fn scroll_entities(state: &mut GameState) {
    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }
    state.obstacles.retain(|o| !o.is_off_screen());

    let cloud_speed = speed * state.tuning.cloud_parallax;
    for cloud in &mut state.clouds {
        cloud.pos.x -= cloud_speed;
    }
    state.clouds.retain(|c| !c.is_off_screen());

    let tile = state.px(state.tuning.track_tile_width);
    if tile > 0.0 {
        state.ground_offset = (state.ground_offset + speed) % tile;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::{Intent, apply_intent};
    use crate::sim::state::{GroundCatalog, Obstacle, ObstacleKind, Pose, SessionConfig, Viewport};
    use proptest::prelude::*;

    fn playing(seed: u64) -> GameState {
        let mut s = GameState::new(seed, SessionConfig::new(Viewport::default(), 0.7), 0.0);
        s.start();
        s.drain_events();
        s
    }

    /// Session where nothing ever spawns
    fn empty_track(seed: u64) -> GameState {
        let mut s = playing(seed);
        s.tuning.obstacle_spawn_rate = 0.0;
        s.tuning.cloud_spawn_rate = 0.0;
        s
    }

    fn cactus_at(s: &GameState, x: f32) -> Obstacle {
        Obstacle::spawn(
            ObstacleKind::Ground {
                catalog: GroundCatalog::Large,
                variant: 0,
            },
            x,
            s.ground_y(),
            s.scale,
            s.px(s.tuning.foot_overlap),
        )
    }

    #[test]
    fn test_menu_does_not_simulate() {
        let mut s = GameState::new(1, SessionConfig::default(), 0.0);
        tick(&mut s);
        assert_eq!(s.time_ticks, 1);
        assert_eq!(s.score, 0.0);
        assert_eq!(s.mode, GameMode::Menu);
    }

    #[test]
    fn test_jump_rises_next_tick() {
        let mut s = empty_track(2);
        let ground = s.ground_y();
        apply_intent(&mut s, Intent::Jump);
        assert_eq!(s.player.vel_y, s.px(s.tuning.jump_impulse));
        assert_eq!(s.player.pose(), Pose::Airborne);
        tick(&mut s);
        assert!(s.player.pos.y < ground);
    }

    #[test]
    fn test_long_clean_run() {
        let mut s = empty_track(3);
        for _ in 0..1000 {
            tick(&mut s);
        }
        assert_eq!(s.mode, GameMode::Playing);
        assert!((s.score - 1000.0 * s.tuning.score_per_tick).abs() < 1e-6);
    }

    #[test]
    fn test_collision_ends_run_same_tick() {
        let mut s = empty_track(4);
        for _ in 0..10 {
            tick(&mut s);
        }
        let obstacle = cactus_at(&s, s.player.pos.x + s.speed);
        s.obstacles.push(obstacle);
        tick(&mut s);
        assert_eq!(s.mode, GameMode::GameOver);
        assert!(s.player.dead);

        let score = s.score;
        for _ in 0..50 {
            tick(&mut s);
        }
        assert_eq!(s.score, score);
    }

    #[test]
    fn test_death_freezes_physics() {
        let mut s = empty_track(5);
        apply_intent(&mut s, Intent::Jump);
        for _ in 0..5 {
            tick(&mut s);
        }
        s.game_over();
        let y = s.player.pos.y;
        for _ in 0..30 {
            tick(&mut s);
            assert_eq!(s.player.vel_y, 0.0);
            assert_eq!(s.player.pos.y, y);
        }
    }

    #[test]
    fn test_restart_clears_session() {
        let mut s = empty_track(6);
        s.score = 50.0;
        s.obstacles.push(cactus_at(&s, s.player.pos.x));
        tick(&mut s);
        assert_eq!(s.mode, GameMode::GameOver);
        assert!(s.high_score.value() >= 50.0);

        s.start();
        assert_eq!(s.score, 0.0);
        assert!(s.high_score.value() >= 50.0);
        assert!(s.obstacles.is_empty());
        assert!(s.clouds.is_empty());
        assert_eq!(s.speed, s.px(s.tuning.base_speed));
        assert_eq!(s.player.pose(), Pose::Standing);
    }

    #[test]
    fn test_pause_freezes_entities() {
        let mut s = playing(7);
        s.tuning.obstacle_spawn_rate = 1.0;
        s.tuning.cloud_spawn_rate = 1.0;
        for _ in 0..3 {
            tick(&mut s);
        }
        apply_intent(&mut s, Intent::TogglePause);
        assert_eq!(s.mode, GameMode::Paused);
        let obstacles: Vec<_> = s.obstacles.iter().map(|o| o.pos).collect();
        let clouds: Vec<_> = s.clouds.iter().map(|c| c.pos).collect();
        let score = s.score;
        for _ in 0..100 {
            tick(&mut s);
        }
        apply_intent(&mut s, Intent::TogglePause);
        assert_eq!(s.mode, GameMode::Playing);
        assert_eq!(s.obstacles.iter().map(|o| o.pos).collect::<Vec<_>>(), obstacles);
        assert_eq!(s.clouds.iter().map(|c| c.pos).collect::<Vec<_>>(), clouds);
        assert_eq!(s.score, score);
    }

    #[test]
    fn test_duck_after_delay() {
        let mut s = empty_track(8);
        apply_intent(&mut s, Intent::DuckStart);
        // 200 ms at 60 Hz is 12 ticks
        for _ in 0..11 {
            tick(&mut s);
            assert!(!s.player.ducking);
        }
        tick(&mut s);
        assert!(s.player.ducking);
        apply_intent(&mut s, Intent::DuckEnd);
        tick(&mut s);
        assert_eq!(s.player.pose(), Pose::Standing);
    }

    #[test]
    fn test_ground_offset_wraps() {
        let mut s = empty_track(9);
        let tile = s.px(s.tuning.track_tile_width);
        for _ in 0..1000 {
            tick(&mut s);
            assert!(s.ground_offset >= 0.0 && s.ground_offset < tile);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(99999);
        let mut b = playing(99999);
        for i in 0..600 {
            if i % 40 == 0 {
                apply_intent(&mut a, Intent::Jump);
                apply_intent(&mut b, Intent::Jump);
            }
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a.mode, b.mode);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.clouds.len(), b.clouds.len());
        assert_eq!(a.score, b.score);
    }

    proptest! {
        #[test]
        fn obstacles_scroll_by_speed(seed in 0u64..1000, ticks in 1usize..200) {
            let mut s = empty_track(seed);
            // Far above the player so it never collides
            let mut obstacle = cactus_at(&s, s.viewport.width);
            obstacle.pos.y = -1000.0;
            let width = obstacle.size.x;
            s.obstacles.push(obstacle);
            let mut prev_x = s.viewport.width;
            for _ in 0..ticks {
                let speed = s.speed;
                tick(&mut s);
                match s.obstacles.first() {
                    Some(o) => {
                        prop_assert!((o.pos.x - (prev_x - speed)).abs() < 1e-3);
                        prop_assert!(o.pos.x + o.size.x >= 0.0);
                        prev_x = o.pos.x;
                    }
                    None => {
                        prop_assert!(prev_x - speed + width < 0.0);
                        break;
                    }
                }
            }
        }
    }
}
