//! Obstacle and cloud spawning policy

use glam::Vec2;
use rand::Rng;

use super::state::{
    Cloud, FLYING_ALTITUDES, GameState, GroundCatalog, Obstacle, ObstacleKind,
};
use crate::tuning::Tuning;

/// Cloud sprite size (design pixels)
pub const CLOUD_SIZE: (f32, f32) = (84.0, 101.0);
/// Clouds appear in the top 30% of the screen, below this margin
pub const CLOUD_TOP_MARGIN: f32 = 50.0;
const CLOUD_BAND: f32 = 0.3;

/// Run the per-tick spawn rolls
pub fn spawn_entities(state: &mut GameState) {
    let obstacle_rate = state.tuning.obstacle_spawn_rate;
    let cloud_rate = state.tuning.cloud_spawn_rate;
    if obstacle_gap_open(state) && roll(state, obstacle_rate) {
        spawn_obstacle(state);
    }
    if roll(state, cloud_rate) {
        spawn_cloud(state);
    }
}

fn roll(state: &mut GameState, chance: f64) -> bool {
    state.rng.random_bool(chance.clamp(0.0, 1.0))
}

/// Whether the newest obstacle has travelled far enough from the right edge.
/// The jitter is redrawn every tick.
pub fn obstacle_gap_open(state: &mut GameState) -> bool {
    let jitter = state.rng.random::<f32>();
    let min_distance = state.px(state.tuning.min_gap) + jitter * state.px(state.tuning.gap_jitter);
    match state.obstacles.last() {
        None => true,
        Some(last) => state.viewport.width - last.pos.x > min_distance,
    }
}

/// Pick an obstacle kind and visual variant
pub fn choose_obstacle_kind<R: Rng + ?Sized>(rng: &mut R, score: f64, tuning: &Tuning) -> ObstacleKind {
    let flying =
        score >= tuning.flying_min_score && rng.random_bool(tuning.flying_chance.clamp(0.0, 1.0));
    if flying {
        ObstacleKind::Flying {
            altitude: rng.random_range(0..FLYING_ALTITUDES.len()) as u8,
        }
    } else {
        let catalog = if rng.random_bool(0.5) {
            GroundCatalog::Large
        } else {
            GroundCatalog::Small
        };
        ObstacleKind::Ground {
            catalog,
            variant: rng.random_range(0..3u8),
        }
    }
}

/// Spawn an obstacle at the right screen edge
pub fn spawn_obstacle(state: &mut GameState) {
    let kind = choose_obstacle_kind(&mut state.rng, state.score, &state.tuning);
    let obstacle = Obstacle::spawn(
        kind,
        state.viewport.width,
        state.ground_y(),
        state.scale,
        state.px(state.tuning.foot_overlap),
    );
    log::debug!("Spawned {:?} at y={:.1}", kind, obstacle.pos.y);
    state.obstacles.push(obstacle);
}

pub fn spawn_cloud(state: &mut GameState) {
    let y = state.rng.random::<f32>() * (state.viewport.height * CLOUD_BAND)
        + state.px(CLOUD_TOP_MARGIN);
    let size = Vec2::new(CLOUD_SIZE.0, CLOUD_SIZE.1) * state.scale;
    state.clouds.push(Cloud {
        pos: Vec2::new(state.viewport.width, y),
        size,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{SessionConfig, Viewport};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state() -> GameState {
        let mut s = GameState::new(42, SessionConfig::new(Viewport::default(), 0.7), 0.0);
        s.start();
        s
    }

    #[test]
    fn test_no_flying_below_threshold() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..2000 {
            assert!(!choose_obstacle_kind(&mut rng, 499.9, &tuning).is_flying());
        }
    }

    #[test]
    fn test_flying_share_above_threshold() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let n = 4000;
        let flying = (0..n)
            .filter(|_| choose_obstacle_kind(&mut rng, 800.0, &tuning).is_flying())
            .count();
        let share = flying as f64 / n as f64;
        assert!((0.25..0.35).contains(&share), "flying share {share}");
    }

    #[test]
    fn test_catalog_variants_all_reachable() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            if let ObstacleKind::Ground { catalog, variant } =
                choose_obstacle_kind(&mut rng, 0.0, &tuning)
            {
                seen.insert((catalog == GroundCatalog::Large, variant));
            }
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_spawn_enters_at_right_edge() {
        let mut s = state();
        spawn_obstacle(&mut s);
        spawn_cloud(&mut s);
        assert_eq!(s.obstacles[0].pos.x, s.viewport.width);
        assert_eq!(s.clouds[0].pos.x, s.viewport.width);
        let cloud_y = s.clouds[0].pos.y;
        assert!(cloud_y >= s.px(CLOUD_TOP_MARGIN));
        assert!(cloud_y <= s.viewport.height * CLOUD_BAND + s.px(CLOUD_TOP_MARGIN));
    }

    #[test]
    fn test_gap_blocks_back_to_back_obstacles() {
        let mut s = state();
        assert!(obstacle_gap_open(&mut s));
        spawn_obstacle(&mut s);
        assert!(!obstacle_gap_open(&mut s));

        // Beyond base gap + full jitter the gap is always open
        let max_gap = s.px(s.tuning.min_gap + s.tuning.gap_jitter);
        s.obstacles[0].pos.x = s.viewport.width - max_gap - 1.0;
        assert!(obstacle_gap_open(&mut s));
    }

    #[test]
    fn test_spawner_never_violates_gap() {
        let mut s = state();
        s.tuning.obstacle_spawn_rate = 1.0;
        let min = s.px(s.tuning.min_gap);
        for _ in 0..500 {
            let before = s.obstacles.len();
            let prev_x = s.obstacles.last().map(|o| o.pos.x);
            spawn_entities(&mut s);
            if s.obstacles.len() > before {
                if let Some(x) = prev_x {
                    assert!(s.viewport.width - x > min);
                }
            }
            let speed = s.speed;
            for o in &mut s.obstacles {
                o.pos.x -= speed;
            }
        }
        assert!(s.obstacles.len() > 1);
    }
}
