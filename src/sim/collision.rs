//! Hitbox shaping and the per-tick collision sweep
//!
//! Collision boxes are shrunk from the sprite boxes so that near misses and
//! corner grazes do not end the run.

use super::aabb::{Aabb, overlaps};
use super::state::{Obstacle, ObstacleKind, Player};
use crate::tuning::HitboxTuning;

/// Player collision box (standing or ducking)
pub fn player_hitbox(player: &Player, insets: &HitboxTuning, scale: f32) -> Aabb {
    player.visual_box().inset(
        insets.player_left * scale,
        0.0,
        insets.player_width * scale,
        insets.player_height * scale,
    )
}

/// Obstacle collision box: ground obstacles shrink horizontally, flyers on every side
pub fn obstacle_hitbox(obstacle: &Obstacle, insets: &HitboxTuning, scale: f32) -> Aabb {
    let visual = obstacle.visual_box();
    match obstacle.kind {
        ObstacleKind::Ground { .. } => visual.inset(
            insets.ground_left * scale,
            0.0,
            insets.ground_width * scale,
            0.0,
        ),
        ObstacleKind::Flying { .. } => {
            let edge = insets.flying_edge * scale;
            visual.inset(edge, edge, 2.0 * edge, 2.0 * edge)
        }
    }
}

/// Index of the first obstacle touching the player, if any
pub fn first_collision(
    player: &Player,
    obstacles: &[Obstacle],
    insets: &HitboxTuning,
    scale: f32,
) -> Option<usize> {
    let player_box = player_hitbox(player, insets, scale);
    obstacles
        .iter()
        .position(|o| overlaps(&player_box, &obstacle_hitbox(o, insets, scale)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{BodyPresets, GroundCatalog};
    use crate::tuning::Tuning;
    use glam::Vec2;

    const GROUND: f32 = 400.0;

    fn player() -> Player {
        Player::new(80.0, GROUND, BodyPresets::from_tuning(&Tuning::default(), 1.0))
    }

    fn cactus(x: f32) -> Obstacle {
        Obstacle::spawn(
            ObstacleKind::Ground {
                catalog: GroundCatalog::Small,
                variant: 0,
            },
            x,
            GROUND,
            1.0,
            3.0,
        )
    }

    #[test]
    fn test_player_hitbox_insets() {
        let insets = HitboxTuning::default();
        let p = player();
        let b = player_hitbox(&p, &insets, 1.0);
        assert_eq!(b, Aabb::new(95.0, GROUND - 94.0 + 3.0, 58.0, 84.0));

        let mut ducking = player();
        ducking.update_duck(Some(1000.0), 200.0);
        let b = player_hitbox(&ducking, &insets, 1.0);
        assert_eq!(b, Aabb::new(95.0, GROUND - 60.0 + 3.0, 88.0, 50.0));
    }

    #[test]
    fn test_obstacle_hitbox_insets() {
        let insets = HitboxTuning::default();
        let c = cactus(200.0);
        assert_eq!(
            obstacle_hitbox(&c, &insets, 1.0),
            Aabb::new(210.0, c.pos.y, 20.0, 71.0)
        );
        let bird = Obstacle {
            kind: ObstacleKind::Flying { altitude: 0 },
            pos: Vec2::new(100.0, 100.0),
            size: Vec2::new(93.0, 62.0),
        };
        assert_eq!(
            obstacle_hitbox(&bird, &insets, 1.0),
            Aabb::new(105.0, 105.0, 83.0, 52.0)
        );
    }

    #[test]
    fn test_graze_is_forgiven() {
        let insets = HitboxTuning::default();
        let p = player();
        // Sprites overlap by a few pixels, hitboxes do not
        let c = cactus(p.visual_box().right() - 5.0);
        assert!(overlaps(&p.visual_box(), &c.visual_box()));
        assert_eq!(first_collision(&p, &[c], &insets, 1.0), None);
    }

    #[test]
    fn test_head_on_hit() {
        let insets = HitboxTuning::default();
        let p = player();
        let obstacles = [cactus(400.0), cactus(100.0)];
        assert_eq!(first_collision(&p, &obstacles, &insets, 1.0), Some(1));
    }

    #[test]
    fn test_duck_under_high_flyer() {
        let insets = HitboxTuning::default();
        let bird = Obstacle::spawn(ObstacleKind::Flying { altitude: 3 }, 90.0, GROUND, 1.0, 3.0);
        let standing = player();
        assert!(first_collision(&standing, std::slice::from_ref(&bird), &insets, 1.0).is_some());
        let mut ducking = player();
        ducking.update_duck(Some(1000.0), 200.0);
        assert_eq!(first_collision(&ducking, &[bird], &insets, 1.0), None);
    }
}
