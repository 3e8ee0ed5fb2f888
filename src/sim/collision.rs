//! Axis-separated tile collision
//!
//! After an actor moves along one axis, scan the tiles under its box
//! row-major (rows top to bottom, columns left to right). The first solid
//! tile that lies ahead of the actor decides the whole correction for that
//! axis; nothing after it is visited. Goal tiles never block and are checked
//! against a narrow trigger column instead.

use glam::Vec2;

use super::actor::{ActorKind, Body, Rect};
use super::level::Level;
use super::particles::{ParticleBurst, ParticleColor, ParticleKind};
use super::state::{GameEvent, StepEffects};
use super::tile::TileKind;
use crate::consts::TILE_SIZE;
use crate::tuning::Tuning;

/// Keeps a box that ends exactly on a tile boundary out of the next tile
const EDGE_EPSILON: f32 = 0.01;

/// Rounding allowance when reconstructing the pre-move position
const AHEAD_SLACK: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Inclusive tile-index range covered by a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpan {
    pub first_row: i32,
    pub last_row: i32,
    pub first_col: i32,
    pub last_col: i32,
}

impl TileSpan {
    /// Tiles under `body`, its horizontal extent shrunk by `margin` per side
    pub fn under(body: &Body, margin: f32) -> Self {
        Self {
            first_row: (body.pos.y / TILE_SIZE).floor() as i32,
            last_row: ((body.bottom() - EDGE_EPSILON) / TILE_SIZE).floor() as i32,
            first_col: ((body.pos.x + margin) / TILE_SIZE).floor() as i32,
            last_col: ((body.pos.x + body.size.x - margin - EDGE_EPSILON) / TILE_SIZE).floor()
                as i32,
        }
    }
}

/// The region of a goal tile that actually triggers completion
pub fn goal_trigger(row: i32, col: i32, tuning: &Tuning) -> Rect {
    Rect::new(
        col as f32 * TILE_SIZE + tuning.goal_trigger_offset,
        row as f32 * TILE_SIZE,
        tuning.goal_trigger_width,
        TILE_SIZE,
    )
}

/// Resolve `body` against the level on one axis.
///
/// Returns true if a solid tile stopped the scan. On the y-axis a scan that
/// finds nothing clears `grounded`.
pub fn resolve_axis(
    body: &mut Body,
    kind: ActorKind,
    axis: Axis,
    level: &mut Level,
    tuning: &Tuning,
    fx: &mut StepEffects,
) -> bool {
    // The inset only applies while resolving vertical motion, so side
    // tiles grazed during a drop do not read as floor or ceiling.
    let margin = match axis {
        Axis::X => 0.0,
        Axis::Y => tuning.collision_margin,
    };
    let span = TileSpan::under(body, margin);

    for row in span.first_row..=span.last_row {
        for col in span.first_col..=span.last_col {
            let tile = level.tiles().get(row, col);

            if tile == TileKind::Goal {
                if kind == ActorKind::Player
                    && !body.dead
                    && body.rect().overlaps(&goal_trigger(row, col, tuning))
                {
                    fx.goal_reached = true;
                }
                continue;
            }
            if !tile.is_solid() || !is_ahead(body, axis, row, col) {
                continue;
            }

            match axis {
                Axis::X => push_out_x(body, kind, col),
                Axis::Y => push_out_y(body, kind, row, col, tile, level, tuning, fx),
            }
            return true;
        }
    }

    if axis == Axis::Y {
        body.grounded = false;
    }
    false
}

/// A tile counts only if the actor's leading face had not yet crossed the
/// tile's near face before this step's move. Any step up to one tile is
/// caught, and a tile left overlapping after sliding off a ledge never
/// shoves the actor forward.
fn is_ahead(body: &Body, axis: Axis, row: i32, col: i32) -> bool {
    let (vel, pos, size, index) = match axis {
        Axis::X => (body.vel.x, body.pos.x, body.size.x, col),
        Axis::Y => (body.vel.y, body.pos.y, body.size.y, row),
    };
    let before = pos - vel;
    let near_face = index as f32 * TILE_SIZE;
    let far_face = near_face + TILE_SIZE;
    if vel > 0.0 {
        before + size <= near_face + AHEAD_SLACK
    } else if vel < 0.0 {
        before >= far_face - AHEAD_SLACK
    } else {
        true
    }
}

fn push_out_x(body: &mut Body, kind: ActorKind, col: i32) {
    if body.vel.x > 0.0 {
        body.pos.x = col as f32 * TILE_SIZE - body.size.x;
    } else if body.vel.x < 0.0 {
        body.pos.x = (col + 1) as f32 * TILE_SIZE;
    } else {
        return;
    }

    match kind {
        ActorKind::Enemy => body.vel.x = -body.vel.x,
        ActorKind::Player | ActorKind::Collectible => body.vel.x = 0.0,
    }
}

#[allow(clippy::too_many_arguments)]
fn push_out_y(
    body: &mut Body,
    kind: ActorKind,
    row: i32,
    col: i32,
    tile: TileKind,
    level: &mut Level,
    tuning: &Tuning,
    fx: &mut StepEffects,
) {
    if body.vel.y > 0.0 {
        // Landed
        body.pos.y = row as f32 * TILE_SIZE - body.size.y;
        body.vel.y = 0.0;
        body.grounded = true;
    } else if body.vel.y < 0.0 {
        // Head hit
        body.pos.y = (row + 1) as f32 * TILE_SIZE;
        body.vel.y = 0.0;
        body.grounded = false;

        if kind == ActorKind::Player
            && !body.dead
            && tile == TileKind::QuestionBlock
            && level.tiles_mut().bump(row, col)
        {
            log::debug!("question block bumped at row {row}, col {col}");
            fx.events.push(GameEvent::BlockBumped { row, col });
            fx.score(tuning.block_score);
            fx.burst(
                ParticleBurst::new(
                    Vec2::new(col as f32 * TILE_SIZE + TILE_SIZE / 2.0, row as f32 * TILE_SIZE),
                    ParticleColor::Gold,
                    10,
                    ParticleKind::Sparkle,
                )
                .with_speed(2.0),
            );
        }
    }
}

/// The actor has dropped far enough below the level to be lost
pub fn fell_into_pit(body: &Body, level: &Level, tuning: &Tuning) -> bool {
    body.pos.y > level.pixel_height() + tuning.pit_margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{Enemy, Player};
    use crate::sim::level::{AsciiLevels, Theme};
    use proptest::prelude::*;

    fn level(map: &str) -> Level {
        let data = AsciiLevels::parse(map, Theme::default()).unwrap();
        Level::load(1, data).0
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y))
    }

    #[test]
    fn test_landing_on_ground() {
        // Ground row 2 starts at y = 80
        let mut level = level(
            "P...
             ....
             ####",
        );
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();
        let mut player = player_at(40.0, 80.0 - 36.0 + 5.0);
        player.body.vel.y = 6.0;

        let hit = resolve_axis(&mut player.body, ActorKind::Player, Axis::Y, &mut level, &tuning, &mut fx);
        assert!(hit);
        assert_eq!(player.body.pos.y, 44.0);
        assert_eq!(player.body.vel.y, 0.0);
        assert!(player.body.grounded);
    }

    #[test]
    fn test_grounded_clears_without_support() {
        let mut level = level("P...\n....\n....");
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();
        let mut player = player_at(40.0, 10.0);
        player.body.grounded = true;
        player.body.vel.y = 0.55;

        let hit = resolve_axis(&mut player.body, ActorKind::Player, Axis::Y, &mut level, &tuning, &mut fx);
        assert!(!hit);
        assert!(!player.body.grounded);
    }

    #[test]
    fn test_enemy_bounces_off_wall() {
        let mut level = level(
            "P.....
             B.....
             ######",
        );
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();
        // Enemy in row 1 moved 1px into the brick at col 0
        let mut enemy = Enemy::at_tile(1, 1);
        enemy.body.pos.x = 39.0;

        let hit = resolve_axis(&mut enemy.body, ActorKind::Enemy, Axis::X, &mut level, &tuning, &mut fx);
        assert!(hit);
        assert_eq!(enemy.body.pos.x, 40.0);
        assert_eq!(enemy.body.vel.x, 1.0);
    }

    #[test]
    fn test_player_stops_at_wall() {
        let mut level = level(
            "P...B.
             ......
             ######",
        );
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();
        let mut player = player_at(160.0 - 32.0 + 7.0, 2.0);
        player.body.vel.x = 7.0;

        resolve_axis(&mut player.body, ActorKind::Player, Axis::X, &mut level, &tuning, &mut fx);
        assert_eq!(player.body.pos.x, 128.0);
        assert_eq!(player.body.vel.x, 0.0);
    }

    #[test]
    fn test_question_block_is_used_once() {
        let mut level = level(
            ".?..
             ....
             P...
             ####",
        );
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();

        for _ in 0..2 {
            // Head pokes 5px into the block row
            let mut player = player_at(44.0, 35.0);
            player.body.vel.y = -10.0;
            let hit = resolve_axis(&mut player.body, ActorKind::Player, Axis::Y, &mut level, &tuning, &mut fx);
            assert!(hit);
            assert_eq!(player.body.pos.y, 40.0);
            assert_eq!(player.body.vel.y, 0.0);
        }

        assert_eq!(level.tiles().get(0, 1), TileKind::UsedBlock);
        assert_eq!(fx.score_gained(), 200);
        assert_eq!(
            fx.events.iter().filter(|e| matches!(e, GameEvent::BlockBumped { .. })).count(),
            1
        );
    }

    #[test]
    fn test_enemy_head_hit_does_not_bump() {
        let mut level = level(".?..\n....\nP...\n####");
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();
        let mut enemy = Enemy::at_tile(1, 1);
        enemy.body.pos.y = 35.0;
        enemy.body.vel.y = -6.0;
        let hit = resolve_axis(&mut enemy.body, ActorKind::Enemy, Axis::Y, &mut level, &tuning, &mut fx);
        assert!(hit);
        assert_eq!(enemy.body.pos.y, 40.0);
        assert_eq!(level.tiles().get(0, 1), TileKind::QuestionBlock);
        assert_eq!(fx.score_gained(), 0);
    }

    #[test]
    fn test_first_tile_in_scan_order_wins() {
        // Falling onto two different tiles at once: the left one (visited
        // first) decides, and scanning stops there.
        let mut level = level(
            "P...
             ....
             .?B.",
        );
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();
        let mut player = player_at(60.0, 50.0);
        player.body.vel.y = 8.0;
        resolve_axis(&mut player.body, ActorKind::Player, Axis::Y, &mut level, &tuning, &mut fx);
        assert_eq!(player.body.pos.y, 44.0);
        assert!(player.body.grounded);
        // Landing on a question block does not use it
        assert_eq!(level.tiles().get(2, 1), TileKind::QuestionBlock);
    }

    #[test]
    fn test_goal_trigger_column() {
        let mut level = level(
            "P.....
             ....G.
             ######",
        );
        let tuning = Tuning::default();

        // Inside the goal tile but left of the trigger column (x 178..182)
        let mut fx = StepEffects::default();
        let mut player = player_at(160.0 - 32.0 + 10.0, 44.0);
        player.body.vel.x = 1.0;
        let hit = resolve_axis(&mut player.body, ActorKind::Player, Axis::X, &mut level, &tuning, &mut fx);
        assert!(!hit);
        assert!(!fx.goal_reached);

        player.body.pos.x = 150.0;
        resolve_axis(&mut player.body, ActorKind::Player, Axis::X, &mut level, &tuning, &mut fx);
        assert!(fx.goal_reached);
        // Goal never blocks
        assert_eq!(player.body.pos.x, 150.0);

        // Enemies walk through goals without triggering anything
        let mut fx = StepEffects::default();
        let mut enemy = Enemy::at_tile(1, 4);
        resolve_axis(&mut enemy.body, ActorKind::Enemy, Axis::X, &mut level, &tuning, &mut fx);
        assert!(!fx.goal_reached);
    }

    #[test]
    fn test_ledge_overhang_does_not_teleport() {
        // Player slid off the right edge of a block, still 3px over it,
        // and keeps running right.
        let mut level = level(
            "P.....
             .B....
             ......
             ######",
        );
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();
        let mut player = player_at(80.0 - 3.0, 50.0);
        player.body.vel.x = 4.0;
        let x = player.body.pos.x;
        resolve_axis(&mut player.body, ActorKind::Player, Axis::X, &mut level, &tuning, &mut fx);
        assert_eq!(player.body.pos.x, x);
        assert_eq!(player.body.vel.x, 4.0);
    }

    #[test]
    fn test_vertical_pass_ignores_grazed_side_tiles() {
        // Brick to the left of the player's column; the player overlaps it
        // by less than the margin while falling.
        let mut level = level(
            "P.....
             B.....
             ......",
        );
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();
        let mut player = player_at(37.0, 30.0);
        player.body.vel.y = 5.0;
        let hit = resolve_axis(&mut player.body, ActorKind::Player, Axis::Y, &mut level, &tuning, &mut fx);
        assert!(!hit);
        assert_eq!(player.body.pos.y, 30.0);
    }

    #[test]
    fn test_out_of_bounds_is_empty() {
        let mut level = level("P.\n##");
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();
        let mut player = player_at(-500.0, -500.0);
        player.body.vel = Vec2::new(-3.0, -3.0);
        assert!(!resolve_axis(&mut player.body, ActorKind::Player, Axis::X, &mut level, &tuning, &mut fx));
        assert!(!resolve_axis(&mut player.body, ActorKind::Player, Axis::Y, &mut level, &tuning, &mut fx));
    }

    #[test]
    fn test_near_tile_sized_fall_lands() {
        // Feet at 79, one-tile floor at 80, falling 38px in one step
        let mut level = level(
            "P...
             ....
             ####
             ....",
        );
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();
        let mut player = player_at(40.0, 79.0 - 36.0 + 38.0);
        player.body.vel.y = 38.0;

        let hit = resolve_axis(&mut player.body, ActorKind::Player, Axis::Y, &mut level, &tuning, &mut fx);
        assert!(hit);
        assert_eq!(player.body.bottom(), 80.0);
        assert!(player.body.grounded);
    }

    #[test]
    fn test_near_tile_sized_run_stops_at_wall() {
        // Right edge at 119, brick at x = 120, moving 39px in one step
        let mut level = level(
            "P.....
             ...B..
             ######",
        );
        let tuning = Tuning::default();
        let mut fx = StepEffects::default();
        let mut player = player_at(119.0 - 32.0 + 39.0, 42.0);
        player.body.vel.x = 39.0;

        let hit = resolve_axis(&mut player.body, ActorKind::Player, Axis::X, &mut level, &tuning, &mut fx);
        assert!(hit);
        assert_eq!(player.body.pos.x + 32.0, 120.0);
        assert_eq!(player.body.vel.x, 0.0);
    }

    #[test]
    fn test_pit_line() {
        let level = level("P.\n..");
        let tuning = Tuning::default();
        let mut player = player_at(0.0, 80.0 + 200.0);
        assert!(!fell_into_pit(&player.body, &level, &tuning));
        player.body.pos.y += 0.5;
        assert!(fell_into_pit(&player.body, &level, &tuning));
    }

    fn actor(enemy: bool, pos: Vec2) -> (Body, ActorKind) {
        if enemy {
            (Body::new(pos, Vec2::splat(40.0)), ActorKind::Enemy)
        } else {
            (Body::new(pos, Vec2::new(32.0, 36.0)), ActorKind::Player)
        }
    }

    proptest! {
        #[test]
        fn steps_up_to_one_tile_never_pass_through_walls(
            enemy in any::<bool>(),
            rightward in any::<bool>(),
            step in 1.0f32..=40.0,
            gap_frac in 0.0f32..1.0,
        ) {
            // One-tile-thick wall in column 3 (x 120..160)
            let mut level = level(
                "P..B....
                 ...B....
                 ...B....
                 ...B....",
            );
            let tuning = Tuning::default();
            let mut fx = StepEffects::default();
            let gap = gap_frac * (step - 0.5);
            let (mut body, kind) = actor(enemy, Vec2::ZERO);
            body.pos.y = 40.0;
            if rightward {
                body.pos.x = 120.0 - gap - body.size.x + step;
                body.vel.x = step;
            } else {
                body.pos.x = 160.0 + gap - step;
                body.vel.x = -step;
            }

            let hit = resolve_axis(&mut body, kind, Axis::X, &mut level, &tuning, &mut fx);
            prop_assert!(hit);
            if rightward {
                prop_assert_eq!(body.pos.x + body.size.x, 120.0);
            } else {
                prop_assert_eq!(body.pos.x, 160.0);
            }
        }

        #[test]
        fn steps_up_to_one_tile_never_pass_through_floors(
            enemy in any::<bool>(),
            downward in any::<bool>(),
            step in 1.0f32..=40.0,
            gap_frac in 0.0f32..1.0,
        ) {
            // One-tile-thick slab in row 2 (y 80..120)
            let mut level = level(
                "P.......
                 ........
                 ########
                 ........",
            );
            let tuning = Tuning::default();
            let mut fx = StepEffects::default();
            let gap = gap_frac * (step - 0.5);
            let (mut body, kind) = actor(enemy, Vec2::new(100.0, 0.0));
            if downward {
                body.pos.y = 80.0 - gap - body.size.y + step;
                body.vel.y = step;
            } else {
                body.pos.y = 120.0 + gap - step;
                body.vel.y = -step;
            }

            let hit = resolve_axis(&mut body, kind, Axis::Y, &mut level, &tuning, &mut fx);
            prop_assert!(hit);
            if downward {
                prop_assert_eq!(body.bottom(), 80.0);
                prop_assert!(body.grounded);
            } else {
                prop_assert_eq!(body.pos.y, 120.0);
            }
        }
    }
}
