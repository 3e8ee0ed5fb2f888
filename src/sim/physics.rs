//! Input and gravity integration
//!
//! Turns the host's intents plus gravity into velocity changes, then moves
//! each actor one axis at a time, resolving tiles after each axis.

use glam::Vec2;

use super::actor::{ActorKind, Body, Enemy, Facing, Locomotion, Player};
use super::collision::{Axis, resolve_axis};
use super::level::Level;
use super::particles::{ParticleBurst, ParticleColor, ParticleKind};
use super::state::StepEffects;
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Chance per step of kicking up dust while running or skidding
const RUN_DUST_CHANCE: f32 = 0.2;
const SKID_DUST_CHANCE: f32 = 0.3;

/// Apply input, friction, jump and gravity to the player.
///
/// A dead player receives no input: friction and gravity still apply so the
/// death hop plays out.
pub fn integrate_player(player: &mut Player, input: &TickInput, tuning: &Tuning, fx: &mut StepEffects) {
    let input = if player.body.dead {
        TickInput::default()
    } else {
        *input
    };
    let body = &mut player.body;

    if input.move_right {
        body.vel.x += tuning.move_accel;
        player.facing = Facing::Right;
        if body.vel.x < 0.0 && body.grounded {
            player.locomotion = Locomotion::Skid;
            fx.burst(skid_dust(body));
        } else {
            player.locomotion = Locomotion::Run;
            if body.grounded {
                fx.burst(run_dust(Vec2::new(body.pos.x, body.bottom())));
            }
        }
    } else if input.move_left {
        body.vel.x -= tuning.move_accel;
        player.facing = Facing::Left;
        if body.vel.x > 0.0 && body.grounded {
            player.locomotion = Locomotion::Skid;
            fx.burst(skid_dust(body));
        } else {
            player.locomotion = Locomotion::Run;
            if body.grounded {
                fx.burst(run_dust(Vec2::new(body.pos.x + body.size.x, body.bottom())));
            }
        }
    } else {
        body.vel.x *= tuning.friction;
        player.locomotion = if body.vel.x.abs() < tuning.idle_threshold {
            Locomotion::Idle
        } else {
            Locomotion::Run
        };
    }

    body.vel.x = body.vel.x.clamp(-tuning.max_speed, tuning.max_speed);
    if body.vel.x.abs() < tuning.stop_threshold {
        body.vel.x = 0.0;
    }

    // Single jump from the ground only
    if input.jump && body.grounded {
        body.vel.y = tuning.jump_impulse;
        body.grounded = false;
        fx.burst(ParticleBurst::new(
            body.feet(),
            ParticleColor::White,
            5,
            ParticleKind::Dust,
        ));
    }
    if !body.grounded {
        player.locomotion = if body.vel.y > 0.0 {
            Locomotion::Fall
        } else {
            Locomotion::Jump
        };
    }

    apply_gravity(body, tuning);
}

/// Patrol restart and gravity for an enemy
pub fn integrate_enemy(enemy: &mut Enemy, tuning: &Tuning) {
    let body = &mut enemy.body;
    if body.grounded && body.vel.x == 0.0 {
        body.vel.x = tuning.enemy_patrol_speed;
    }
    apply_gravity(body, tuning);
}

/// Constant downward acceleration, every step, grounded or not
pub fn apply_gravity(body: &mut Body, tuning: &Tuning) {
    body.vel.y = (body.vel.y + tuning.gravity).min(tuning.max_fall_speed);
}

/// Move along x and resolve, then along y and resolve
pub fn move_and_collide(
    body: &mut Body,
    kind: ActorKind,
    level: &mut Level,
    tuning: &Tuning,
    fx: &mut StepEffects,
) {
    body.pos.x += body.vel.x;
    resolve_axis(body, kind, Axis::X, level, tuning, fx);
    body.pos.y += body.vel.y;
    resolve_axis(body, kind, Axis::Y, level, tuning, fx);
}

fn run_dust(pos: Vec2) -> ParticleBurst {
    ParticleBurst::new(pos, ParticleColor::Haze, 1, ParticleKind::Dust).with_chance(RUN_DUST_CHANCE)
}

fn skid_dust(body: &Body) -> ParticleBurst {
    ParticleBurst::new(body.feet(), ParticleColor::Grey, 1, ParticleKind::Dust)
        .with_chance(SKID_DUST_CHANCE)
}
