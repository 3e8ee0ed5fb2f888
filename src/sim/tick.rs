//! Per-frame simulation step
//!
//! One call advances the world by exactly one physics step. Phase order is
//! fixed: death timer, player, goal, enemies, interactions, camera, then
//! score/death bookkeeping and particles.

use serde::{Deserialize, Serialize};

use super::actor::{ActorKind, Entity};
use super::collision::fell_into_pit;
use super::interaction::resolve_interactions;
use super::level::LevelProvider;
use super::particles::{ParticleBurst, ParticleColor, ParticleKind};
use super::physics::{integrate_enemy, integrate_player, move_and_collide};
use super::state::{GameEvent, GamePhase, GameState, StepEffects};

/// Host intents for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

/// Advance the game by one step.
///
/// `dt_ms` is the host's elapsed frame time; it drives the simulation clock
/// (death timer, animation timer) while physics advances one fixed step.
/// Outside of `Playing` this only clears the previous step's events.
pub fn tick<P: LevelProvider + ?Sized>(
    state: &mut GameState,
    provider: &P,
    input: &TickInput,
    dt_ms: f32,
) {
    state.events.clear();
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt_ms = dt_ms.max(0.0);
    state.clock_ms += f64::from(dt_ms);
    state.time_ticks += 1;

    if state.game_over_at.is_some_and(|at| state.clock_ms >= at) {
        state.game_over_at = None;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!("game over on level {} with score {}", state.level_index, state.score);
        return;
    }

    let Some(level) = state.level.as_mut() else {
        log::warn!("playing phase without a loaded level");
        return;
    };
    let tuning = &state.tuning;
    let mut fx = StepEffects::default();

    // Player
    let player = &mut state.player;
    player.anim_timer += dt_ms;
    let was_grounded = player.body.grounded;
    integrate_player(player, input, tuning, &mut fx);
    move_and_collide(&mut player.body, ActorKind::Player, level, tuning, &mut fx);
    if player.body.grounded && !was_grounded {
        fx.burst(
            ParticleBurst::new(player.body.feet(), ParticleColor::White, 3, ParticleKind::Dust)
                .with_speed(0.5),
        );
    }
    if fell_into_pit(&player.body, level, tuning) {
        fx.player_hit = true;
    }

    if fx.goal_reached {
        state.score = state.score.saturating_add(fx.score_gained());
        state.events.extend(fx.events);
        state.complete_level(provider);
        return;
    }

    // Enemies
    for entity in state.entities.iter_mut() {
        let Entity::Enemy(enemy) = entity else {
            continue;
        };
        if enemy.body.dead {
            continue;
        }
        integrate_enemy(enemy, tuning);
        move_and_collide(&mut enemy.body, ActorKind::Enemy, level, tuning, &mut fx);
        if fell_into_pit(&enemy.body, level, tuning) {
            enemy.body.dead = true;
        }
    }

    resolve_interactions(&mut state.player, &mut state.entities, tuning, &mut fx);
    state.entities.retain(|e| !e.is_dead());

    state
        .camera
        .follow(state.player.body.pos.x, level.pixel_width(), tuning);

    state.score = state.score.saturating_add(fx.score_gained());
    let player_hit = fx.player_hit;
    state.events.extend(fx.events);
    if player_hit {
        state.kill_player();
    }

    for event in &state.events {
        if let GameEvent::ParticleBurst(burst) = event {
            state.particles.emit(burst, state.tuning.max_particles);
        }
    }
    state.particles.advance(&state.tuning);
}
