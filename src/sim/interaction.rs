//! Player versus entity contact
//!
//! Every live entity is tested exactly once per step against an inset player
//! hitbox. Classification reads the player's motion as it was when the phase
//! began, so the outcome for one entity never depends on another.

use super::actor::{Body, Entity, Player, Rect};
use super::particles::{ParticleBurst, ParticleColor, ParticleKind};
use super::state::StepEffects;
use crate::tuning::Tuning;

/// Outcome of touching an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Player lands on top; the enemy dies
    Stomp,
    /// Anything else; the player dies
    Lethal,
}

/// The player's hurtbox: inset on the left, right and top, flush at the feet
pub fn player_hitbox(body: &Body, tuning: &Tuning) -> Rect {
    let inset = tuning.hitbox_inset;
    Rect::new(
        body.pos.x + inset,
        body.pos.y + inset,
        body.size.x - 2.0 * inset,
        body.size.y - inset,
    )
}

/// Stomp iff the player is moving down and its feet are above
/// `stomp_depth_ratio` of the enemy's height.
pub fn classify_contact(player_vy: f32, player_bottom: f32, enemy: &Body, tuning: &Tuning) -> Contact {
    if player_vy > 0.0 && player_bottom < enemy.pos.y + enemy.size.y * tuning.stomp_depth_ratio {
        Contact::Stomp
    } else {
        Contact::Lethal
    }
}

/// Resolve the player against every live entity.
///
/// Collectibles and stomped enemies are marked dead here; lethal contact is
/// reported through `fx.player_hit` for the caller to act on.
pub fn resolve_interactions(
    player: &mut Player,
    entities: &mut [Entity],
    tuning: &Tuning,
    fx: &mut StepEffects,
) {
    if player.body.dead {
        return;
    }

    let hitbox = player_hitbox(&player.body, tuning);
    let vy = player.body.vel.y;
    let bottom = player.body.bottom();
    let mut stomped = false;

    for entity in entities.iter_mut() {
        if entity.is_dead() || !hitbox.touches(&entity.body().rect()) {
            continue;
        }

        match entity {
            Entity::Collectible(coin) => {
                coin.body.dead = true;
                fx.score(tuning.coin_score);
                fx.burst(
                    ParticleBurst::new(coin.body.center(), ParticleColor::Gold, 5, ParticleKind::Sparkle)
                        .with_speed(2.0),
                );
                log::debug!("coin collected at ({:.0}, {:.0})", coin.body.pos.x, coin.body.pos.y);
            }
            Entity::Enemy(enemy) => match classify_contact(vy, bottom, &enemy.body, tuning) {
                Contact::Stomp => {
                    enemy.body.dead = true;
                    stomped = true;
                    fx.score(tuning.stomp_score);
                    fx.burst(ParticleBurst::new(
                        enemy.body.center(),
                        ParticleColor::Brown,
                        8,
                        ParticleKind::Dust,
                    ));
                    log::debug!("enemy stomped at ({:.0}, {:.0})", enemy.body.pos.x, enemy.body.pos.y);
                }
                Contact::Lethal => fx.player_hit = true,
            },
        }
    }

    if stomped {
        player.body.vel.y = tuning.stomp_bounce;
    }
}
