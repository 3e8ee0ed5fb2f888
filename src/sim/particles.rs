//! Cosmetic particles
//!
//! Bursts are requested through [`GameEvent::ParticleBurst`](super::GameEvent)
//! and spawned here at the end of the step. Nothing in the gameplay path
//! reads particle state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Color tag; the renderer maps it to a palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    White,
    /// Semi-transparent white (running dust)
    Haze,
    Grey,
    Gold,
    Brown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Dust,
    Sparkle,
}

/// A request to spawn particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub pos: Vec2,
    pub color: ParticleColor,
    pub count: u32,
    pub kind: ParticleKind,
    /// Spread multiplier for the initial velocity
    pub speed: f32,
    /// Probability that each particle in the burst actually spawns
    pub chance: f32,
}

impl ParticleBurst {
    pub fn new(pos: Vec2, color: ParticleColor, count: u32, kind: ParticleKind) -> Self {
        Self {
            pos,
            color,
            count,
            kind,
            speed: 1.0,
            chance: 1.0,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_chance(mut self, chance: f32) -> Self {
        self.chance = chance;
        self
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    pub life: f32, // 1 at spawn, removed at <= 0
    pub size: f32,
}

/// Owns all live particles and the seeded RNG that scatters them
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn a burst, respecting the particle cap
    pub fn emit(&mut self, burst: &ParticleBurst, max_particles: usize) {
        for _ in 0..burst.count {
            if self.particles.len() >= max_particles {
                break;
            }
            if burst.chance < 1.0 && self.rng.random::<f32>() >= burst.chance {
                continue;
            }
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 3.0 * burst.speed,
                (self.rng.random::<f32>() - 1.0) * 3.0 * burst.speed,
            );
            let size = match burst.kind {
                ParticleKind::Sparkle => 5.0,
                ParticleKind::Dust => self.rng.random::<f32>() * 4.0 + 2.0,
            };
            self.particles.push(Particle {
                pos: burst.pos,
                vel,
                color: burst.color,
                life: 1.0,
                size,
            });
        }
    }

    /// Advance every particle one step and drop expired ones
    pub fn advance(&mut self, tuning: &Tuning) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += tuning.particle_gravity;
            p.life -= tuning.particle_decay;
            p.size *= tuning.particle_shrink;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(0)
    }
}
