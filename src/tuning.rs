//! Data-driven game balance
//!
//! Every empirical constant the simulation consults lives here so hosts can
//! ship alternative feel presets as JSON without touching the core.
//! Velocities and accelerations are in pixels per step (one step per frame).

use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;

/// Physics, interaction and scoring constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player locomotion ===
    /// Downward acceleration applied to every free-falling actor each step
    pub gravity: f32,
    /// Multiplicative horizontal damping when no direction is held
    pub friction: f32,
    /// Horizontal acceleration while a direction is held
    pub move_accel: f32,
    /// Symmetric horizontal speed cap; at most one tile per step
    pub max_speed: f32,
    /// Below this speed (with no input) the player counts as idle
    pub idle_threshold: f32,
    /// Below this speed horizontal velocity snaps to exactly zero
    pub stop_threshold: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    /// Downward speed cap; at most one tile per step
    pub max_fall_speed: f32,

    // === Enemies ===
    /// Patrol velocity assigned to a grounded enemy that has stalled
    pub enemy_patrol_speed: f32,

    // === Collision ===
    /// Horizontal inset of the box scanned on the vertical pass
    pub collision_margin: f32,
    /// Goal trigger column offset from the goal tile's left edge
    pub goal_trigger_offset: f32,
    /// Goal trigger column width
    pub goal_trigger_width: f32,
    /// How far below the level bottom an actor must fall to be lost
    pub pit_margin: f32,

    // === Interactions ===
    /// Player bottom must be above this fraction of enemy height to stomp
    pub stomp_depth_ratio: f32,
    /// Upward velocity imparted by a stomp
    pub stomp_bounce: f32,
    /// Upward velocity imparted when the player dies
    pub death_hop: f32,
    /// Player hitbox inset on the left, right and top edges
    pub hitbox_inset: f32,
    /// Delay between player death and game over (simulated ms)
    pub game_over_delay_ms: f64,

    // === Scoring ===
    pub coin_score: u32,
    pub stomp_score: u32,
    pub block_score: u32,

    // === Camera ===
    /// Fraction of the viewport kept to the left of the player
    pub camera_lead: f32,
    /// Exponential smoothing factor toward the target offset
    pub camera_smoothing: f32,

    // === Particles (cosmetic) ===
    pub particle_gravity: f32,
    pub particle_decay: f32,
    pub particle_shrink: f32,
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.55,
            friction: 0.82,
            move_accel: 0.6,
            max_speed: 7.5,
            idle_threshold: 0.2,
            stop_threshold: 0.1,
            jump_impulse: -13.5,
            max_fall_speed: 30.0,

            enemy_patrol_speed: -1.0,

            collision_margin: 4.0,
            goal_trigger_offset: 18.0,
            goal_trigger_width: 4.0,
            pit_margin: 200.0,

            stomp_depth_ratio: 0.8,
            stomp_bounce: -7.0,
            death_hop: -12.0,
            hitbox_inset: 6.0,
            game_over_delay_ms: 2000.0,

            coin_score: 100,
            stomp_score: 200,
            block_score: 200,

            camera_lead: 1.0 / 3.0,
            camera_smoothing: 0.1,

            particle_gravity: 0.2,
            particle_decay: 0.05,
            particle_shrink: 0.95,
            max_particles: 512,
        }
    }
}

impl Tuning {
    /// Parse a tuning preset; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        for (name, speed) in tuning.over_tile_speeds() {
            log::warn!("{name} {speed} moves more than one tile per step; actors may pass through walls");
        }
        Ok(tuning)
    }

    /// Speeds that can carry an actor further than one tile in a single
    /// step, where tile collision no longer catches every wall
    pub fn over_tile_speeds(&self) -> Vec<(&'static str, f32)> {
        [
            ("max_fall_speed", self.max_fall_speed),
            ("max_speed", self.max_speed),
            ("jump_impulse", self.jump_impulse.abs()),
            ("stomp_bounce", self.stomp_bounce.abs()),
            ("death_hop", self.death_hop.abs()),
        ]
        .into_iter()
        .filter(|&(_, speed)| speed > TILE_SIZE)
        .collect()
    }

    /// Serialize to pretty JSON (for writing out a preset)
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_speed": 9.0, "coin_score": 50 }"#).unwrap();
        assert_eq!(tuning.max_speed, 9.0);
        assert_eq!(tuning.coin_score, 50);
        assert_eq!(tuning.gravity, Tuning::default().gravity);
        assert_eq!(tuning.stomp_depth_ratio, 0.8);
    }

    #[test]
    fn test_json_preset_survives_write_and_read() {
        let mut tuning = Tuning::default();
        tuning.friction = 0.5;
        let parsed = Tuning::from_json(&tuning.to_json()).unwrap();
        assert_eq!(parsed, tuning);
    }

    #[test]
    fn test_speeds_checked_against_one_tile() {
        assert!(Tuning::default().over_tile_speeds().is_empty());

        let tuning =
            Tuning::from_json(r#"{ "max_fall_speed": 40.0, "max_speed": 41.0, "jump_impulse": -45.0 }"#)
                .unwrap();
        let names: Vec<_> = tuning.over_tile_speeds().into_iter().map(|(n, _)| n).collect();
        // Exactly one tile per step is still caught
        assert_eq!(names, vec!["max_speed", "jump_impulse"]);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json("{ max_speed: }").is_err());
    }
}
