//! Game state and core simulation types
//!
//! `GameState` is the whole simulation context for one session: the loaded
//! level, the player, the entity store, camera, particles, score and the
//! pending game-over timer. Phase functions borrow the pieces they need.

use serde::{Deserialize, Serialize};

use super::actor::{Entity, Player};
use super::backdrop::Decoration;
use super::camera::Camera;
use super::level::{Level, Theme};
use super::particles::{Particle, ParticleBurst, ParticleSystem};
use super::tile::TileGrid;
use crate::tuning::Tuning;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing loaded yet
    Menu,
    /// Active gameplay; the only phase in which the world steps
    Playing,
    /// Player death timer fired
    GameOver,
    /// Goal reached; resolved within the same step
    Victory,
    /// Last level completed
    GameWon,
}

/// Something the host may want to react to (HUD, audio, effects)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreGained { amount: u32 },
    ParticleBurst(ParticleBurst),
    BlockBumped { row: i32, col: i32 },
    PlayerDied,
    LevelLoaded { level: u32 },
    LevelCompleted { level: u32 },
    GameOver,
    GameWon,
}

/// Side effects collected by the resolvers during one step
#[derive(Debug, Default)]
pub struct StepEffects {
    pub events: Vec<GameEvent>,
    /// The player touched a goal trigger
    pub goal_reached: bool,
    /// Lethal enemy contact or a fall into a pit
    pub player_hit: bool,
}

impl StepEffects {
    pub fn score(&mut self, amount: u32) {
        self.events.push(GameEvent::ScoreGained { amount });
    }

    pub fn burst(&mut self, burst: ParticleBurst) {
        self.events.push(GameEvent::ParticleBurst(burst));
    }

    /// Total score awarded so far this step
    pub fn score_gained(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                GameEvent::ScoreGained { amount } => *amount,
                _ => 0,
            })
            .sum()
    }

    pub fn bursts(&self) -> impl Iterator<Item = &ParticleBurst> {
        self.events.iter().filter_map(|e| match e {
            GameEvent::ParticleBurst(b) => Some(b),
            _ => None,
        })
    }
}

/// Complete simulation context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed for cosmetic randomness (particles, backdrop)
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Current level, 1-based
    pub level_index: u32,
    pub level: Option<Level>,
    pub player: Player,
    /// Enemies and collectibles; dead ones are dropped at the end of a step
    pub entities: Vec<Entity>,
    pub camera: Camera,
    pub backdrop: Vec<Decoration>,
    pub score: u32,
    /// Simulated time (ms), advanced by `tick`
    pub clock_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated time at which a player death turns into game over
    pub game_over_at: Option<f64>,
    /// Events produced by the most recent step
    pub events: Vec<GameEvent>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: ParticleSystem,
}

impl GameState {
    /// Create a session sitting in the menu
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            phase: GamePhase::Menu,
            level_index: 1,
            level: None,
            player: Player::default(),
            entities: Vec::new(),
            camera: Camera::default(),
            backdrop: Vec::new(),
            score: 0,
            clock_ms: 0.0,
            time_ticks: 0,
            game_over_at: None,
            events: Vec::new(),
            particles: ParticleSystem::new(seed),
        }
    }

    /// Host viewport changed size
    pub fn resize(&mut self, viewport_width: f32) {
        self.camera.set_viewport_width(viewport_width);
    }

    /// Kill the player and arm the game-over timer. No-op if already dead.
    pub fn kill_player(&mut self) -> bool {
        if self.player.body.dead {
            return false;
        }
        self.player.body.dead = true;
        self.player.body.vel.y = self.tuning.death_hop;
        self.game_over_at = Some(self.clock_ms + self.tuning.game_over_delay_ms);
        self.events.push(GameEvent::PlayerDied);
        log::debug!(
            "player died at ({:.1}, {:.1}), game over at {:.0} ms",
            self.player.body.pos.x,
            self.player.body.pos.y,
            self.clock_ms + self.tuning.game_over_delay_ms
        );
        true
    }

    /// Live enemies and collectibles
    pub fn live_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| !e.is_dead())
    }

    pub fn tiles(&self) -> Option<&TileGrid> {
        self.level.as_ref().map(Level::tiles)
    }

    /// Read-only view for renderers and UI
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            level: self.level_index,
            score: self.score,
            theme: self.level.as_ref().map(|l| &l.theme),
            tiles: self.tiles(),
            player: &self.player,
            entities: self.live_entities().collect(),
            camera_x: self.camera.x(),
            particles: self.particles.particles(),
            backdrop: &self.backdrop,
            events: &self.events,
        }
    }
}

/// Borrowed per-step view of everything a renderer draws
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u32,
    pub theme: Option<&'a Theme>,
    pub tiles: Option<&'a TileGrid>,
    pub player: &'a Player,
    pub entities: Vec<&'a Entity>,
    pub camera_x: f32,
    pub particles: &'a [Particle],
    pub backdrop: &'a [Decoration],
    pub events: &'a [GameEvent],
}
