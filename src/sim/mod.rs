//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One physics step per `tick`; the caller's elapsed time only drives clocks
//! - Seeded RNG only, and only for cosmetics (particles, backdrop)
//! - Stable iteration order (row-major tiles, entity store order)
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod backdrop;
pub mod camera;
pub mod collision;
mod flow;
pub mod interaction;
pub mod level;
pub mod particles;
pub mod physics;
pub mod state;
pub mod tick;
pub mod tile;

pub use actor::{ActorKind, Body, Collectible, Enemy, Entity, Facing, Locomotion, Player, Rect};
pub use backdrop::{Decoration, DecorationKind};
pub use camera::Camera;
pub use interaction::Contact;
pub use level::{AsciiLevels, Level, LevelData, LevelError, LevelProvider, Theme};
pub use particles::{Particle, ParticleBurst, ParticleColor, ParticleKind};
pub use state::{GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{TickInput, tick};
pub use tile::{TileGrid, TileKind};
