//! Tile Runner - a deterministic 2D tile platformer core
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (physics, tile collision,
//!   interactions, camera, game flow)
//! - `tuning`: Data-driven physics and scoring constants
//!
//! Rendering, UI and audio live in the host and read [`sim::Snapshot`]s.

pub mod sim;
pub mod tuning;

pub use sim::{
    AsciiLevels, GameEvent, GamePhase, GameState, LevelData, LevelError, LevelProvider,
    Snapshot, TickInput, TileKind, tick,
};
pub use tuning::Tuning;

/// Level geometry constants
pub mod consts {
    /// Edge length of one square tile, in pixels
    pub const TILE_SIZE: f32 = 40.0;

    /// Player body size (0.8 x 0.9 of a tile)
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 36.0;

    /// Enemy body size and initial patrol velocity
    pub const ENEMY_SIZE: f32 = TILE_SIZE;
    pub const ENEMY_START_SPEED: f32 = -1.0;

    /// Collectible (coin) body size and its inset inside its tile
    pub const COIN_SIZE: f32 = 20.0;
    pub const COIN_INSET: f32 = 10.0;

    /// Viewport width used until the host reports a real one
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 960.0;
}
