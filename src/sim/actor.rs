//! Dynamic actors: the player, enemies and collectibles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Closed intersection: touching edges count as overlap
    pub fn touches(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Open intersection: edges must actually cross
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Shared kinematic state of every actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner, pixels
    pub pos: Vec2,
    /// Pixels per step
    pub vel: Vec2,
    pub size: Vec2,
    /// Removed from the simulation once set; never cleared
    pub dead: bool,
    /// Set only by a downward hit on this step's vertical pass
    pub grounded: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            dead: false,
            grounded: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Midpoint of the bottom edge (where dust spawns)
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.bottom())
    }
}

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Locomotion tag consumed by the animator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locomotion {
    #[default]
    Idle,
    Run,
    Skid,
    Jump,
    Fall,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    pub locomotion: Locomotion,
    /// Cosmetic animation clock (ms); physics never reads it
    pub anim_timer: f32,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Self {
            body: Body::new(start, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            facing: Facing::Right,
            locomotion: Locomotion::Idle,
            anim_timer: 0.0,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
}

impl Enemy {
    /// Enemy standing in tile (row, col), walking left
    pub fn at_tile(row: i32, col: i32) -> Self {
        let mut body = Body::new(
            Vec2::new(col as f32 * TILE_SIZE, row as f32 * TILE_SIZE),
            Vec2::splat(ENEMY_SIZE),
        );
        body.vel.x = ENEMY_START_SPEED;
        Self { body }
    }
}

/// A static pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub body: Body,
}

impl Collectible {
    /// Coin centered horizontally in tile (row, col)
    pub fn coin_at_tile(row: i32, col: i32) -> Self {
        Self {
            body: Body::new(
                Vec2::new(col as f32 * TILE_SIZE + COIN_INSET, row as f32 * TILE_SIZE),
                Vec2::splat(COIN_SIZE),
            ),
        }
    }
}

/// A non-player actor held in the entity store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Enemy(Enemy),
    Collectible(Collectible),
}

impl Entity {
    pub fn body(&self) -> &Body {
        match self {
            Entity::Enemy(e) => &e.body,
            Entity::Collectible(c) => &c.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Entity::Enemy(e) => &mut e.body,
            Entity::Collectible(c) => &mut c.body,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.body().dead
    }

    pub fn kind(&self) -> ActorKind {
        match self {
            Entity::Enemy(_) => ActorKind::Enemy,
            Entity::Collectible(_) => ActorKind::Collectible,
        }
    }
}

/// Tag telling the tile resolver how an actor reacts to contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Enemy,
    Collectible,
}
