//! Parallax background decoration
//!
//! Purely cosmetic. Generated once per level load from a seeded RNG so the
//! same seed always decorates a level the same way.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorationKind {
    Cloud,
    Hill,
    Bush,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// Scatter decorations across a level `width` x `height` tiles
pub fn generate_backdrop(width: usize, height: usize, rng: &mut Pcg32) -> Vec<Decoration> {
    let level_w = width as f32 * TILE_SIZE;
    let level_h = height as f32 * TILE_SIZE;
    let mut items = Vec::new();

    let mut x = 0.0;
    while x < level_w {
        items.push(Decoration {
            kind: DecorationKind::Cloud,
            x,
            y: rng.random_range(30.0..230.0),
            scale: rng.random_range(0.8..1.3),
        });
        x += rng.random_range(100.0..500.0);
    }

    let mut x = 0.0;
    while x < level_w {
        items.push(Decoration {
            kind: DecorationKind::Hill,
            x,
            y: level_h - 20.0,
            scale: 1.0,
        });
        x += rng.random_range(400.0..1200.0);
    }

    let mut x = 200.0;
    while x < level_w {
        items.push(Decoration {
            kind: DecorationKind::Bush,
            x,
            y: level_h - 2.0 * TILE_SIZE,
            scale: 1.0,
        });
        x += rng.random_range(200.0..800.0);
    }

    items
}
