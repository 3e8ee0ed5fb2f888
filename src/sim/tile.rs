//! Tile grid for a level
//!
//! A flat row-major buffer of tile kinds. Reads outside the grid see
//! `Empty`; writes outside the grid are dropped.

use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;

/// Kind of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Ground,
    Brick,
    QuestionBlock,
    PipeLeft,
    PipeRight,
    Platform,
    /// A question block after it has been bumped
    UsedBlock,
    /// Non-blocking level exit
    Goal,
}

impl TileKind {
    /// Whether the tile blocks motion
    pub fn is_solid(self) -> bool {
        match self {
            TileKind::Empty | TileKind::Goal => false,
            TileKind::Ground
            | TileKind::Brick
            | TileKind::QuestionBlock
            | TileKind::PipeLeft
            | TileKind::PipeRight
            | TileKind::Platform
            | TileKind::UsedBlock => true,
        }
    }
}

/// Rectangular tile grid, indexed by (row, col)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<TileKind>, // Row-major: [row * width + col]
}

impl TileGrid {
    /// Create an all-empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![TileKind::Empty; width * height],
        }
    }

    /// Width in tiles
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> usize {
        self.height
    }

    /// Level width in pixels
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }

    /// Level height in pixels
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * TILE_SIZE
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    /// Tile at (row, col); `Empty` when out of bounds
    pub fn get(&self, row: i32, col: i32) -> TileKind {
        self.index(row, col)
            .map(|i| self.cells[i])
            .unwrap_or(TileKind::Empty)
    }

    /// Set the tile at (row, col). Returns false when out of bounds.
    pub fn set(&mut self, row: i32, col: i32, kind: TileKind) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Turn a question block into a used block.
    /// Returns true only if a question block was actually consumed.
    pub(crate) fn bump(&mut self, row: i32, col: i32) -> bool {
        match self.index(row, col) {
            Some(i) if self.cells[i] == TileKind::QuestionBlock => {
                self.cells[i] = TileKind::UsedBlock;
                true
            }
            _ => false,
        }
    }

    /// Iterate rows top to bottom (for renderers)
    pub fn rows(&self) -> impl Iterator<Item = &[TileKind]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Count tiles of a given kind
    pub fn count(&self, kind: TileKind) -> usize {
        self.cells.iter().filter(|&&t| t == kind).count()
    }
}
