//! Levels: the provider seam, loaded level model, and an ASCII map provider

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::actor::{Collectible, Enemy, Entity};
use super::tile::{TileGrid, TileKind};
use crate::consts::*;

/// Rendering-only level metadata. The simulation never reads it except to
/// decide whether to generate an outdoor backdrop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub sky_color: String,
    pub ground_color: String,
    pub brick_color: String,
    /// Outdoor levels get clouds, hills and bushes
    pub outdoor: bool,
}

impl Theme {
    pub fn overworld(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sky_color: "#5c94fc".to_string(),
            ground_color: "#e52521".to_string(),
            brick_color: "#b73300".to_string(),
            outdoor: true,
        }
    }

    pub fn underground(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sky_color: "#000000".to_string(),
            ground_color: "#003366".to_string(),
            brick_color: "#0055AA".to_string(),
            outdoor: false,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::overworld("World 1-1")
    }
}

/// A finished level as handed over by a [`LevelProvider`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub tiles: TileGrid,
    pub entities: Vec<Entity>,
    pub theme: Theme,
    /// Player spawn (top-left of the player body)
    pub start_pos: Vec2,
}

impl LevelData {
    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }
}

/// Source of level content. Level indices are 1-based.
pub trait LevelProvider {
    /// Number of levels available
    fn level_count(&self) -> u32;

    /// Produce a fresh copy of a level; `None` if the index is out of range
    fn generate(&self, index: u32) -> Option<LevelData>;
}

/// The level currently being simulated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub index: u32,
    pub theme: Theme,
    pub start_pos: Vec2,
    tiles: TileGrid,
}

impl Level {
    /// Split provider output into the level model and its initial entities
    pub fn load(index: u32, data: LevelData) -> (Self, Vec<Entity>) {
        let level = Self {
            index,
            theme: data.theme,
            start_pos: data.start_pos,
            tiles: data.tiles,
        };
        (level, data.entities)
    }

    /// Read-only tile access
    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    /// Tile mutation is reserved for the collision resolver
    pub(crate) fn tiles_mut(&mut self) -> &mut TileGrid {
        &mut self.tiles
    }

    pub fn pixel_width(&self) -> f32 {
        self.tiles.pixel_width()
    }

    pub fn pixel_height(&self) -> f32 {
        self.tiles.pixel_height()
    }
}

/// Errors from parsing an ASCII level map
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level map is empty")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("level has no player start")]
    MissingStart,
    #[error("second player start at row {row}, column {col}")]
    DuplicateStart { row: usize, col: usize },
}

/// Levels described as text, one glyph per tile:
///
/// | glyph | meaning |
/// |---|---|
/// | `.` | empty |
/// | `#` | ground |
/// | `B` | brick |
/// | `?` | question block |
/// | `[` `]` | pipe left / right half |
/// | `=` | platform |
/// | `U` | used block |
/// | `G` | goal |
/// | `P` | player start (empty tile) |
/// | `E` | enemy (empty tile) |
/// | `o` | coin (empty tile) |
#[derive(Debug, Clone, Default)]
pub struct AsciiLevels {
    levels: Vec<LevelData>,
}

impl AsciiLevels {
    /// Parse a list of (theme, map) pairs
    pub fn new<'a>(
        maps: impl IntoIterator<Item = (Theme, &'a str)>,
    ) -> Result<Self, LevelError> {
        let levels = maps
            .into_iter()
            .map(|(theme, map)| Self::parse(map, theme))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { levels })
    }

    /// Parse a single map. Blank lines and surrounding whitespace are ignored.
    pub fn parse(map: &str, theme: Theme) -> Result<LevelData, LevelError> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.first().map(|r| r.chars().count()).ok_or(LevelError::Empty)?;

        let mut tiles = TileGrid::new(width, rows.len());
        let mut entities = Vec::new();
        let mut start_pos = None;

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            for (col, glyph) in line.chars().enumerate() {
                let (r, c) = (row as i32, col as i32);
                let kind = match glyph {
                    '.' => TileKind::Empty,
                    '#' => TileKind::Ground,
                    'B' => TileKind::Brick,
                    '?' => TileKind::QuestionBlock,
                    '[' => TileKind::PipeLeft,
                    ']' => TileKind::PipeRight,
                    '=' => TileKind::Platform,
                    'U' => TileKind::UsedBlock,
                    'G' => TileKind::Goal,
                    'E' => {
                        entities.push(Entity::Enemy(Enemy::at_tile(r, c)));
                        TileKind::Empty
                    }
                    'o' => {
                        entities.push(Entity::Collectible(Collectible::coin_at_tile(r, c)));
                        TileKind::Empty
                    }
                    'P' => {
                        if start_pos.is_some() {
                            return Err(LevelError::DuplicateStart { row, col });
                        }
                        // Centered in the tile, feet on its bottom edge
                        start_pos = Some(Vec2::new(
                            col as f32 * TILE_SIZE + (TILE_SIZE - PLAYER_WIDTH) / 2.0,
                            (row + 1) as f32 * TILE_SIZE - PLAYER_HEIGHT,
                        ));
                        TileKind::Empty
                    }
                    _ => return Err(LevelError::UnknownGlyph { glyph, row, col }),
                };
                tiles.set(r, c, kind);
            }
        }

        Ok(LevelData {
            tiles,
            entities,
            theme,
            start_pos: start_pos.ok_or(LevelError::MissingStart)?,
        })
    }
}

impl LevelProvider for AsciiLevels {
    fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    fn generate(&self, index: u32) -> Option<LevelData> {
        let slot = (index as usize).checked_sub(1)?;
        self.levels.get(slot).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "
        ..........
        ...?..o...
        .P....E.G.
        ##########
    ";

    #[test]
    fn test_parse_map() {
        let data = AsciiLevels::parse(MAP, Theme::default()).unwrap();
        assert_eq!(data.width(), 10);
        assert_eq!(data.height(), 4);
        assert_eq!(data.tiles.get(1, 3), TileKind::QuestionBlock);
        assert_eq!(data.tiles.get(2, 8), TileKind::Goal);
        assert_eq!(data.tiles.count(TileKind::Ground), 10);
        assert_eq!(data.entities.len(), 2);
        // Feet rest exactly on the ground row
        assert_eq!(data.start_pos.y + PLAYER_HEIGHT, 3.0 * TILE_SIZE);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(AsciiLevels::parse("  \n ", Theme::default()), Err(LevelError::Empty));
        assert_eq!(
            AsciiLevels::parse("P..\n##", Theme::default()),
            Err(LevelError::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            AsciiLevels::parse("P.x", Theme::default()),
            Err(LevelError::UnknownGlyph {
                glyph: 'x',
                row: 0,
                col: 2
            })
        );
        assert_eq!(
            AsciiLevels::parse("...\n###", Theme::default()),
            Err(LevelError::MissingStart)
        );
        assert_eq!(
            AsciiLevels::parse("P.P", Theme::default()),
            Err(LevelError::DuplicateStart { row: 0, col: 2 })
        );
    }

    #[test]
    fn test_provider_is_one_based_and_returns_fresh_copies() {
        let provider = AsciiLevels::new([
            (Theme::overworld("1-1"), MAP),
            (Theme::underground("1-2"), MAP),
        ])
        .unwrap();
        assert_eq!(provider.level_count(), 2);
        assert!(provider.generate(0).is_none());
        assert!(provider.generate(3).is_none());

        let mut first = provider.generate(1).unwrap();
        first.tiles.set(1, 3, TileKind::UsedBlock);
        let again = provider.generate(1).unwrap();
        assert_eq!(again.tiles.get(1, 3), TileKind::QuestionBlock);
        assert!(!provider.generate(2).unwrap().theme.outdoor);
    }
}
