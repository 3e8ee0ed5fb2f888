//! Side-scrolling camera
//!
//! The viewport is always anchored at y = 0; only the horizontal offset moves.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_VIEWPORT_WIDTH;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    x: f32,
    viewport_width: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH)
    }
}

impl Camera {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            x: 0.0,
            viewport_width: viewport_width.max(0.0),
        }
    }

    /// Current horizontal offset
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width.max(0.0);
    }

    /// Snap back to the level start (on load)
    pub fn reset(&mut self) {
        self.x = 0.0;
    }

    /// Largest offset that keeps the viewport inside the level
    pub fn max_offset(&self, level_pixel_width: f32) -> f32 {
        (level_pixel_width - self.viewport_width).max(0.0)
    }

    /// Ease toward the player, never showing space outside the level
    pub fn follow(&mut self, player_x: f32, level_pixel_width: f32, tuning: &Tuning) {
        let max_x = self.max_offset(level_pixel_width);
        let target = (player_x - self.viewport_width * tuning.camera_lead).clamp(0.0, max_x);
        self.x += (target - self.x) * tuning.camera_smoothing;
        // A viewport resize can shrink the range under the current offset
        self.x = self.x.clamp(0.0, max_x);
    }
}
