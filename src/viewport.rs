//! Window ↔ world coordinate mapping.
//!
//! The world is centred on the origin and its shorter side always spans
//! [`VIEWPORT_SHORT_SIDE`] units, so a 1000×750 window shows ±1.333 × ±1.0.
//! The longer side grows with the aspect ratio.

use crate::constants::{VIEWPORT_SHORT_SIDE, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::geometry::Point;
use crate::random::UniformSource;
use bevy::math::Vec2;
use rand::Rng;

/// World extents of the visible area plus the window size they map onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// World-space width.
    pub width: f32,
    /// World-space height.
    pub height: f32,
    /// Window size in logical pixels.
    pub window: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_window_size(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32)
    }
}

impl Viewport {
    /// Fit the world to a `width_px × height_px` window.  Both must be positive.
    pub fn from_window_size(width_px: f32, height_px: f32) -> Self {
        debug_assert!(width_px > 0.0 && height_px > 0.0, "degenerate window");
        let (width, height) = if width_px <= height_px {
            (
                VIEWPORT_SHORT_SIDE,
                VIEWPORT_SHORT_SIDE * height_px / width_px,
            )
        } else {
            (
                VIEWPORT_SHORT_SIDE * width_px / height_px,
                VIEWPORT_SHORT_SIDE,
            )
        };
        Self {
            width,
            height,
            window: Vec2::new(width_px, height_px),
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Logical pixels per world unit.
    pub fn pixels_per_unit(&self) -> f32 {
        self.window.x / self.width
    }

    /// Window cursor position (origin top-left, y down) → world point.
    pub fn screen_to_world(&self, cursor: Vec2) -> Point {
        Point::new(
            self.width * cursor.x / self.window.x - 0.5 * self.width,
            0.5 * self.height - self.height * cursor.y / self.window.y,
        )
    }

    /// World point → 2D camera space (origin centre, y up, pixels).
    pub fn world_to_camera(&self, point: Point) -> Vec2 {
        point * self.pixels_per_unit()
    }

    pub fn contains(&self, point: Point) -> bool {
        let half = self.half_extents();
        point.x.abs() <= half.x && point.y.abs() <= half.y
    }

    /// Uniform random point inside the visible area.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let half = self.half_extents();
        Point::new(
            rng.next_between(-half.x, half.x),
            rng.next_between(-half.y, half.y),
        )
    }
}
