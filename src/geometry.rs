//! Geometry primitives: points, displacement vectors and closed ranges.
//!
//! Points are plain [`Vec2`] positions.  [`Vector2`] is a displacement with a
//! polar constructor and a heading query; adding one to a point translates it.

use bevy::math::Vec2;
use std::f32::consts::{PI, TAU};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// One degree in radians.
pub const RADIANS_PER_DEGREE: f32 = PI / 180.0;

/// A position in world space.
pub type Point = Vec2;

/// Displacement or per-tick velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub dx: f32,
    pub dy: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Polar → cartesian.  `direction` is in radians, counter-clockwise from +x.
    pub fn from_magnitude_and_direction(magnitude: f32, direction: f32) -> Self {
        Self {
            dx: magnitude * direction.cos(),
            dy: magnitude * direction.sin(),
        }
    }

    pub fn length(self) -> f32 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }

    pub fn dot(self, other: Self) -> f32 {
        self.dx * other.dx + self.dy * other.dy
    }

    /// Heading in radians, normalised to `[0, 2π)`.
    ///
    /// # Panics
    ///
    /// When `dx == 0`: the slope is undefined and callers must never ask.
    pub fn angle(self) -> f32 {
        assert!(
            self.dx != 0.0,
            "Vector2::angle is undefined for a vector with dx == 0 ({:?})",
            self
        );
        let base = (self.dy / self.dx).atan();
        let quadrant = if self.dx < 0.0 {
            PI
        } else if self.dy < 0.0 {
            TAU
        } else {
            0.0
        };
        base + quadrant
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.dx, self.dy)
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        v.as_vec2()
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.dx -= rhs.dx;
        self.dy -= rhs.dy;
    }
}

// Translating a point by a displacement.

impl Add<Vector2> for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vector2) -> Vec2 {
        Vec2::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl AddAssign<Vector2> for Vec2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.dx;
        self.y += rhs.dy;
    }
}

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Both bounds divided by `divisor`.
    pub fn shrunk_by(self, divisor: f32) -> Self {
        Self::new(self.min / divisor, self.max / divisor)
    }
}
