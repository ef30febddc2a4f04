//! Asteroids: rotating, drifting polygons that shatter when clicked.
//!
//! An asteroid's outline is generated once at construction (`N` vertices at
//! evenly spaced angles, each at a random radius inside the size envelope)
//! and never changes afterwards.  Every tick it spins by a fixed increment,
//! moves by its velocity and wraps around the viewport edges.
//!
//! Shattering produces `fragment_count` smaller asteroids fanned out around
//! the parent's heading, each carrying one fewer generation of
//! `explode_count`, plus a [`ParticleSystem`] burst at the parent's location.

use crate::config::SimConfig;
use crate::geometry::{Point, Range, Vector2, RADIANS_PER_DEGREE};
use crate::particles::ParticleSystem;
use crate::random::UniformSource;
use bevy::math::Vec2;
use rand::Rng;

/// A single asteroid, exclusively owned by the simulation's population.
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    /// Stable identity assigned when the asteroid joins a population; 0 until then.
    id: u64,
    /// Outline in local space, generated once.
    vertices: Vec<Point>,
    location: Point,
    /// Current rotation in degrees.
    rotation: f32,
    /// Degrees added to `rotation` every unpaused tick.
    rotation_inc: f32,
    /// Displacement applied every unpaused tick.
    velocity: Vector2,
    radius_range: Range,
    hit_slop: f32,
    fragment_count: u32,
    explode_count: u32,
    is_paused: bool,
}

impl Asteroid {
    /// Build an asteroid at the origin with a random spin, velocity and outline
    /// whose vertex radii fall inside `radius_range`.
    pub fn new<R: Rng + ?Sized>(radius_range: Range, config: &SimConfig, rng: &mut R) -> Self {
        let rotation_inc = rng.next_in(config.asteroid_spin_range());
        let speed = rng.next_in(config.asteroid_speed_range());
        let heading = rng.next_between(0.0, 360.0 * RADIANS_PER_DEGREE);
        let velocity = Vector2::from_magnitude_and_direction(speed, heading);
        let vertices = generate_shape(config.asteroid_sides, radius_range, rng);

        Self {
            id: 0,
            vertices,
            location: Point::ZERO,
            rotation: 0.0,
            rotation_inc,
            velocity,
            radius_range,
            hit_slop: config.hit_slop,
            fragment_count: config.fragment_count,
            explode_count: config.explode_count,
            is_paused: false,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: u64) {
        self.id = id;
    }

    /// Local-space outline.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation
    }

    pub fn rotation_radians(&self) -> f32 {
        self.rotation * RADIANS_PER_DEGREE
    }

    pub fn rotation_increment(&self) -> f32 {
        self.rotation_inc
    }

    pub fn velocity(&self) -> Vector2 {
        self.velocity
    }

    pub fn radius_range(&self) -> Range {
        self.radius_range
    }

    pub fn fragment_count(&self) -> u32 {
        self.fragment_count
    }

    pub fn explode_count(&self) -> u32 {
        self.explode_count
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }

    /// Outline rotated and translated into world space.
    pub fn world_vertices(&self) -> impl Iterator<Item = Point> + '_ {
        let rotation = Vec2::from_angle(self.rotation_radians());
        self.vertices
            .iter()
            .map(move |v| self.location + rotation.rotate(*v))
    }

    // ── Motion ────────────────────────────────────────────────────────────────

    pub fn move_to(&mut self, location: Point) {
        self.location = location;
    }

    /// Spin and drift by one tick.  Paused asteroids stay bit-identical.
    pub fn advance(&mut self) {
        if self.is_paused {
            return;
        }
        self.rotation += self.rotation_inc;
        self.location += self.velocity;
    }

    /// Teleport to the opposite edge once the asteroid has fully left a
    /// `width × height` viewport centred on the origin.
    ///
    /// Edges are checked left, right, bottom, top and only the first match
    /// fires, so a single call never wraps on both axes.  The perpendicular
    /// coordinate is nudged by the max radius so the asteroid re-enters
    /// slightly offset.  Returns whether a wrap happened.
    pub fn wrap_at_bounds(&mut self, height: f32, width: f32) -> bool {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        let margin = self.radius_range.max;
        let Point { x, y } = self.location;

        let wrapped = if x < -half_width - margin {
            Point::new(half_width, y + margin)
        } else if x > half_width + margin {
            Point::new(-half_width, y - margin)
        } else if y < -half_height - margin {
            Point::new(x, half_height + margin)
        } else if y > half_height + margin {
            Point::new(x, -half_height - margin)
        } else {
            return false;
        };

        self.move_to(wrapped);
        true
    }

    // ── Interaction ───────────────────────────────────────────────────────────

    /// Whether `point` lands within the (generous) click radius.
    pub fn hit_test(&self, point: Point) -> bool {
        self.location.distance(point) <= self.radius_range.max * self.hit_slop
    }

    pub fn can_explode(&self) -> bool {
        self.explode_count > 0
    }

    /// Break into `fragment_count` smaller asteroids.
    ///
    /// Fragment `i` sits one fragment-radius away from the parent at bearing
    /// `i · (360 / fragment_count)°` offset by the parent's heading, and moves
    /// with the parent's velocity plus an outward push along that bearing.
    ///
    /// # Panics
    ///
    /// When the parent's velocity has `dx == 0` (its heading is undefined).
    pub fn spawn_fragments<R: Rng + ?Sized>(
        &self,
        config: &SimConfig,
        rng: &mut R,
    ) -> Vec<Asteroid> {
        let count = self.fragment_count;
        let size = self
            .radius_range
            .shrunk_by(count as f32 * config.fragment_shrink);
        // Whole degrees per step: 360 / 7 lands on 51°, not 51.43°.
        let step = (360 / count) as f32 * RADIANS_PER_DEGREE;
        let heading = self.velocity.angle();

        (0..count)
            .map(|i| {
                let mut fragment = Asteroid::new(size, config, &mut *rng);
                let bearing = step * i as f32 + heading;

                let offset =
                    Vector2::from_magnitude_and_direction(fragment.radius_range.max, bearing);
                fragment.move_to(self.location + offset);

                let push =
                    Vector2::from_magnitude_and_direction(fragment.velocity.length(), bearing);
                fragment.velocity = self.velocity + push;

                fragment.explode_count = self.explode_count.saturating_sub(1);
                fragment.is_paused = self.is_paused;
                fragment
            })
            .collect()
    }

    /// A particle burst anchored at the current location.
    pub fn spawn_particle_burst<R: Rng + ?Sized>(
        &self,
        config: &SimConfig,
        rng: &mut R,
    ) -> ParticleSystem {
        ParticleSystem::new(self.location, config, rng)
    }
}

/// `sides` vertices at `i · (360 / sides)` whole degrees, each at a random
/// radius inside `radius_range`.
fn generate_shape<R: Rng + ?Sized>(sides: u32, radius_range: Range, rng: &mut R) -> Vec<Point> {
    let step = (360 / sides) as f32 * RADIANS_PER_DEGREE;
    (0..sides)
        .map(|i| {
            let radius = rng.next_in(radius_range);
            Vector2::from_magnitude_and_direction(radius, step * i as f32).as_vec2()
        })
        .collect()
}
