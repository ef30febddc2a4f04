//! Particle bursts: the fading spray left behind by a shattered asteroid.
//!
//! ## Model
//!
//! A [`ParticleSystem`] holds a fixed number of [`Particle`]s, each a polar
//! velocity anchored at the particle's current position.  Every step moves a
//! particle to the end of its velocity vector plus a small random jitter, and
//! the new position becomes the anchor for the next step.
//!
//! One call to [`ParticleSystem::advance`] is one display tick: it runs
//! `blur_passes + 1` movement steps, recording every intermediate position so
//! the renderer can draw a short smeared trail, then bumps the shared display
//! counter.  Opacity falls linearly from 1 to 0 over the display budget; once
//! the budget is spent the system reports itself expired and its owner drops
//! it.
//!
//! | Field            | Default | Meaning                                 |
//! |------------------|---------|-----------------------------------------|
//! | particle count   | 1500    | points per burst                        |
//! | speed range      | 0–0.01  | per-step distance                       |
//! | display budget   | 100     | ticks before expiry                     |
//! | chaos            | 0.5     | jitter half-width, ÷100 per axis        |

use crate::config::SimConfig;
use crate::geometry::{Point, Vector2, RADIANS_PER_DEGREE};
use crate::random::UniformSource;
use rand::Rng;

/// One point in a burst: its current position and the polar step it takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current position; rewritten after every step.
    pub origin: Point,
    /// Heading in radians.
    pub direction: f32,
    /// Distance covered per step.
    pub magnitude: f32,
}

impl Particle {
    /// Where the particle lands after one step, before jitter.
    pub fn end_point(&self) -> Point {
        self.origin + Vector2::from_magnitude_and_direction(self.magnitude, self.direction)
    }
}

/// A burst of decaying particles spawned where an asteroid was destroyed.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    location: Point,
    particles: Vec<Particle>,
    /// Positions drawn during the most recent display tick (all blur passes).
    trail: Vec<Point>,
    display_count: u32,
    display_max: u32,
    chaos: f32,
    color: [f32; 3],
    is_paused: bool,
}

impl ParticleSystem {
    /// Fan `particle_count` particles out of `origin`.
    ///
    /// Particle `i` heads at `(count / 360) · i` degrees.  With 1500 particles
    /// that winds around the circle several times, which is what gives the
    /// burst its dense, uneven look.
    pub fn new<R: Rng + ?Sized>(origin: Point, config: &SimConfig, rng: &mut R) -> Self {
        let count = config.particle_count;
        let spacing = (count as f32 / 360.0) * RADIANS_PER_DEGREE;
        let speed = config.particle_speed_range();

        let particles = (0..count)
            .map(|i| Particle {
                origin,
                direction: spacing * i as f32,
                magnitude: rng.next_in(speed),
            })
            .collect();

        Self {
            location: origin,
            particles,
            trail: Vec::new(),
            display_count: 0,
            display_max: config.particle_display_ticks,
            chaos: config.particle_chaos,
            color: [1.0, 1.0, 1.0],
            is_paused: false,
        }
    }

    /// Run one display tick.
    ///
    /// Returns `false` without touching anything once the display budget is
    /// spent; the caller should then drop the system.  Paused systems still
    /// record their (frozen) positions for drawing but neither move nor use
    /// up budget.
    pub fn advance<R: Rng + ?Sized>(&mut self, blur_passes: u32, rng: &mut R) -> bool {
        self.trail.clear();
        if self.is_expired() {
            return false;
        }

        let jitter = self.chaos;
        for _ in 0..=blur_passes {
            for particle in self.particles.iter_mut() {
                self.trail.push(particle.origin);
                if self.is_paused {
                    continue;
                }
                let mut next = particle.end_point();
                next.x += rng.next_between(-jitter, jitter) / 100.0;
                next.y += rng.next_between(-jitter, jitter) / 100.0;
                particle.origin = next;
            }
        }

        if !self.is_paused {
            self.display_count += 1;
        }
        true
    }

    pub fn is_expired(&self) -> bool {
        self.display_count >= self.display_max
    }

    /// Shared alpha for every particle: 1 at spawn, 0 at expiry.
    pub fn opacity(&self) -> f32 {
        1.0 - self.display_count as f32 / self.display_max as f32
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current particle positions.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.particles.iter().map(|p| p.origin)
    }

    /// Positions recorded over every blur pass of the last display tick.
    pub fn trail(&self) -> &[Point] {
        &self.trail
    }

    /// What to draw this frame: the blur trail once the system has ticked,
    /// otherwise the current positions.
    pub fn render_points(&self) -> Box<dyn Iterator<Item = Point> + '_> {
        if self.trail.is_empty() {
            Box::new(self.positions())
        } else {
            Box::new(self.trail.iter().copied())
        }
    }

    pub fn display_count(&self) -> u32 {
        self.display_count
    }

    pub fn display_max(&self) -> u32 {
        self.display_max
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }
}
