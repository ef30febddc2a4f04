//! Centralised simulation constants.
//!
//! Every tuneable value lives here so it can be found and modified in one
//! place.  [`crate::config::SimConfig::default`] is built from these, and
//! `assets/asteroids.toml` can override any subset at startup.
//!
//! All distances are in world units: the shorter window side spans 2.0 units,
//! so a 4:3 window shows roughly ±1.33 × ±1.0.

// ── Window / Viewport ─────────────────────────────────────────────────────────

/// Initial window width in pixels.
pub const WINDOW_WIDTH: u32 = 1000;

/// Initial window height in pixels.
pub const WINDOW_HEIGHT: u32 = 750;

/// World-space length of the shorter window side.
pub const VIEWPORT_SHORT_SIDE: f32 = 2.0;

// ── Timing ────────────────────────────────────────────────────────────────────

/// Seconds between simulation ticks.
///
/// Every asteroid moves by its full velocity once per tick, so this also sets
/// the apparent speed of the whole field.
pub const TICK_INTERVAL_SECS: f32 = 0.05;

/// Upper bound on ticks replayed in a single frame after a stall.
pub const MAX_TICKS_PER_FRAME: u32 = 4;

// ── Population ────────────────────────────────────────────────────────────────

/// Asteroids seeded by a reset.
pub const INITIAL_ASTEROID_COUNT: usize = 12;

/// Size envelope of the asteroids seeded by a reset.
pub const INITIAL_RADIUS_MIN: f32 = 0.1;
pub const INITIAL_RADIUS_MAX: f32 = 0.2;

// ── Asteroid Geometry ─────────────────────────────────────────────────────────

/// Polygon vertex count; every asteroid, fragment or not, has this many.
pub const ASTEROID_SIDES: u32 = 12;

/// Per-tick velocity magnitude range.
pub const ASTEROID_SPEED_MIN: f32 = 0.01;
pub const ASTEROID_SPEED_MAX: f32 = 0.03;

/// Per-tick rotation increment range (degrees).  Symmetric so asteroids spin
/// both ways.
pub const ASTEROID_SPIN_MIN: f32 = -2.5;
pub const ASTEROID_SPIN_MAX: f32 = 2.5;

/// Click radius as a multiple of the asteroid's max radius.
pub const HIT_SLOP: f32 = 1.2;

// ── Fragmentation ─────────────────────────────────────────────────────────────

/// Children produced when an asteroid shatters.
pub const FRAGMENT_COUNT: u32 = 3;

/// Generations of fragmentation an initial asteroid may go through.
pub const EXPLODE_COUNT: u32 = 2;

/// Fragment size envelope = parent envelope / (`FRAGMENT_COUNT` × this).
///
/// The product must stay above 1.0 or fragments would not shrink.
pub const FRAGMENT_SHRINK: f32 = 0.75;

// ── Particle Bursts ───────────────────────────────────────────────────────────

/// Points in a single burst.
pub const PARTICLE_COUNT: usize = 1500;

/// Per-step particle speed range.
pub const PARTICLE_SPEED_MIN: f32 = 0.0;
pub const PARTICLE_SPEED_MAX: f32 = 0.01;

/// Ticks a burst stays visible; opacity fades linearly to zero over them.
pub const PARTICLE_DISPLAY_TICKS: u32 = 100;

/// Per-step positional jitter half-width, divided by 100 before use.
pub const PARTICLE_CHAOS: f32 = 0.5;

/// Extra sub-steps rendered per tick to smear each particle into a short trail.
pub const PARTICLE_BLUR_PASSES: u32 = 3;

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Length (pixels) of the short segment drawn for each particle.
pub const PARTICLE_POINT_PX: f32 = 1.5;
