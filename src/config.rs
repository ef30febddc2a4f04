//! Runtime simulation configuration loaded from `assets/asteroids.toml`.
//!
//! [`SimConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_sim_config`] reads
//! `assets/asteroids.toml` and overwrites the defaults with any values present
//! in the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<SimConfig>` to any system parameter list and read values
//! with `config.fragment_count`, `config.particle_count`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `SimConfig::default()`.

use crate::constants::*;
use crate::error::{validate_count, validate_positive, validate_range, SimError, SimResult};
use crate::geometry::Range;
use bevy::prelude::*;
use serde::Deserialize;

/// Path of the optional override file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/asteroids.toml";

/// Runtime-tunable simulation configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Randomness ────────────────────────────────────────────────────────────
    /// Fixed seed for the random source; `None` seeds from entropy.
    pub seed: Option<u64>,

    // ── Timing ────────────────────────────────────────────────────────────────
    pub tick_interval_secs: f32,
    pub max_ticks_per_frame: u32,

    // ── Population ────────────────────────────────────────────────────────────
    pub initial_asteroid_count: usize,
    pub initial_radius_min: f32,
    pub initial_radius_max: f32,

    // ── Asteroid Geometry ─────────────────────────────────────────────────────
    pub asteroid_sides: u32,
    pub asteroid_speed_min: f32,
    pub asteroid_speed_max: f32,
    pub asteroid_spin_min: f32,
    pub asteroid_spin_max: f32,
    pub hit_slop: f32,

    // ── Fragmentation ─────────────────────────────────────────────────────────
    pub fragment_count: u32,
    pub explode_count: u32,
    pub fragment_shrink: f32,

    // ── Particle Bursts ───────────────────────────────────────────────────────
    pub particle_count: usize,
    pub particle_speed_min: f32,
    pub particle_speed_max: f32,
    pub particle_display_ticks: u32,
    pub particle_chaos: f32,
    pub particle_blur_passes: u32,

    // ── Rendering ─────────────────────────────────────────────────────────────
    pub particle_point_px: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            // Timing
            tick_interval_secs: TICK_INTERVAL_SECS,
            max_ticks_per_frame: MAX_TICKS_PER_FRAME,
            // Population
            initial_asteroid_count: INITIAL_ASTEROID_COUNT,
            initial_radius_min: INITIAL_RADIUS_MIN,
            initial_radius_max: INITIAL_RADIUS_MAX,
            // Asteroid Geometry
            asteroid_sides: ASTEROID_SIDES,
            asteroid_speed_min: ASTEROID_SPEED_MIN,
            asteroid_speed_max: ASTEROID_SPEED_MAX,
            asteroid_spin_min: ASTEROID_SPIN_MIN,
            asteroid_spin_max: ASTEROID_SPIN_MAX,
            hit_slop: HIT_SLOP,
            // Fragmentation
            fragment_count: FRAGMENT_COUNT,
            explode_count: EXPLODE_COUNT,
            fragment_shrink: FRAGMENT_SHRINK,
            // Particle Bursts
            particle_count: PARTICLE_COUNT,
            particle_speed_min: PARTICLE_SPEED_MIN,
            particle_speed_max: PARTICLE_SPEED_MAX,
            particle_display_ticks: PARTICLE_DISPLAY_TICKS,
            particle_chaos: PARTICLE_CHAOS,
            particle_blur_passes: PARTICLE_BLUR_PASSES,
            // Rendering
            particle_point_px: PARTICLE_POINT_PX,
        }
    }
}

impl SimConfig {
    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(contents: &str) -> SimResult<Self> {
        let config: SimConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant the simulation relies on.
    ///
    /// Random draws panic on inverted ranges, a shrink product ≤ 1.0 would
    /// grow fragments instead of shrinking them, and a stationary asteroid has
    /// no heading to fan its fragments around.
    pub fn validate(&self) -> SimResult<()> {
        validate_positive("tick_interval_secs", self.tick_interval_secs)?;
        validate_count("max_ticks_per_frame", self.max_ticks_per_frame as usize, 1)?;

        validate_range(
            "initial_radius",
            self.initial_radius_min,
            self.initial_radius_max,
        )?;
        validate_positive("initial_radius_max", self.initial_radius_max)?;

        validate_count("asteroid_sides", self.asteroid_sides as usize, 3)?;
        validate_range(
            "asteroid_speed",
            self.asteroid_speed_min,
            self.asteroid_speed_max,
        )?;
        // Fragments take their bearing from the parent's heading, which needs
        // a non-zero velocity.
        validate_positive("asteroid_speed_min", self.asteroid_speed_min)?;
        validate_range(
            "asteroid_spin",
            self.asteroid_spin_min,
            self.asteroid_spin_max,
        )?;
        validate_positive("hit_slop", self.hit_slop)?;

        validate_count("fragment_count", self.fragment_count as usize, 1)?;
        let shrink = self.fragment_count as f32 * self.fragment_shrink;
        if shrink.is_nan() || shrink <= 1.0 {
            return Err(SimError::InvalidValue {
                name: "fragment_count * fragment_shrink",
                value: shrink,
                expected: "(1.0, ∞)",
            });
        }

        validate_range(
            "particle_speed",
            self.particle_speed_min,
            self.particle_speed_max,
        )?;
        validate_count(
            "particle_display_ticks",
            self.particle_display_ticks as usize,
            1,
        )?;
        validate_range("particle_chaos", -self.particle_chaos, self.particle_chaos)?;
        validate_positive("particle_point_px", self.particle_point_px)?;
        Ok(())
    }

    /// Size envelope for asteroids seeded by a reset.
    pub fn initial_radius_range(&self) -> Range {
        Range::new(self.initial_radius_min, self.initial_radius_max)
    }

    pub fn asteroid_speed_range(&self) -> Range {
        Range::new(self.asteroid_speed_min, self.asteroid_speed_max)
    }

    /// Per-tick rotation increment range (degrees).
    pub fn asteroid_spin_range(&self) -> Range {
        Range::new(self.asteroid_spin_min, self.asteroid_spin_max)
    }

    pub fn particle_speed_range(&self) -> Range {
        Range::new(self.particle_speed_min, self.particle_speed_max)
    }
}

/// Startup system: attempt to load `assets/asteroids.toml` and overwrite the
/// `SimConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse and validation errors
/// are logged but do not abort the simulation.  A missing file is not an error.
pub fn load_sim_config(mut config: ResMut<SimConfig>) {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => match SimConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("[SETUP] Loaded simulation config from {CONFIG_PATH}");
            }
            Err(e) => {
                warn!("[SETUP] Rejected {CONFIG_PATH}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("[SETUP] No {CONFIG_PATH} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = SimConfig::from_toml_str("").expect("empty toml is valid");
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_named_keys() {
        let config = SimConfig::from_toml_str("fragment_count = 4\nseed = 7\n")
            .expect("partial toml is valid");
        assert_eq!(config.fragment_count, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.particle_count, PARTICLE_COUNT);
        assert_eq!(config.asteroid_sides, ASTEROID_SIDES);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = SimConfig::from_toml_str("fragment_count = [").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse { .. }), "got {err:?}");
    }

    #[test]
    fn inverted_speed_range_is_rejected() {
        let err = SimConfig::from_toml_str("asteroid_speed_min = 0.5\nasteroid_speed_max = 0.1")
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidRange {
                name: "asteroid_speed",
                ..
            }
        ));
    }

    #[test]
    fn zero_speed_range_is_rejected() {
        let err = SimConfig::from_toml_str("asteroid_speed_min = 0.0\nasteroid_speed_max = 0.0")
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidValue {
                name: "asteroid_speed_min",
                ..
            }
        ));
    }

    #[test]
    fn stationary_asteroids_are_rejected_even_with_moving_max() {
        let config = SimConfig {
            asteroid_speed_min: 0.0,
            asteroid_speed_max: 0.03,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn single_fragment_would_not_shrink() {
        let config = SimConfig {
            fragment_count: 1,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidValue { .. })
        ));
    }

    #[test]
    fn degenerate_polygon_is_rejected() {
        let config = SimConfig {
            asteroid_sides: 2,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidCount {
                name: "asteroid_sides",
                ..
            })
        ));
    }
}
