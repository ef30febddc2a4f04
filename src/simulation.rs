//! Simulation state, driver operations and the Bevy plugin that runs them.
//!
//! [`Simulation`] owns both object populations plus the viewport and pause
//! flag.  Everything that changes the field goes through four operations:
//!
//! | Operation      | Trigger                       | Effect                                   |
//! |----------------|-------------------------------|------------------------------------------|
//! | `tick`         | every `tick_interval_secs`    | advance + wrap asteroids, age bursts     |
//! | `click`        | [`SimCommand::Click`]         | shatter the first asteroid under a point |
//! | `toggle_pause` | [`SimCommand::TogglePause`]   | freeze / unfreeze every live object      |
//! | `reset`        | [`SimCommand::Reset`], startup | reseed a fresh asteroid field            |
//!
//! ## Systems (registered by `SimulationPlugin`)
//!
//! | System                  | Schedule | Purpose                                   |
//! |-------------------------|----------|-------------------------------------------|
//! | `load_sim_config`       | Startup  | read `assets/asteroids.toml`              |
//! | `seed_simulation`       | Startup  | seed the random source, initial reset     |
//! | `apply_commands_system` | Update   | drain [`SimCommand`] messages             |
//! | `tick_system`           | Update   | run fixed-interval ticks from frame time  |
//!
//! The plugin needs no window or renderer, so it runs under `MinimalPlugins`.

use crate::asteroid::Asteroid;
use crate::config::{load_sim_config, SimConfig};
use crate::geometry::Point;
use crate::particles::ParticleSystem;
use crate::population::{Direction, Population, Visit};
use crate::random::SimRng;
use crate::viewport::Viewport;
use bevy::prelude::*;
use rand::Rng;

// ── Messages ──────────────────────────────────────────────────────────────────

/// Requests from the input layer, applied in arrival order.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum SimCommand {
    /// Click at a world-space point.
    Click(Point),
    TogglePause,
    Reset,
}

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Running counters since the last reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub ticks: u64,
    pub asteroids_destroyed: u32,
    pub fragments_spawned: u32,
    pub bursts_spawned: u32,
    pub bursts_expired: u32,
}

/// Result of a click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// The simulation is paused; clicks do nothing.
    Ignored,
    /// No asteroid under the point.
    Miss,
    /// An asteroid at `location` was destroyed and replaced by `fragments`
    /// children (0 for a last-generation asteroid) plus one particle burst.
    Hit { location: Point, fragments: usize },
}

// ── Simulation state ──────────────────────────────────────────────────────────

/// The whole simulated field.
#[derive(Resource, Debug, Clone, Default)]
pub struct Simulation {
    asteroids: Population<Asteroid>,
    particles: Population<ParticleSystem>,
    viewport: Viewport,
    is_paused: bool,
    last_click: Option<Point>,
    next_id: u64,
    stats: SimulationStats,
}

impl Simulation {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn asteroids(&self) -> &Population<Asteroid> {
        &self.asteroids
    }

    pub fn particles(&self) -> &Population<ParticleSystem> {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn last_click(&self) -> Option<Point> {
        self.last_click
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    /// Add an asteroid to the field, giving it a fresh id.
    pub fn insert_asteroid(&mut self, mut asteroid: Asteroid) {
        self.next_id += 1;
        asteroid.assign_id(self.next_id);
        self.asteroids.insert(asteroid);
    }

    pub fn insert_particle_system(&mut self, burst: ParticleSystem) {
        self.particles.insert(burst);
    }

    /// Drop everything and seed `initial_asteroid_count` asteroids at random
    /// points inside the viewport.  The field starts unpaused.
    pub fn reset<R: Rng + ?Sized>(&mut self, config: &SimConfig, rng: &mut R) {
        self.asteroids.clear();
        self.particles.clear();
        self.is_paused = false;
        self.last_click = None;
        self.stats = SimulationStats::default();

        for _ in 0..config.initial_asteroid_count {
            let location = self.viewport.random_point(rng);
            let mut asteroid = Asteroid::new(config.initial_radius_range(), config, rng);
            asteroid.move_to(location);
            self.insert_asteroid(asteroid);
        }
    }

    /// Advance the field by one tick.
    ///
    /// Asteroids spin, drift and wrap; bursts advance with
    /// `particle_blur_passes` extra sub-steps and are dropped once their display
    /// budget is spent.  Paused objects hold still.
    pub fn tick<R: Rng + ?Sized>(&mut self, config: &SimConfig, rng: &mut R) {
        let Viewport { width, height, .. } = self.viewport;
        self.asteroids.each(Direction::Backward, |asteroid| {
            asteroid.advance();
            asteroid.wrap_at_bounds(height, width);
            Visit::Continue
        });

        let blur_passes = config.particle_blur_passes;
        let mut expired = 0;
        self.particles.each(Direction::Forward, |burst| {
            if burst.advance(blur_passes, &mut *rng) {
                Visit::Continue
            } else {
                expired += 1;
                Visit::Remove
            }
        });

        self.stats.ticks += 1;
        self.stats.bursts_expired += expired;
    }

    /// Shatter the first asteroid (from the head) whose click radius covers
    /// `point`.
    ///
    /// The hit asteroid is removed; if it can still explode its fragments
    /// join the field, and a particle burst always spawns at its location.
    /// At most one asteroid is hit per click.  Clicks while paused are
    /// ignored.
    pub fn click<R: Rng + ?Sized>(
        &mut self,
        point: Point,
        config: &SimConfig,
        rng: &mut R,
    ) -> ClickOutcome {
        self.last_click = Some(point);
        if self.is_paused {
            return ClickOutcome::Ignored;
        }

        let mut debris: Option<(Point, Vec<Asteroid>, ParticleSystem)> = None;
        self.asteroids.each(Direction::Forward, |asteroid| {
            if !asteroid.hit_test(point) {
                return Visit::Continue;
            }
            let fragments = if asteroid.can_explode() {
                asteroid.spawn_fragments(config, &mut *rng)
            } else {
                Vec::new()
            };
            let burst = asteroid.spawn_particle_burst(config, &mut *rng);
            debris = Some((asteroid.location(), fragments, burst));
            Visit::RemoveAndStop
        });

        let Some((location, fragments, burst)) = debris else {
            return ClickOutcome::Miss;
        };

        let fragment_count = fragments.len();
        for fragment in fragments {
            self.insert_asteroid(fragment);
        }
        self.insert_particle_system(burst);

        self.stats.asteroids_destroyed += 1;
        self.stats.fragments_spawned += fragment_count as u32;
        self.stats.bursts_spawned += 1;

        ClickOutcome::Hit {
            location,
            fragments: fragment_count,
        }
    }

    /// Flip the pause flag and push it to every live asteroid and burst.
    /// Returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.is_paused = !self.is_paused;
        let paused = self.is_paused;
        self.asteroids.each(Direction::Forward, |asteroid| {
            asteroid.set_paused(paused);
            Visit::Continue
        });
        self.particles.each(Direction::Forward, |burst| {
            burst.set_paused(paused);
            Visit::Continue
        });
        paused
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Accumulates frame time until a whole tick interval has passed.
#[derive(Resource, Debug, Default)]
pub struct TickClock {
    pub accumulated_secs: f32,
}

/// Registers the simulation resources, the [`SimCommand`] message and the
/// startup / per-frame systems.  Headless-safe.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimConfig>()
            .init_resource::<SimRng>()
            .init_resource::<Simulation>()
            .init_resource::<TickClock>()
            .add_message::<SimCommand>()
            .add_systems(Startup, (load_sim_config, seed_simulation).chain())
            .add_systems(Update, (apply_commands_system, tick_system).chain());
    }
}

/// Startup system: seed the random source from the loaded config and build
/// the initial asteroid field.
pub fn seed_simulation(
    config: Res<SimConfig>,
    mut rng: ResMut<SimRng>,
    mut sim: ResMut<Simulation>,
) {
    *rng = SimRng::from_seed(config.seed);
    sim.reset(&config, &mut rng.0);
    info!(
        "[SETUP] Seeded {} asteroids (seed: {:?})",
        sim.asteroids().len(),
        config.seed
    );
}

/// Apply every pending [`SimCommand`] in order.
pub fn apply_commands_system(
    mut requests: MessageReader<SimCommand>,
    config: Res<SimConfig>,
    mut rng: ResMut<SimRng>,
    mut sim: ResMut<Simulation>,
) {
    for request in requests.read() {
        match *request {
            SimCommand::Click(point) => match sim.click(point, &config, &mut rng.0) {
                ClickOutcome::Hit {
                    location,
                    fragments,
                } => debug!(
                    "Asteroid shattered at ({:.3}, {:.3}) into {} fragments; {} remain",
                    location.x,
                    location.y,
                    fragments,
                    sim.asteroids().len()
                ),
                ClickOutcome::Miss => {}
                ClickOutcome::Ignored => debug!("Click ignored while paused"),
            },
            SimCommand::TogglePause => {
                let paused = sim.toggle_pause();
                info!("Simulation {}", if paused { "paused" } else { "resumed" });
            }
            SimCommand::Reset => {
                let before = sim.stats();
                sim.reset(&config, &mut rng.0);
                info!(
                    "Simulation reset ({} destroyed, {} bursts since last reset)",
                    before.asteroids_destroyed, before.bursts_spawned
                );
            }
        }
    }
}

/// Run as many fixed-interval ticks as the elapsed frame time allows, capped
/// at `max_ticks_per_frame` so a long stall does not fast-forward the field.
pub fn tick_system(
    time: Res<Time>,
    config: Res<SimConfig>,
    mut clock: ResMut<TickClock>,
    mut rng: ResMut<SimRng>,
    mut sim: ResMut<Simulation>,
) {
    clock.accumulated_secs += time.delta_secs();

    let mut ticks = 0;
    while clock.accumulated_secs >= config.tick_interval_secs && ticks < config.max_ticks_per_frame
    {
        clock.accumulated_secs -= config.tick_interval_secs;
        sim.tick(&config, &mut rng.0);
        ticks += 1;
    }

    if ticks == config.max_ticks_per_frame {
        clock.accumulated_secs = clock.accumulated_secs.min(config.tick_interval_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> (Simulation, SimConfig, StdRng) {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let mut sim = Simulation::new(Viewport::from_window_size(1000.0, 750.0));
        sim.reset(&config, &mut rng);
        (sim, config, rng)
    }

    #[test]
    fn reset_seeds_twelve_unpaused_asteroids_inside_viewport() {
        let (sim, _, _) = seeded();
        assert_eq!(sim.asteroids().len(), 12);
        assert!(sim.particles().is_empty());
        assert!(!sim.is_paused());
        for asteroid in sim.asteroids() {
            assert!(!asteroid.is_paused());
            assert!(sim.viewport().contains(asteroid.location()));
            assert_eq!(asteroid.radius_range().min, 0.1);
            assert_eq!(asteroid.radius_range().max, 0.2);
        }
    }

    #[test]
    fn asteroid_ids_are_unique() {
        let (sim, _, _) = seeded();
        let mut ids: Vec<u64> = sim.asteroids().iter().map(Asteroid::id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 12);
        assert!(!ids.contains(&0));
    }

    #[test]
    fn click_on_center_shatters_into_three_and_one_burst() {
        let (mut sim, config, mut rng) = seeded();
        let target = sim.asteroids().peek_head().clone();
        assert_eq!(target.explode_count(), 2);

        let outcome = sim.click(target.location(), &config, &mut rng);

        assert_eq!(
            outcome,
            ClickOutcome::Hit {
                location: target.location(),
                fragments: 3
            }
        );
        assert_eq!(sim.asteroids().len(), 12 - 1 + 3);
        assert!(sim.asteroids().iter().all(|a| a.id() != target.id()));
        let fragments: Vec<&Asteroid> = sim.asteroids().iter().take(3).collect();
        assert!(fragments.iter().all(|a| a.explode_count() == 1));

        assert_eq!(sim.particles().len(), 1);
        assert_eq!(sim.particles().peek_head().location(), target.location());
        assert_eq!(sim.last_click(), Some(target.location()));
    }

    #[test]
    fn last_generation_leaves_only_a_burst() {
        let (mut sim, config, mut rng) = seeded();
        let mut spent = Asteroid::new(config.initial_radius_range(), &config, &mut rng);
        spent.move_to(Point::new(5.0, 5.0));
        // Two generations of shattering leave explode_count at zero.
        let child = spent.spawn_fragments(&config, &mut rng).remove(0);
        let mut grandchild = child.spawn_fragments(&config, &mut rng).remove(0);
        grandchild.move_to(Point::new(5.0, 5.0));
        assert!(!grandchild.can_explode());
        sim.insert_asteroid(grandchild);

        let outcome = sim.click(Point::new(5.0, 5.0), &config, &mut rng);

        assert!(matches!(outcome, ClickOutcome::Hit { fragments: 0, .. }));
        assert_eq!(sim.asteroids().len(), 12);
        assert_eq!(sim.particles().len(), 1);
        assert_eq!(sim.stats().fragments_spawned, 0);
    }

    #[test]
    fn stationary_field_never_reaches_a_click() {
        let toml = "asteroid_speed_min = 0.0\nasteroid_speed_max = 0.0\n";
        assert!(SimConfig::from_toml_str(toml).is_err());

        let config = SimConfig::from_toml_str(
            "asteroid_speed_min = 0.000001\nasteroid_speed_max = 0.000001\n",
        )
        .expect("slowest moving field is valid");
        let mut rng = StdRng::seed_from_u64(11);
        let mut sim = Simulation::new(Viewport::default());
        sim.reset(&config, &mut rng);

        let target = sim.asteroids().peek_head().location();
        let outcome = sim.click(target, &config, &mut rng);
        assert!(matches!(outcome, ClickOutcome::Hit { fragments: 3, .. }));
    }

    #[test]
    fn click_on_empty_space_misses() {
        let (mut sim, config, mut rng) = seeded();
        let outcome = sim.click(Point::new(100.0, 100.0), &config, &mut rng);
        assert_eq!(outcome, ClickOutcome::Miss);
        assert_eq!(sim.asteroids().len(), 12);
        assert!(sim.particles().is_empty());
    }

    #[test]
    fn only_one_asteroid_is_hit_per_click() {
        let (mut sim, config, mut rng) = seeded();
        for _ in 0..3 {
            let mut stacked = Asteroid::new(config.initial_radius_range(), &config, &mut rng);
            stacked.move_to(Point::new(9.0, 9.0));
            sim.insert_asteroid(stacked);
        }
        sim.click(Point::new(9.0, 9.0), &config, &mut rng);
        let still_there = sim
            .asteroids()
            .iter()
            .filter(|a| a.location() == Point::new(9.0, 9.0))
            .count();
        assert_eq!(still_there, 2);
        assert_eq!(sim.stats().asteroids_destroyed, 1);
    }

    #[test]
    fn clicks_are_ignored_while_paused() {
        let (mut sim, config, mut rng) = seeded();
        sim.toggle_pause();
        let target = sim.asteroids().peek_head().location();
        assert_eq!(
            sim.click(target, &config, &mut rng),
            ClickOutcome::Ignored
        );
        assert_eq!(sim.asteroids().len(), 12);
    }

    #[test]
    fn pause_freezes_asteroids_and_bursts() {
        let (mut sim, config, mut rng) = seeded();
        let target = sim.asteroids().peek_head().location();
        sim.click(target, &config, &mut rng);
        sim.tick(&config, &mut rng);

        assert!(sim.toggle_pause());
        assert!(sim.asteroids().iter().all(Asteroid::is_paused));
        assert!(sim.particles().iter().all(ParticleSystem::is_paused));

        let frozen = sim.clone();
        for _ in 0..5 {
            sim.tick(&config, &mut rng);
        }
        for (now, then) in sim.asteroids().iter().zip(frozen.asteroids().iter()) {
            assert_eq!(now.location(), then.location());
            assert_eq!(now.rotation_degrees(), then.rotation_degrees());
        }
        assert_eq!(sim.particles().peek_head().display_count(), 1);

        assert!(!sim.toggle_pause());
        assert!(sim.asteroids().iter().all(|a| !a.is_paused()));
    }

    #[test]
    fn tick_moves_every_asteroid_by_its_velocity() {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut sim = Simulation::new(Viewport::from_window_size(1000.0, 750.0));
        let mut a = Asteroid::new(config.initial_radius_range(), &config, &mut rng);
        a.move_to(Point::ZERO);
        let expected = a.velocity().as_vec2();
        sim.insert_asteroid(a);

        sim.tick(&config, &mut rng);
        let moved = sim.asteroids().peek_head();
        assert!(moved.location().distance(expected) < 1e-6);
        assert_eq!(moved.rotation_degrees(), moved.rotation_increment());
    }

    #[test]
    fn tick_wraps_escaped_asteroids() {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(4);
        let mut sim = Simulation::new(Viewport::from_window_size(1000.0, 750.0));
        let mut a = Asteroid::new(config.initial_radius_range(), &config, &mut rng);
        a.move_to(Point::new(0.0, 10.0));
        sim.insert_asteroid(a);

        sim.tick(&config, &mut rng);
        let y = sim.asteroids().peek_head().location().y;
        assert!(y < 0.0, "asteroid above the top edge should reappear below, y = {y}");
    }

    #[test]
    fn bursts_are_dropped_after_their_display_budget() {
        let (mut sim, config, mut rng) = seeded();
        let target = sim.asteroids().peek_head().location();
        sim.click(target, &config, &mut rng);

        for _ in 0..100 {
            sim.tick(&config, &mut rng);
        }
        assert_eq!(sim.particles().len(), 1, "budget spent but not yet reported");
        assert!(sim.particles().peek_head().is_expired());

        sim.tick(&config, &mut rng);
        assert!(sim.particles().is_empty());
        assert_eq!(sim.stats().bursts_expired, 1);
    }

    #[test]
    fn reset_clears_bursts_and_pause() {
        let (mut sim, config, mut rng) = seeded();
        let target = sim.asteroids().peek_head().location();
        sim.click(target, &config, &mut rng);
        sim.toggle_pause();

        sim.reset(&config, &mut rng);
        assert_eq!(sim.asteroids().len(), 12);
        assert!(sim.particles().is_empty());
        assert!(!sim.is_paused());
        assert_eq!(sim.stats(), SimulationStats::default());
    }
}
