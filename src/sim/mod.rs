//! Game simulation module
//!
//! Handles game state, logic, physics, and entities. Nothing in here knows
//! about windows, input devices or the GPU.

pub mod collision;
pub mod craft;
pub mod flight;
pub mod obstacle;
pub mod pacing;

use std::any::Any;

use crate::config::GameConfig;
use flight::FlightSimulation;

/// Trait that all game simulations must implement
///
/// This allows the World to contain and manage multiple different game systems
/// in a pluggable way. Each simulation is responsible for its own state and logic.
pub trait Simulation {
    /// Updates the simulation by one tick
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last tick in seconds
    fn tick(&mut self, delta_time: f32);

    /// Resets the simulation to its initial state
    fn reset(&mut self);

    /// Returns the name/identifier of this simulation
    fn name(&self) -> &str;

    /// Returns true if the simulation is currently active
    fn is_active(&self) -> bool {
        true
    }

    /// Allows downcasting to concrete types for specific operations
    fn as_any(&self) -> &dyn Any;

    /// Mutable version of as_any for type-safe mutable access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Game world state
pub struct World {
    /// Total number of simulation ticks elapsed
    tick_count: u64,
    /// Total simulation time elapsed in seconds
    sim_time: f64,
    /// Time scale multiplier (1.0 = normal speed, 0.0 = paused, 2.0 = 2x speed)
    time_scale: f32,
    /// Whether the simulation is paused
    paused: bool,
    /// Random number generator seed
    rng_seed: u64,
    /// Collection of all active simulations
    simulations: Vec<Box<dyn Simulation>>,
}

impl World {
    /// Creates a new game world with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world running the flight game
    ///
    /// The configured seed wins over the world's random one.
    pub fn with_flight(config: GameConfig) -> Self {
        let mut world = Self::new();
        if let Some(seed) = config.seed {
            world.rng_seed = seed;
        }
        let seed = world.rng_seed;
        world.add_simulation(Box::new(FlightSimulation::new(config, seed)));
        world
    }

    /// Builder method to set a specific RNG seed
    ///
    /// Only simulations added afterwards pick up the new seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Builder method to set the time scale
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale.max(0.0);
        self
    }

    /// Updates the world simulation by one tick
    pub fn tick(&mut self, delta_time: f32) {
        if self.paused {
            return;
        }

        let scaled_delta = delta_time * self.time_scale;
        self.tick_count += 1;
        self.sim_time += scaled_delta as f64;

        for sim in &mut self.simulations {
            if sim.is_active() {
                sim.tick(scaled_delta);
            }
        }
    }

    /// Returns the current tick count
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns the total simulation time in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Sets the time scale multiplier
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Returns the current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns the RNG seed
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Adds a simulation to the world
    pub fn add_simulation(&mut self, sim: Box<dyn Simulation>) {
        self.simulations.push(sim);
    }

    /// Returns a reference to all simulations
    pub fn simulations(&self) -> &[Box<dyn Simulation>] {
        &self.simulations
    }

    /// Gets a typed reference to a specific simulation
    ///
    /// # Example
    /// ```ignore
    /// if let Some(flight) = world.get_simulation_typed::<FlightSimulation>("flight") {
    ///     // Use FlightSimulation-specific methods
    /// }
    /// ```
    pub fn get_simulation_typed<T: 'static>(&self, name: &str) -> Option<&T> {
        self.simulations
            .iter()
            .find(|s| s.name() == name)
            .and_then(|s| s.as_any().downcast_ref::<T>())
    }

    /// Gets a mutable typed reference to a specific simulation
    pub fn get_simulation_typed_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.simulations
            .iter_mut()
            .find(|s| s.name() == name)
            .and_then(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// The flight game, if this world runs one
    pub fn flight(&self) -> Option<&FlightSimulation> {
        self.get_simulation_typed(FlightSimulation::NAME)
    }

    pub fn flight_mut(&mut self) -> Option<&mut FlightSimulation> {
        self.get_simulation_typed_mut(FlightSimulation::NAME)
    }

    /// Resets all simulations to their initial state
    pub fn reset_all_simulations(&mut self) {
        for sim in &mut self.simulations {
            sim.reset();
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self {
            tick_count: 0,
            sim_time: 0.0,
            time_scale: 1.0,
            paused: false,
            rng_seed: rand::random(),
            simulations: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flight::{FlightControls, Phase};

    #[test]
    fn test_world_exposes_flight() {
        let mut world = World::with_flight(GameConfig::default());
        assert_eq!(world.simulations().len(), 1);
        assert!(world.flight().is_some());

        world.tick(1.0 / 60.0);
        assert_eq!(world.tick_count(), 1);
        let flight = world.flight().unwrap();
        assert!(flight.difficulty() > 1.0);
        assert!(flight.distance_left() < 12_000.0);
    }

    #[test]
    fn test_pause_freezes_simulations() {
        let mut world = World::with_flight(GameConfig::default());
        world.pause();
        world.tick(0.016);

        assert_eq!(world.tick_count(), 0);
        assert_eq!(world.flight().unwrap().difficulty(), 1.0);

        world.toggle_pause();
        world.tick(0.016);
        assert_eq!(world.tick_count(), 1);
    }

    #[test]
    fn test_time_scale_scales_delta() {
        let mut world = World::new().with_time_scale(2.0);
        world.tick(0.5);
        assert!((world.sim_time() - 1.0).abs() < 1e-9);

        world.set_time_scale(-1.0);
        assert_eq!(world.time_scale(), 0.0);
    }

    #[test]
    fn test_seeded_worlds_are_deterministic() {
        let run = |seed: u64| {
            let mut world = World::new().with_seed(seed);
            world.add_simulation(Box::new(FlightSimulation::new(
                GameConfig::default(),
                world.rng_seed(),
            )));
            for _ in 0..600 {
                world.tick(1.0 / 60.0);
            }
            let flight = world.flight().unwrap();
            flight
                .obstacles()
                .iter()
                .map(|o| (o.x, o.y, o.kind))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_configured_seed_overrides_random_seed() {
        let config = GameConfig {
            seed: Some(99),
            ..GameConfig::default()
        };
        assert_eq!(World::with_flight(config).rng_seed(), 99);
    }

    #[test]
    fn test_reset_all_restarts_flight() {
        let mut world = World::with_flight(GameConfig::default());
        if let Some(flight) = world.flight_mut() {
            flight.apply_controls(FlightControls {
                thrust: true,
                confirm: false,
            });
        }
        for _ in 0..30 {
            world.tick(1.0 / 60.0);
        }

        world.reset_all_simulations();

        let flight = world.flight().unwrap();
        assert_eq!(flight.phase(), Phase::Running);
        assert_eq!(flight.difficulty(), 1.0);
        assert_eq!(flight.runs_started(), 2);
    }
}
