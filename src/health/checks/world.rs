//! Game world/simulation health check

use crate::config::GameConfig;
use crate::health::check::{CheckResult, Details, SystemCheck};
use crate::sim::World;
use crate::sim::flight::FlightControls;

const FRAME_SECS: f32 = 1.0 / 60.0;

/// Smoke-runs a flight inside a fresh world: ticking, spawning, restart,
/// pause and time scale
pub struct WorldCheck {
    seed: u64,
}

impl WorldCheck {
    pub fn new() -> Self {
        Self { seed: 7 }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for WorldCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for WorldCheck {
    fn name(&self) -> &'static str {
        "World/Simulation"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates world initialization and a short flight run")
    }

    fn check(&self) -> CheckResult {
        let mut details = Details::new();
        let mut world = World::with_flight(GameConfig {
            seed: Some(self.seed),
            ..GameConfig::default()
        });

        if world.tick_count() != 0 || world.sim_time() != 0.0 {
            details.fail("Fresh world should start at tick 0");
            return details.finish("World initialization failed");
        }
        let Some(flight) = world.flight() else {
            details.fail("Flight simulation not registered");
            return details.finish("World initialization failed");
        };
        details.ok(format!(
            "World initialized (seed {}, distance {})",
            world.rng_seed(),
            flight.distance_left()
        ));

        // Pulse thrust so the craft hovers while the first spawn interval elapses
        let mut spawned = 0;
        for frame in 0..90 {
            if let Some(flight) = world.flight_mut() {
                flight.apply_controls(FlightControls {
                    thrust: frame % 3 == 0,
                    confirm: false,
                });
            }
            world.tick(FRAME_SECS);
            if world.flight().is_some_and(|f| f.last_report().spawned.is_some()) {
                spawned += 1;
            }
        }
        if world.tick_count() != 90 {
            details.fail(format!("Expected 90 ticks, counted {}", world.tick_count()));
        } else {
            details.ok(format!("Ticked 90 frames ({:.2}s)", world.sim_time()));
        }

        match world.flight() {
            Some(flight)
                if spawned > 0
                    && flight.distance_left() < flight.config().arena.total_distance =>
            {
                details.ok(format!(
                    "Flight advancing: {spawned} spawn(s), {:.1}% progress, phase {:?}",
                    flight.progress() * 100.0,
                    flight.phase()
                ));
            }
            Some(_) => details.fail("Flight did not spawn obstacles or cover distance"),
            None => details.fail("Flight simulation disappeared"),
        }

        world.reset_all_simulations();
        match world.flight() {
            Some(flight) if flight.runs_started() == 2 && flight.obstacles().is_empty() => {
                details.ok("Restart clears obstacles and counts the run");
            }
            _ => details.fail("Restart did not reset the run"),
        }

        world.pause();
        let paused_at = world.tick_count();
        world.tick(FRAME_SECS);
        if world.is_paused() && world.tick_count() == paused_at {
            details.ok("Pause state: working");
        } else {
            details.fail("Paused world still ticked");
        }

        world.resume();
        world.set_time_scale(2.0);
        if world.time_scale() == 2.0 {
            details.ok("Time scale: working");
        } else {
            details.fail("Time scale not applied");
        }

        let message = if details.status().is_fail() {
            "World simulation checks failed"
        } else {
            "All world systems operational"
        };
        details.finish(message)
    }
}

