//! Flight run: the per-frame arcade simulation
//!
//! The craft holds altitude against gravity while obstacles scroll in from
//! the right. Difficulty rises with elapsed time, which speeds up the world
//! and shortens the spawn interval. Covering the full distance wins the run;
//! touching an obstacle ends it.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::Simulation;
use super::collision;
use super::craft::Craft;
use super::obstacle::{ObstacleField, ObstacleKind};
use super::pacing::{self, INITIAL_DIFFICULTY};
use crate::config::GameConfig;

/// Run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
    Victory,
}

impl Phase {
    /// Returns true for game-over and victory
    pub fn is_terminal(self) -> bool {
        !matches!(self, Phase::Running)
    }
}

/// Player controls sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightControls {
    /// Thrust input is held
    pub thrust: bool,
    /// Confirm was pressed this frame
    pub confirm: bool,
}

/// What happened during a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    pub spawned: Option<ObstacleKind>,
    pub despawned: usize,
    /// Index of the obstacle that ended the run
    pub collided_with: Option<usize>,
    pub reached_goal: bool,
}

/// The flight game simulation
pub struct FlightSimulation {
    config: GameConfig,
    rng: StdRng,
    phase: Phase,
    craft: Craft,
    obstacles: ObstacleField,
    thrusting: bool,
    distance_left: f32,
    difficulty: f32,
    world_speed: f32,
    spawn_interval_ms: f32,
    spawn_timer_ms: f32,
    runs_started: u32,
    last_report: FrameReport,
}

impl FlightSimulation {
    pub const NAME: &'static str = "flight";

    /// Creates a new run with the given tuning and RNG seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            phase: Phase::Running,
            craft: Craft::new(&config.arena),
            obstacles: ObstacleField::new(),
            thrusting: false,
            distance_left: config.arena.total_distance,
            difficulty: INITIAL_DIFFICULTY,
            world_speed: pacing::world_speed(INITIAL_DIFFICULTY, &config.pacing),
            spawn_interval_ms: config.pacing.spawn_interval_ms,
            spawn_timer_ms: 0.0,
            runs_started: 1,
            last_report: FrameReport::default(),
            config,
        }
    }

    /// Applies the controls sampled for this frame
    ///
    /// Confirm restarts a finished run and is ignored while running.
    pub fn apply_controls(&mut self, controls: FlightControls) {
        self.thrusting = controls.thrust;
        if controls.confirm && self.phase.is_terminal() {
            self.restart();
        }
    }

    /// Resets all run state and returns to the running phase
    pub fn restart(&mut self) {
        self.reset_run();
        self.runs_started += 1;
        info!(run = self.runs_started, "Run restarted");
    }

    fn reset_run(&mut self) {
        self.phase = Phase::Running;
        self.craft = Craft::new(&self.config.arena);
        self.obstacles.clear();
        self.distance_left = self.config.arena.total_distance;
        self.difficulty = INITIAL_DIFFICULTY;
        self.world_speed = pacing::world_speed(INITIAL_DIFFICULTY, &self.config.pacing);
        self.spawn_interval_ms = self.config.pacing.spawn_interval_ms;
        self.spawn_timer_ms = 0.0;
        self.last_report = FrameReport::default();
    }

    /// Advances the run by `frame_ms` milliseconds
    ///
    /// The step is clamped to the configured maximum. Nothing moves once the
    /// run has reached a terminal phase.
    pub fn step(&mut self, frame_ms: f32) -> FrameReport {
        let mut report = FrameReport::default();
        if self.phase.is_terminal() {
            self.last_report = report;
            return report;
        }

        let pacing_cfg = &self.config.pacing;
        let arena = &self.config.arena;
        let craft_cfg = &self.config.craft;

        let frame_ms = frame_ms.clamp(0.0, pacing_cfg.max_frame_ms);
        let frames = frame_ms / pacing_cfg.reference_frame_ms;

        // Difficulty drives world speed and spawn interval
        self.difficulty += pacing_cfg.difficulty_rate * frame_ms;
        self.world_speed = pacing::world_speed(self.difficulty, pacing_cfg);
        self.spawn_interval_ms = pacing::spawn_interval_ms(self.difficulty, pacing_cfg);

        self.craft
            .integrate(frames, self.thrusting, craft_cfg, arena);

        self.spawn_timer_ms += frame_ms;
        if self.spawn_timer_ms >= self.spawn_interval_ms {
            self.spawn_timer_ms = 0.0;
            report.spawned = self.obstacles.spawn(self.world_speed, arena, &mut self.rng);
            if let Some(kind) = report.spawned {
                debug!(
                    kind = kind.name(),
                    count = self.obstacles.len(),
                    world_speed = self.world_speed,
                    "Spawned obstacle"
                );
            }
        }

        self.obstacles.scroll(craft_cfg.motion_scale * frames);
        report.despawned = self.obstacles.retain_visible();

        let hitbox = self.craft.hitbox(craft_cfg, arena);
        if let Some(index) = collision::first_hit(&hitbox, self.obstacles.as_slice()) {
            report.collided_with = Some(index);
            self.phase = Phase::GameOver;
            info!(
                progress = self.progress(),
                difficulty = self.difficulty,
                "Run ended: collision"
            );
            self.last_report = report;
            return report;
        }

        let pace = pacing::distance_pace(self.progress(), pacing_cfg);
        self.distance_left -= pace * frame_ms / 1000.0;
        if self.distance_left <= 0.0 {
            self.distance_left = 0.0;
            self.phase = Phase::Victory;
            report.reached_goal = true;
            info!(difficulty = self.difficulty, "Run ended: destination reached");
        }

        self.last_report = report;
        report
    }

    // Accessors for rendering and diagnostics

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_victory(&self) -> bool {
        self.phase == Phase::Victory
    }

    pub fn craft(&self) -> &Craft {
        &self.craft
    }

    /// Horizontal center of the craft
    pub fn craft_x(&self) -> f32 {
        Craft::x(&self.config.craft, &self.config.arena)
    }

    pub fn obstacles(&self) -> &ObstacleField {
        &self.obstacles
    }

    pub fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    pub fn distance_left(&self) -> f32 {
        self.distance_left
    }

    /// Fraction of the total distance covered, `0.0..=1.0`
    pub fn progress(&self) -> f32 {
        let total = self.config.arena.total_distance;
        if total <= 0.0 {
            return 1.0;
        }
        ((total - self.distance_left) / total).clamp(0.0, 1.0)
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn world_speed(&self) -> f32 {
        self.world_speed
    }

    pub fn spawn_interval_ms(&self) -> f32 {
        self.spawn_interval_ms
    }

    pub fn spawn_timer_ms(&self) -> f32 {
        self.spawn_timer_ms
    }

    pub fn runs_started(&self) -> u32 {
        self.runs_started
    }

    pub fn last_report(&self) -> FrameReport {
        self.last_report
    }
}

impl Simulation for FlightSimulation {
    fn tick(&mut self, delta_time: f32) {
        self.step(delta_time * 1000.0);
    }

    fn reset(&mut self) {
        self.restart();
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
