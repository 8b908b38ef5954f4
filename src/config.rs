//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.
//! Every section carries serde defaults, so a missing file or key falls back
//! to the stock game tuning.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
    /// Whether to enable vsync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Mini Flight".to_string(),
            width: 960.0,
            height: 540.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
            vsync: true,
        }
    }
}

/// Renderer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Skip the hardware tiers and go straight to the software adapter
    pub force_software: bool,
}

/// Playfield dimensions in logical pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    /// Y coordinate of the ground line
    pub ground_y: f32,
    /// Distance the craft has to cover to win
    pub total_distance: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
            ground_y: 460.0,
            total_distance: 12_000.0,
        }
    }
}

/// Player craft physics
///
/// Gravity, thrust and velocities are expressed per reference frame
/// (see [`PacingConfig::reference_frame_ms`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftConfig {
    pub gravity: f32,
    pub thrust: f32,
    pub max_vertical_speed: f32,
    /// Multiplier applied to velocities when moving things on screen
    pub motion_scale: f32,
    /// Highest point the craft may reach
    pub ceiling_y: f32,
    /// Lowest point is `ground_y - ground_clearance`
    pub ground_clearance: f32,
    /// Horizontal craft position as a fraction of the arena width
    pub x_ratio: f32,
    pub hitbox_width: f32,
    pub hitbox_height: f32,
    /// Fraction of the hitbox kept for collision tests
    pub hitbox_shrink: f32,
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            gravity: 0.38,
            thrust: 0.8,
            max_vertical_speed: 7.0,
            motion_scale: 3.2,
            ceiling_y: 60.0,
            ground_clearance: 20.0,
            x_ratio: 0.22,
            hitbox_width: 60.0,
            hitbox_height: 36.0,
            hitbox_shrink: 0.8,
        }
    }
}

/// Difficulty, spawn and distance curves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub base_speed: f32,
    /// Difficulty gained per elapsed millisecond
    pub difficulty_rate: f32,
    /// World speed gained per point of difficulty, relative to base speed
    pub speed_gain: f32,
    pub spawn_interval_ms: f32,
    pub min_spawn_interval_ms: f32,
    /// Spawn interval lost per point of difficulty
    pub spawn_interval_drop_ms: f32,
    /// Distance covered per second at the start of a run
    pub start_pace: f32,
    /// Distance covered per second at the end of a run
    pub end_pace: f32,
    /// Upper bound on a single simulation step
    pub max_frame_ms: f32,
    /// Frame length the per-frame physics constants were tuned for
    pub reference_frame_ms: f32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            base_speed: 4.2,
            difficulty_rate: 0.000_45,
            speed_gain: 0.35,
            spawn_interval_ms: 1100.0,
            min_spawn_interval_ms: 580.0,
            spawn_interval_drop_ms: 160.0,
            start_pace: 120.0,
            end_pace: 160.0,
            max_frame_ms: 48.0,
            reference_frame_ms: 16.6667,
        }
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub arena: ArenaConfig,
    pub craft: CraftConfig,
    pub pacing: PacingConfig,
    /// Fixed RNG seed for reproducible runs; random when unset
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Problems that would make a run unplayable or stall the frame update
    ///
    /// NaN values are reported as well.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let (arena, craft, pacing) = (&self.arena, &self.craft, &self.pacing);
        let floor_y = arena.ground_y - craft.ground_clearance;

        if arena.total_distance.is_nan() || arena.total_distance <= 0.0 {
            problems.push(format!(
                "total_distance must be positive (got {})",
                arena.total_distance
            ));
        }
        if pacing.reference_frame_ms.is_nan() || pacing.reference_frame_ms <= 0.0 {
            problems.push(format!(
                "reference_frame_ms must be positive (got {})",
                pacing.reference_frame_ms
            ));
        }
        if pacing.max_frame_ms.is_nan() || pacing.max_frame_ms < 0.0 {
            problems.push(format!(
                "max_frame_ms must not be negative (got {})",
                pacing.max_frame_ms
            ));
        }
        if craft.max_vertical_speed.is_nan() || craft.max_vertical_speed < 0.0 {
            problems.push(format!(
                "max_vertical_speed must not be negative (got {})",
                craft.max_vertical_speed
            ));
        }
        if pacing.min_spawn_interval_ms > pacing.spawn_interval_ms {
            problems.push(format!(
                "min_spawn_interval_ms ({}) exceeds spawn_interval_ms ({})",
                pacing.min_spawn_interval_ms, pacing.spawn_interval_ms
            ));
        }
        if craft.ceiling_y.is_nan() || floor_y.is_nan() || craft.ceiling_y >= floor_y {
            problems.push(format!(
                "ceiling_y ({}) leaves no room above the floor ({floor_y})",
                craft.ceiling_y
            ));
        }
        problems
    }

    pub fn is_playable(&self) -> bool {
        self.problems().is_empty()
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Renderer configuration
    #[serde(default)]
    pub renderer: RendererConfig,
    /// Gameplay tuning
    #[serde(default)]
    pub game: GameConfig,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_WINDOW__WIDTH=1920)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir();
        Self::load_from(config_dir.as_deref(), profile)
    }

    /// Loads a profile from an explicit config directory
    ///
    /// With `None` the profile is looked up relative to the working directory.
    pub fn load_from(config_dir: Option<&Path>, profile: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(dir) = config_dir {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        // Use __ as separator for nested fields (e.g., APP_GAME__PACING__BASE_SPEED)
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }
}

impl AppConfig {
    /// Replaces unplayable gameplay tuning with the stock tuning
    ///
    /// The seed survives the swap.
    pub fn into_playable(mut self) -> Self {
        let problems = self.game.problems();
        if !problems.is_empty() {
            warn!(
                profile = %self.profile,
                problems = %problems.join("; "),
                "Gameplay tuning is unplayable, using default tuning"
            );
            self.game = GameConfig {
                seed: self.game.seed,
                ..GameConfig::default()
            };
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self {
            profile: "release".to_string(),
            window: WindowConfig::default(),
            renderer: RendererConfig::default(),
            game: GameConfig::default(),
        })
    }
}
