//! Scene generation for the flight game
//!
//! Turns the current simulation state into a flat list of colored rectangles
//! in painter's order. Pure function of state plus elapsed time; the GPU side
//! only ever sees the resulting [`Scene`].

use crate::sim::flight::{FlightSimulation, Phase};
use crate::sim::obstacle::ObstacleKind;

const STAR_COUNT: u32 = 80;
const VICTORY_STAR_COUNT: u32 = 40;

/// sRGB color with straight alpha, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear RGBA for an sRGB render target
    pub fn to_linear(self) -> [f32; 4] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a as f32 / 255.0,
        ]
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        let [r, g, b, a] = self.to_linear();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub mod palette {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(16, 10, 32);
    pub const STAR: Color = Color::rgba(255, 255, 255, 70);
    pub const CLOUD: Color = Color::rgba(255, 255, 255, 46);
    pub const BIRD: Color = Color::rgba(255, 216, 225, 255);
    pub const STORM: Color = Color::rgba(184, 123, 255, 64);
    pub const CRAFT_BODY: Color = Color::rgb(230, 212, 255);
    pub const CRAFT_NOSE: Color = Color::rgb(184, 123, 255);
    pub const CRAFT_WINDOW: Color = Color::rgb(59, 44, 95);
    pub const PROGRESS_TRACK: Color = Color::rgba(255, 255, 255, 30);
    pub const PROGRESS_FILL: Color = Color::rgb(184, 123, 255);
    pub const GAME_OVER_SHADE: Color = Color::rgba(0, 0, 0, 130);
    pub const VICTORY_BACKGROUND: Color = Color::rgb(43, 23, 79);
    pub const VICTORY_STAR: Color = Color::rgba(255, 134, 166, 180);
    pub const FIGURE_A: Color = Color::rgb(90, 58, 133);
    pub const FIGURE_B: Color = Color::rgb(255, 143, 177);
    pub const ARMS: Color = Color::rgb(255, 214, 234);
}

/// Filled axis-aligned rectangle in logical pixels (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: Color,
}

impl Quad {
    pub fn new(x: f32, y: f32, w: f32, h: f32, color: Color) -> Self {
        Self { x, y, w, h, color }
    }

    /// A single 1x1 pixel
    pub fn point(x: f32, y: f32, color: Color) -> Self {
        Self::new(x, y, 1.0, 1.0, color)
    }
}

/// Everything drawn in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub clear: Color,
    pub quads: Vec<Quad>,
}

/// Obstacle fill color by type
pub fn obstacle_color(kind: ObstacleKind) -> Color {
    match kind {
        ObstacleKind::Cloud => palette::CLOUD,
        ObstacleKind::Bird => palette::BIRD,
        ObstacleKind::StormColumn => palette::STORM,
    }
}

/// Builds the scene for the current state
///
/// `t_ms` is wall-clock time since startup and only animates the victory
/// scene.
pub fn build_scene(sim: &FlightSimulation, t_ms: u64) -> Scene {
    let arena = &sim.config().arena;
    let (width, height) = (arena.width, arena.height);

    if sim.phase() == Phase::Victory {
        return victory_scene(width, height, t_ms);
    }

    let mut quads = Vec::with_capacity(STAR_COUNT as usize * 2 + sim.obstacles().len() + 6);

    push_starfield(&mut quads, width, height);

    for obstacle in sim.obstacles().iter() {
        quads.push(Quad::new(
            obstacle.x,
            obstacle.y,
            obstacle.w,
            obstacle.h,
            obstacle_color(obstacle.kind),
        ));
    }

    push_craft(&mut quads, sim.craft_x(), sim.craft().y);
    push_progress(&mut quads, width, height, sim.progress());

    if sim.phase() == Phase::GameOver {
        quads.push(Quad::new(0.0, 0.0, width, height, palette::GAME_OVER_SHADE));
    }

    Scene {
        clear: palette::BACKGROUND,
        quads,
    }
}

fn push_starfield(quads: &mut Vec<Quad>, width: f32, height: f32) {
    let w = width as u32;
    let band = (height as u32).saturating_sub(160).max(1);
    if w == 0 {
        return;
    }
    for i in 0..STAR_COUNT {
        let x = ((i * 97) % w) as f32;
        let y = ((i * 53) % band + 20) as f32;
        quads.push(Quad::point(x, y, palette::STAR));
        quads.push(Quad::point(x + 1.0, y, palette::STAR));
    }
}

fn push_craft(quads: &mut Vec<Quad>, x0: f32, y: f32) {
    quads.push(Quad::new(x0 - 30.0, y - 14.0, 60.0, 28.0, palette::CRAFT_BODY));
    quads.push(Quad::new(x0 + 18.0, y - 12.0, 20.0, 24.0, palette::CRAFT_NOSE));
    quads.push(Quad::new(x0 + 2.0, y - 6.0, 18.0, 12.0, palette::CRAFT_WINDOW));
}

fn push_progress(quads: &mut Vec<Quad>, width: f32, height: f32, progress: f32) {
    let track_w = width - 40.0;
    let y = height - 28.0;
    quads.push(Quad::new(20.0, y, track_w, 10.0, palette::PROGRESS_TRACK));
    quads.push(Quad::new(
        20.0,
        y,
        track_w * progress.clamp(0.0, 1.0),
        10.0,
        palette::PROGRESS_FILL,
    ));
}

fn victory_scene(width: f32, height: f32, t_ms: u64) -> Scene {
    let mut quads = Vec::with_capacity(VICTORY_STAR_COUNT as usize + 4);

    let w = (width as u64).max(1);
    let band = (height as u64).saturating_sub(200).max(1);
    let drift = t_ms / 30;
    for i in 0..VICTORY_STAR_COUNT as u64 {
        let x = ((i * 137 + drift) % w) as f32;
        let y = ((i * 71) % band + 40) as f32;
        quads.push(Quad::point(x, y, palette::VICTORY_STAR));
    }

    let (cx, cy) = (width / 2.0, height / 2.0);
    quads.push(Quad::new(cx - 60.0, cy - 20.0, 44.0, 64.0, palette::FIGURE_A));
    quads.push(Quad::new(cx + 16.0, cy - 20.0, 44.0, 64.0, palette::FIGURE_B));
    quads.push(Quad::new(cx - 56.0, cy + 6.0, 56.0, 10.0, palette::ARMS));
    quads.push(Quad::new(cx + 4.0, cy + 6.0, 56.0, 10.0, palette::ARMS));

    Scene {
        clear: palette::VICTORY_BACKGROUND,
        quads,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    const FRAME_MS: f32 = 16.6667;

    fn count(scene: &Scene, color: Color) -> usize {
        scene.quads.iter().filter(|q| q.color == color).count()
    }

    /// The fill shares its color with the craft nose but is drawn after it
    fn progress_fill(scene: &Scene) -> Quad {
        *scene
            .quads
            .iter()
            .rev()
            .find(|q| q.color == palette::PROGRESS_FILL)
            .unwrap()
    }

    #[test]
    fn test_running_scene_layout() {
        let sim = FlightSimulation::new(GameConfig::default(), 1);
        let scene = build_scene(&sim, 0);

        assert_eq!(scene.clear, palette::BACKGROUND);
        assert_eq!(count(&scene, palette::STAR), 160);
        assert_eq!(count(&scene, palette::CRAFT_BODY), 1);
        assert_eq!(progress_fill(&scene).w, 0.0);
        assert_eq!(count(&scene, palette::GAME_OVER_SHADE), 0);

        let body = scene
            .quads
            .iter()
            .find(|q| q.color == palette::CRAFT_BODY)
            .unwrap();
        assert!((body.x - (960.0 * 0.22 - 30.0)).abs() < 1e-3);
        assert_eq!(body.y, 270.0 - 14.0);
    }

    #[test]
    fn test_stars_stay_in_band() {
        let sim = FlightSimulation::new(GameConfig::default(), 1);
        let scene = build_scene(&sim, 0);
        for star in scene.quads.iter().filter(|q| q.color == palette::STAR) {
            assert!(star.x >= 0.0 && star.x <= 960.0);
            assert!(star.y >= 20.0 && star.y < 400.0);
        }
    }

    #[test]
    fn test_progress_bar_tracks_distance() {
        let mut config = GameConfig::default();
        config.arena.total_distance = 1_000.0;
        let mut sim = FlightSimulation::new(config, 1);
        // Stop before the first spawn so nothing can end the run
        for _ in 0..50 {
            sim.step(FRAME_MS);
        }
        assert_eq!(sim.phase(), Phase::Running);

        let fill = progress_fill(&build_scene(&sim, 0));
        let expected = 920.0 * sim.progress();
        assert!(sim.progress() > 0.0);
        assert!((fill.w - expected).abs() < 1e-3);
    }

    #[test]
    fn test_game_over_overlay_is_last() {
        let mut config = GameConfig::default();
        // Obstacles spawn immediately and the craft sinks into a storm column
        config.pacing.spawn_interval_ms = 0.0;
        config.pacing.min_spawn_interval_ms = 0.0;
        let mut sim = FlightSimulation::new(config, 9);
        for _ in 0..10_000 {
            if sim.phase() != Phase::Running {
                break;
            }
            sim.step(FRAME_MS);
        }
        assert_eq!(sim.phase(), Phase::GameOver);

        let scene = build_scene(&sim, 0);
        let last = scene.quads.last().unwrap();
        assert_eq!(last.color, palette::GAME_OVER_SHADE);
        assert_eq!((last.x, last.y, last.w, last.h), (0.0, 0.0, 960.0, 540.0));
        assert_eq!(count(&scene, palette::CRAFT_BODY), 1);
    }

    #[test]
    fn test_victory_replaces_scene() {
        let mut config = GameConfig::default();
        config.arena.total_distance = 1.0;
        let mut sim = FlightSimulation::new(config, 1);
        while sim.phase() == Phase::Running {
            sim.step(FRAME_MS);
        }
        assert!(sim.is_victory());

        let scene = build_scene(&sim, 0);
        assert_eq!(scene.clear, palette::VICTORY_BACKGROUND);
        assert_eq!(scene.quads.len(), 44);
        assert_eq!(count(&scene, palette::CRAFT_BODY), 0);
        assert_eq!(count(&scene, palette::PROGRESS_FILL), 0);
        assert_eq!(count(&scene, palette::ARMS), 2);
    }

    #[test]
    fn test_victory_stars_drift_with_time() {
        let scene_a = victory_scene(960.0, 540.0, 0);
        let scene_b = victory_scene(960.0, 540.0, 300);

        assert_eq!(scene_a.quads[1].x, 137.0);
        assert_eq!(scene_b.quads[1].x, 147.0);
        assert_eq!(scene_a.quads[1].y, scene_b.quads[1].y);
    }

    #[test]
    fn test_srgb_conversion() {
        assert_eq!(Color::rgb(0, 0, 0).to_linear(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Color::rgba(255, 255, 255, 0).to_linear(), [1.0, 1.0, 1.0, 0.0]);
        let mid = Color::rgb(128, 128, 128).to_linear()[0];
        assert!((mid - 0.2158).abs() < 1e-3);
    }
}
