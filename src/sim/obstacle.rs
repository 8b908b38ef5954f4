//! Scrolling obstacles and the fixed-capacity field that holds them

use rand::Rng;

use super::collision::Aabb;
use crate::config::ArenaConfig;

/// Maximum number of live obstacles
pub const OBSTACLE_CAPACITY: usize = 128;

/// Obstacles are dropped once their right edge passes this x coordinate
const DESPAWN_EDGE: f32 = -10.0;

/// Obstacle type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Cloud,
    Bird,
    StormColumn,
}

impl ObstacleKind {
    /// Maps a uniform roll in `[0, 1)` to a type: 55% cloud, 30% bird, 15% storm column
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.55 {
            Self::Cloud
        } else if roll < 0.85 {
            Self::Bird
        } else {
            Self::StormColumn
        }
    }

    /// Horizontal speed relative to the world speed
    pub fn speed_multiplier(self) -> f32 {
        match self {
            Self::Cloud => 1.0,
            Self::Bird => 1.35,
            Self::StormColumn => 1.1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::Bird => "bird",
            Self::StormColumn => "storm column",
        }
    }
}

/// A single obstacle in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Draws a new obstacle of the given kind just past the right edge of the arena
    pub fn spawn(
        kind: ObstacleKind,
        world_speed: f32,
        arena: &ArenaConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let (w, h, y) = match kind {
            ObstacleKind::Cloud => {
                let w = 90.0 + rng.random_range(0..80u32) as f32;
                let h = 50.0 + rng.random_range(0..30u32) as f32;
                let y = 60.0 + rng.random_range(0..240u32) as f32;
                (w, h, y)
            }
            ObstacleKind::Bird => {
                let y = 100.0 + rng.random_range(0..260u32) as f32;
                (44.0, 28.0, y)
            }
            ObstacleKind::StormColumn => {
                let h = 120.0 + rng.random_range(0..120u32) as f32;
                let from_top = rng.random_bool(0.5);
                let y = if from_top { 40.0 } else { arena.ground_y - h };
                (50.0, h, y)
            }
        };

        let x = arena.width + 40.0 + rng.random_range(0..120u32) as f32;

        Self {
            x,
            y,
            w,
            h,
            speed: world_speed * kind.speed_multiplier(),
            kind,
        }
    }

    /// Full collision rectangle
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.w, self.h)
    }

    /// Returns true once the obstacle has fully left the screen on the left
    pub fn is_off_screen(&self) -> bool {
        self.x + self.w <= DESPAWN_EDGE
    }
}

/// Ordered, fixed-capacity obstacle collection
///
/// Iteration order is spawn order; removal keeps the relative order of the
/// survivors.
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::with_capacity(OBSTACLE_CAPACITY),
        }
    }

    /// Appends an obstacle, returning false when the field is full
    pub fn push(&mut self, obstacle: Obstacle) -> bool {
        if self.is_full() {
            return false;
        }
        self.obstacles.push(obstacle);
        true
    }

    /// Rolls a type and appends a freshly drawn obstacle
    ///
    /// Returns the spawned kind, or `None` when the field is full and the
    /// spawn was dropped.
    pub fn spawn(
        &mut self,
        world_speed: f32,
        arena: &ArenaConfig,
        rng: &mut impl Rng,
    ) -> Option<ObstacleKind> {
        if self.is_full() {
            return None;
        }
        let kind = ObstacleKind::from_roll(rng.random::<f32>());
        let obstacle = Obstacle::spawn(kind, world_speed, arena, rng);
        self.push(obstacle).then_some(kind)
    }

    /// Moves every obstacle left by its own speed times `step`
    pub fn scroll(&mut self, step: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= obstacle.speed * step;
        }
    }

    /// Drops obstacles that have fully left the screen, returning how many went
    pub fn retain_visible(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_off_screen());
        before - self.obstacles.len()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.obstacles.len() >= OBSTACLE_CAPACITY
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn obstacle_at(x: f32, w: f32) -> Obstacle {
        Obstacle {
            x,
            y: 100.0,
            w,
            h: 20.0,
            speed: 1.0,
            kind: ObstacleKind::Bird,
        }
    }

    #[test]
    fn test_kind_thresholds() {
        assert_eq!(ObstacleKind::from_roll(0.0), ObstacleKind::Cloud);
        assert_eq!(ObstacleKind::from_roll(0.5499), ObstacleKind::Cloud);
        assert_eq!(ObstacleKind::from_roll(0.55), ObstacleKind::Bird);
        assert_eq!(ObstacleKind::from_roll(0.8499), ObstacleKind::Bird);
        assert_eq!(ObstacleKind::from_roll(0.85), ObstacleKind::StormColumn);
        assert_eq!(ObstacleKind::from_roll(0.9999), ObstacleKind::StormColumn);
    }

    #[test]
    fn test_cloud_keeps_world_speed() {
        let mut rng = StdRng::seed_from_u64(7);
        let cloud = Obstacle::spawn(ObstacleKind::Cloud, 4.2, &ArenaConfig::default(), &mut rng);
        assert_eq!(cloud.speed, 4.2);
    }

    #[test]
    fn test_spawn_distributions_stay_in_range() {
        let arena = ArenaConfig::default();
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..500 {
            let cloud = Obstacle::spawn(ObstacleKind::Cloud, 4.2, &arena, &mut rng);
            assert!((90.0..170.0).contains(&cloud.w));
            assert!((50.0..80.0).contains(&cloud.h));
            assert!((60.0..300.0).contains(&cloud.y));

            let bird = Obstacle::spawn(ObstacleKind::Bird, 4.2, &arena, &mut rng);
            assert_eq!((bird.w, bird.h), (44.0, 28.0));
            assert!((100.0..360.0).contains(&bird.y));
            assert!((bird.speed - 4.2 * 1.35).abs() < 1e-5);

            let storm = Obstacle::spawn(ObstacleKind::StormColumn, 4.2, &arena, &mut rng);
            assert_eq!(storm.w, 50.0);
            assert!((120.0..240.0).contains(&storm.h));
            assert!(storm.y == 40.0 || storm.y == arena.ground_y - storm.h);

            for o in [cloud, bird, storm] {
                assert!(o.x >= arena.width + 40.0 && o.x < arena.width + 160.0);
            }
        }
    }

    #[test]
    fn test_field_never_exceeds_capacity() {
        let arena = ArenaConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        let mut field = ObstacleField::new();

        for _ in 0..OBSTACLE_CAPACITY {
            assert!(field.spawn(4.2, &arena, &mut rng).is_some());
        }
        assert!(field.is_full());

        // Further spawns are dropped silently
        for _ in 0..10 {
            assert_eq!(field.spawn(4.2, &arena, &mut rng), None);
            assert_eq!(field.len(), OBSTACLE_CAPACITY);
        }
        assert!(!field.push(obstacle_at(0.0, 10.0)));
    }

    #[test]
    fn test_retain_visible_preserves_order() {
        let mut field = ObstacleField::new();
        field.push(obstacle_at(100.0, 10.0));
        field.push(obstacle_at(-30.0, 10.0)); // right edge at -20, gone
        field.push(obstacle_at(200.0, 10.0));
        field.push(obstacle_at(-20.0, 10.0)); // right edge exactly at -10, gone
        field.push(obstacle_at(-15.0, 10.0)); // right edge at -5, stays

        assert_eq!(field.retain_visible(), 2);

        let xs: Vec<f32> = field.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![100.0, 200.0, -15.0]);
    }

    #[test]
    fn test_scroll_uses_individual_speed() {
        let mut field = ObstacleField::new();
        let mut fast = obstacle_at(500.0, 10.0);
        fast.speed = 2.0;
        field.push(obstacle_at(500.0, 10.0));
        field.push(fast);

        field.scroll(3.2);

        let xs: Vec<f32> = field.iter().map(|o| o.x).collect();
        assert!((xs[0] - (500.0 - 3.2)).abs() < 1e-4);
        assert!((xs[1] - (500.0 - 6.4)).abs() < 1e-4);
    }
}
