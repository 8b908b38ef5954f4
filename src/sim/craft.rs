//! Player craft altitude physics

use super::collision::Aabb;
use crate::config::{ArenaConfig, CraftConfig};

/// Vertical state of the player craft
///
/// The craft never moves horizontally; its x position is a fixed fraction of
/// the arena width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Craft {
    pub y: f32,
    pub vy: f32,
}

impl Craft {
    /// Craft at rest in the middle of the arena
    pub fn new(arena: &ArenaConfig) -> Self {
        Self {
            y: arena.height * 0.5,
            vy: 0.0,
        }
    }

    /// Advances velocity and position by `frames` reference frames
    ///
    /// Gravity always pulls down (positive y); thrust pushes up while held.
    /// Velocity is clamped to the configured maximum and the position to the
    /// band between the ceiling and the ground clearance.
    pub fn integrate(
        &mut self,
        frames: f32,
        thrusting: bool,
        craft: &CraftConfig,
        arena: &ArenaConfig,
    ) {
        self.vy += craft.gravity * frames;
        if thrusting {
            self.vy -= craft.thrust * frames;
        }
        self.vy = self
            .vy
            .clamp(-craft.max_vertical_speed, craft.max_vertical_speed);

        self.y += self.vy * craft.motion_scale * frames;
        self.y = self.y.clamp(craft.ceiling_y, Self::floor_y(craft, arena));
    }

    /// Lowest y the craft may reach
    pub fn floor_y(craft: &CraftConfig, arena: &ArenaConfig) -> f32 {
        arena.ground_y - craft.ground_clearance
    }

    /// Horizontal center of the craft
    pub fn x(craft: &CraftConfig, arena: &ArenaConfig) -> f32 {
        arena.width * craft.x_ratio
    }

    /// Shrunk collision box around the craft
    pub fn hitbox(&self, craft: &CraftConfig, arena: &ArenaConfig) -> Aabb {
        Aabb::centered(
            [Self::x(craft, arena), self.y],
            craft.hitbox_width,
            craft.hitbox_height,
        )
        .shrunk(craft.hitbox_shrink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_pulls_down() {
        let (craft_cfg, arena) = (CraftConfig::default(), ArenaConfig::default());
        let mut craft = Craft::new(&arena);

        craft.integrate(1.0, false, &craft_cfg, &arena);

        assert!((craft.vy - 0.38).abs() < 1e-6);
        assert!((craft.y - (270.0 + 0.38 * 3.2)).abs() < 1e-4);
    }

    #[test]
    fn test_thrust_outweighs_gravity() {
        let (craft_cfg, arena) = (CraftConfig::default(), ArenaConfig::default());
        let mut craft = Craft::new(&arena);

        craft.integrate(1.0, true, &craft_cfg, &arena);

        assert!((craft.vy - (0.38 - 0.8)).abs() < 1e-6);
        assert!(craft.y < 270.0);
    }

    #[test]
    fn test_velocity_is_clamped() {
        let (craft_cfg, arena) = (CraftConfig::default(), ArenaConfig::default());
        let mut craft = Craft::new(&arena);

        for _ in 0..100 {
            craft.integrate(1.0, false, &craft_cfg, &arena);
        }
        assert_eq!(craft.vy, 7.0);

        for _ in 0..100 {
            craft.integrate(1.0, true, &craft_cfg, &arena);
        }
        assert_eq!(craft.vy, -7.0);
    }

    #[test]
    fn test_extreme_velocity_stays_in_band() {
        let (craft_cfg, arena) = (CraftConfig::default(), ArenaConfig::default());

        let mut craft = Craft::new(&arena);
        craft.vy = -1.0e9;
        craft.integrate(1.0, false, &craft_cfg, &arena);
        assert!(craft.y >= 60.0);

        let mut craft = Craft::new(&arena);
        craft.vy = 1.0e9;
        craft.integrate(1.0, false, &craft_cfg, &arena);
        assert!(craft.y <= 440.0);
    }

    #[test]
    fn test_hitbox_is_centered_on_craft() {
        let (craft_cfg, arena) = (CraftConfig::default(), ArenaConfig::default());
        let craft = Craft::new(&arena);
        let hitbox = craft.hitbox(&craft_cfg, &arena);

        assert!((hitbox.x + hitbox.w / 2.0 - 211.2).abs() < 1e-3);
        assert!((hitbox.y + hitbox.h / 2.0 - 270.0).abs() < 1e-3);
        assert!((hitbox.w - 48.0).abs() < 1e-4);
    }
}
