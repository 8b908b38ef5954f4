//! Axis-aligned rectangle collision

use super::obstacle::Obstacle;

/// Axis-aligned box with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of the given size centered on a point
    pub fn centered(center: [f32; 2], w: f32, h: f32) -> Self {
        Self::new(center[0] - w / 2.0, center[1] - h / 2.0, w, h)
    }

    /// Scales the box by `factor` around its own center
    pub fn shrunk(&self, factor: f32) -> Self {
        let w = self.w * factor;
        let h = self.h * factor;
        Self::new(
            self.x + (self.w - w) / 2.0,
            self.y + (self.h - h) / 2.0,
            w,
            h,
        )
    }

    /// Strict overlap test; boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Returns the index of the first obstacle (in spawn order) hit by `hitbox`
pub fn first_hit(hitbox: &Aabb, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| hitbox.overlaps(&obstacle.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleKind;

    fn cloud(x: f32, y: f32, w: f32, h: f32) -> Obstacle {
        Obstacle {
            x,
            y,
            w,
            h,
            speed: 4.2,
            kind: ObstacleKind::Cloud,
        }
    }

    #[test]
    fn test_shrunk_stays_centered() {
        let full = Aabb::centered([100.0, 50.0], 60.0, 36.0);
        let hitbox = full.shrunk(0.8);

        assert!((hitbox.w - 48.0).abs() < 1e-4);
        assert!((hitbox.h - 28.8).abs() < 1e-4);
        assert!((hitbox.x + hitbox.w / 2.0 - 100.0).abs() < 1e-4);
        assert!((hitbox.y + hitbox.h / 2.0 - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_disjoint_boxes_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Aabb::new(20.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, 20.0, 10.0, 10.0)));
        // Touching edges are not a hit
        assert!(!a.overlaps(&Aabb::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Aabb::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Aabb::new(0.0, 0.0, 200.0, 200.0);
        let inner = Aabb::new(50.0, 50.0, 10.0, 10.0);
        assert!(inner.overlaps(&outer));
        assert!(outer.overlaps(&inner));
    }

    #[test]
    fn test_shrink_forgives_grazing_contact() {
        // The visual box reaches 3 px into the obstacle, the shrunk one does not
        let visual = Aabb::new(0.0, 0.0, 60.0, 36.0);
        let obstacle = cloud(57.0, 0.0, 40.0, 36.0);

        assert!(visual.overlaps(&obstacle.bounds()));
        assert_eq!(first_hit(&visual.shrunk(0.8), &[obstacle]), None);
    }

    #[test]
    fn test_first_hit_reports_spawn_order() {
        let hitbox = Aabb::new(100.0, 100.0, 20.0, 20.0);
        let obstacles = [
            cloud(500.0, 100.0, 50.0, 50.0),
            cloud(90.0, 90.0, 50.0, 50.0),
            cloud(80.0, 80.0, 60.0, 60.0),
        ];
        assert_eq!(first_hit(&hitbox, &obstacles), Some(1));
        assert_eq!(first_hit(&hitbox, &obstacles[..1]), None);
    }
}
