//! Difficulty and distance curves

use crate::config::PacingConfig;

/// Difficulty at the start of a run
pub const INITIAL_DIFFICULTY: f32 = 1.0;

/// Hermite ease, `3t² - 2t³`, with `t` clamped to `[0, 1]`
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Scroll speed for the given difficulty
pub fn world_speed(difficulty: f32, pacing: &PacingConfig) -> f32 {
    pacing.base_speed * (1.0 + (difficulty - INITIAL_DIFFICULTY) * pacing.speed_gain)
}

/// Milliseconds between spawns for the given difficulty
pub fn spawn_interval_ms(difficulty: f32, pacing: &PacingConfig) -> f32 {
    (pacing.spawn_interval_ms - (difficulty - INITIAL_DIFFICULTY) * pacing.spawn_interval_drop_ms)
        .max(pacing.min_spawn_interval_ms)
}

/// Distance covered per second at the given progress (`0.0..=1.0`)
pub fn distance_pace(progress: f32, pacing: &PacingConfig) -> f32 {
    pacing.start_pace + (pacing.end_pace - pacing.start_pace) * smoothstep(progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(-3.0), 0.0);
        assert_eq!(smoothstep(7.0), 1.0);
    }

    #[test]
    fn test_world_speed_grows_with_difficulty() {
        let pacing = PacingConfig::default();
        assert_eq!(world_speed(1.0, &pacing), 4.2);
        assert!((world_speed(2.0, &pacing) - 4.2 * 1.35).abs() < 1e-5);
        assert!(world_speed(3.0, &pacing) > world_speed(2.0, &pacing));
    }

    #[test]
    fn test_spawn_interval_shrinks_to_floor() {
        let pacing = PacingConfig::default();
        assert_eq!(spawn_interval_ms(1.0, &pacing), 1100.0);
        assert_eq!(spawn_interval_ms(2.0, &pacing), 940.0);
        assert_eq!(spawn_interval_ms(10.0, &pacing), 580.0);
        assert_eq!(spawn_interval_ms(1000.0, &pacing), 580.0);
    }

    #[test]
    fn test_distance_pace_eases_between_bounds() {
        let pacing = PacingConfig::default();
        assert_eq!(distance_pace(0.0, &pacing), 120.0);
        assert_eq!(distance_pace(0.5, &pacing), 140.0);
        assert_eq!(distance_pace(1.0, &pacing), 160.0);
    }
}
