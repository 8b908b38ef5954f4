//! End-to-end flight runs driven through the world

use mini_flight::config::{AppConfig, GameConfig};
use mini_flight::sim::World;
use mini_flight::sim::flight::{FlightControls, Phase};
use mini_flight::sim::obstacle::OBSTACLE_CAPACITY;

const FRAME_SECS: f32 = 1.0 / 60.0;

fn seeded_world(seed: u64, tweak: impl FnOnce(&mut GameConfig)) -> World {
    let mut config = GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    };
    tweak(&mut config);
    World::with_flight(config)
}

fn set_controls(world: &mut World, thrust: bool, confirm: bool) {
    if let Some(flight) = world.flight_mut() {
        flight.apply_controls(FlightControls { thrust, confirm });
    }
}

/// Ticks until the run ends or the frame budget runs out
fn fly_until_terminal(world: &mut World, max_frames: usize, thrust: impl Fn(usize) -> bool) {
    for frame in 0..max_frames {
        set_controls(world, thrust(frame), false);
        world.tick(FRAME_SECS);
        if world.flight().unwrap().phase().is_terminal() {
            break;
        }
    }
}

#[test]
fn test_distance_never_increases_and_flags_stay_exclusive() {
    let mut world = seeded_world(3, |_| {});
    let mut last_distance = world.flight().unwrap().distance_left();

    for frame in 0..3_000 {
        set_controls(&mut world, frame % 4 == 0, false);
        world.tick(FRAME_SECS);

        let flight = world.flight().unwrap();
        assert!(flight.distance_left() <= last_distance);
        assert!(flight.distance_left() >= 0.0);
        assert!(!(flight.is_game_over() && flight.is_victory()));
        assert!(flight.obstacles().len() <= OBSTACLE_CAPACITY);
        last_distance = flight.distance_left();
    }
}

#[test]
fn test_short_course_without_obstacles_is_won() {
    let mut world = seeded_world(11, |config| {
        config.arena.total_distance = 200.0;
        // Nothing spawns before the finish line
        config.pacing.spawn_interval_ms = 1.0e9;
        config.pacing.min_spawn_interval_ms = 1.0e9;
    });

    fly_until_terminal(&mut world, 10_000, |frame| frame % 3 == 0);

    let flight = world.flight().unwrap();
    assert_eq!(flight.phase(), Phase::Victory);
    assert_eq!(flight.distance_left(), 0.0);
    assert_eq!(flight.progress(), 1.0);
    assert!(flight.obstacles().is_empty());
}

#[test]
fn test_terminal_run_freezes_until_confirmed() {
    let mut world = seeded_world(5, |config| {
        config.arena.total_distance = 100.0;
        config.pacing.spawn_interval_ms = 1.0e9;
        config.pacing.min_spawn_interval_ms = 1.0e9;
    });
    fly_until_terminal(&mut world, 10_000, |_| false);
    assert!(world.flight().unwrap().is_victory());

    let craft_y = world.flight().unwrap().craft().y;
    for _ in 0..30 {
        set_controls(&mut world, true, false);
        world.tick(FRAME_SECS);
    }
    let flight = world.flight().unwrap();
    assert!(flight.is_victory());
    assert_eq!(flight.craft().y, craft_y);

    set_controls(&mut world, false, true);
    let flight = world.flight().unwrap();
    assert_eq!(flight.phase(), Phase::Running);
    assert_eq!(flight.runs_started(), 2);
    assert_eq!(flight.distance_left(), 100.0);
}

#[test]
fn test_confirm_is_ignored_mid_run() {
    let mut world = seeded_world(8, |_| {});
    for _ in 0..10 {
        set_controls(&mut world, true, true);
        world.tick(FRAME_SECS);
    }

    let flight = world.flight().unwrap();
    assert_eq!(flight.runs_started(), 1);
    assert!(flight.distance_left() < flight.config().arena.total_distance);
}

#[test]
fn test_same_seed_same_run() {
    let run = |seed: u64| {
        let mut world = seeded_world(seed, |_| {});
        fly_until_terminal(&mut world, 2_000, |frame| frame % 5 < 2);
        let flight = world.flight().unwrap();
        (
            flight.phase(),
            flight.distance_left(),
            flight.craft().y,
            flight.obstacles().len(),
        )
    };

    assert_eq!(run(21), run(21));
}

#[test]
fn test_long_frames_are_clamped() {
    let mut clamped = seeded_world(2, |_| {});
    let mut capped = seeded_world(2, |_| {});

    // A half-second hitch covers no more ground than one maximum-length step
    clamped.tick(0.5);
    capped.tick(0.048);

    assert_eq!(
        clamped.flight().unwrap().distance_left(),
        capped.flight().unwrap().distance_left()
    );
}

#[test]
fn test_hostile_profile_still_flies() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("hostile.toml"),
        "[game.craft]\nceiling_y = 500.0\nmax_vertical_speed = -7.0\n\n\
         [game.pacing]\nmax_frame_ms = -1.0\n",
    )
    .unwrap();

    let config = AppConfig::load_from(Some(dir.path()), "hostile").unwrap();
    assert!(!config.game.is_playable());

    let config = config.into_playable();
    assert_eq!(config.game, GameConfig::default());

    let mut world = World::with_flight(config.game);
    for frame in 0..120 {
        set_controls(&mut world, frame % 2 == 0, false);
        world.tick(FRAME_SECS);
    }
    let flight = world.flight().unwrap();
    let craft = &flight.config().craft;
    assert!(flight.craft().y >= craft.ceiling_y);
    assert!(flight.distance_left() < flight.config().arena.total_distance);
}
