use std::time::Duration;

use neck_maze_core::{Command, Event, MazeConfig, Position, SessionState, Signal, WallSegment};
use neck_maze_world::{self as world, query, sample_free_position, Goal, Maze, Player, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const FRAME: Duration = Duration::from_millis(33);

fn reference_maze() -> Maze {
    Maze::from_config(&MazeConfig::default())
}

fn open_world(player: Position, goal: Position) -> World {
    World::from_parts(
        Maze::new(400, 400, &[], 2),
        Player::at(player, 10),
        Goal::at(goal, 20),
    )
    .expect("open maze has free cells")
}

fn tick(world: &mut World, signal: Option<Signal>) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt: FRAME, signal }, &mut events);
    events
}

#[test]
fn positions_outside_the_grid_are_occupied() {
    let maze = reference_maze();
    for position in [
        Position::new(400, 0),
        Position::new(0, 400),
        Position::new(400, 400),
        Position::new(u32::MAX, 17),
        Position::new(17, u32::MAX),
    ] {
        assert!(maze.is_occupied(position), "{position:?} should be blocked");
    }
}

#[test]
fn wall_endpoints_are_occupied() {
    let maze = reference_maze();
    for wall in MazeConfig::default().walls {
        assert!(maze.is_occupied(wall.start()), "{wall:?} start is free");
        assert!(maze.is_occupied(wall.end()), "{wall:?} end is free");
    }
}

#[test]
fn sampled_positions_are_always_free() {
    let maze = reference_maze();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed_cafe);
    for _ in 0..1000 {
        let position = sample_free_position(&maze, &mut rng).expect("reference maze has space");
        assert!(!maze.is_occupied(position), "{position:?} is blocked");
    }
}

#[test]
fn sampled_sessions_start_on_free_cells() {
    let config = MazeConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let world = World::new(&config, &mut rng).expect("session starts");
    let maze = query::maze(&world);

    assert!(!maze.is_occupied(query::player(&world).position()));
    assert!(!maze.is_occupied(query::goal(&world).position()));
    assert_eq!(query::player(&world).radius(), 10);
    assert_eq!(query::goal(&world).radius(), 20);
    assert_eq!(query::state(&world), SessionState::Running);
    assert_eq!(query::elapsed_seconds(&world), None);
}

#[test]
fn session_setup_is_deterministic_for_same_seed() {
    let config = MazeConfig::default();
    let first = World::new(&config, &mut ChaCha8Rng::seed_from_u64(99)).expect("session starts");
    let second = World::new(&config, &mut ChaCha8Rng::seed_from_u64(99)).expect("session starts");

    assert_eq!(query::player(&first), query::player(&second));
    assert_eq!(query::goal(&first), query::goal(&second));
}

#[test]
fn fully_blocked_maze_fails_at_construction() {
    let config = MazeConfig {
        width: 3,
        height: 3,
        walls: vec![WallSegment::between((1, 1), (1, 1))],
        stroke_thickness: 2,
        ..MazeConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let error = World::new(&config, &mut rng).expect_err("no free cell");
    assert_eq!(error.to_string(), "maze has no navigable free space");
}

#[test]
fn signal_onto_wall_is_rejected() {
    let maze = Maze::new(400, 400, &[WallSegment::between((150, 0), (150, 250))], 2);
    let mut world = World::from_parts(
        maze,
        Player::at(Position::new(100, 100), 10),
        Goal::at(Position::new(350, 350), 20),
    )
    .expect("free cells");

    let events = tick(&mut world, Some(Signal::new(150, 100)));

    assert_eq!(query::player(&world).position(), Position::new(100, 100));
    assert!(events.contains(&Event::MoveRejected {
        target: Position::new(150, 100)
    }));
}

#[test]
fn clamped_signal_is_accepted_on_free_cell() {
    let maze = reference_maze();
    assert!(!maze.is_occupied(Position::new(0, 399)));
    let mut world = World::from_parts(
        maze,
        Player::at(Position::new(20, 380), 10),
        Goal::at(Position::new(380, 20), 20),
    )
    .expect("free cells");

    let events = tick(&mut world, Some(Signal::new(-50, 500)));

    assert_eq!(query::player(&world).position(), Position::new(0, 399));
    assert!(events.contains(&Event::PlayerMoved {
        from: Position::new(20, 380),
        to: Position::new(0, 399),
    }));
}

#[test]
fn reaching_the_goal_finishes_the_session() {
    let mut world = open_world(Position::new(100, 100), Position::new(200, 200));

    let events = tick(&mut world, Some(Signal::new(215, 200)));

    assert!(query::is_finished(&world));
    let elapsed = query::elapsed_seconds(&world).expect("finished sessions report time");
    assert!(elapsed >= 0.0);
    assert_eq!(events.last(), Some(&Event::GoalReached { elapsed: FRAME }));
}

#[test]
fn finished_session_ignores_further_ticks() {
    let mut world = open_world(Position::new(100, 100), Position::new(200, 200));
    let _ = tick(&mut world, Some(Signal::new(215, 200)));
    let elapsed = query::elapsed(&world);

    for signal in [None, Some(Signal::new(10, 10)), None] {
        let events = tick(&mut world, signal);
        assert!(events.is_empty());
    }

    assert_eq!(query::player(&world).position(), Position::new(215, 200));
    assert_eq!(query::goal(&world).position(), Position::new(200, 200));
    assert_eq!(query::elapsed(&world), elapsed);
    assert_eq!(query::state(&world), SessionState::Finished);
}

#[test]
fn distant_player_keeps_the_session_running() {
    let mut world = open_world(Position::new(100, 100), Position::new(200, 200));

    let events = tick(&mut world, Some(Signal::new(250, 200)));

    assert!(!query::is_finished(&world));
    assert_eq!(query::elapsed_seconds(&world), None);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::GoalReached { .. })));
}

#[test]
fn touching_radii_do_not_count_as_reaching_the_goal() {
    let mut world = open_world(Position::new(100, 100), Position::new(200, 200));

    let _ = tick(&mut world, Some(Signal::new(230, 200)));
    assert!(!query::is_finished(&world));

    let _ = tick(&mut world, Some(Signal::new(229, 200)));
    assert!(query::is_finished(&world));
}
