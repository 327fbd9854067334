#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for the neck maze.
//!
//! The [`World`] owns the occupancy grid, the player, the goal and the session
//! clock. Adapters mutate it exclusively through [`apply`] and observe it
//! through the [`query`] module.

pub mod maze;
pub mod player;
pub mod sampler;

use std::time::Duration;

use neck_maze_core::{Command, Event, MazeConfig, Position, SessionState, Signal};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

pub use maze::Maze;
pub use player::Player;
pub use sampler::{sample_free_position, MAX_SAMPLING_ATTEMPTS};

/// Errors raised while setting up a session.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// Every cell of the maze is blocked, so nothing can be placed.
    #[error("maze has no navigable free space")]
    NoNavigableSpace,
    /// An explicitly requested position is a wall or lies outside the maze.
    #[error("position ({}, {}) is blocked", .position.x(), .position.y())]
    BlockedPosition {
        /// Position that failed validation.
        position: Position,
    },
}

/// Target region the player is trying to reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Goal {
    position: Position,
    radius: u32,
}

impl Goal {
    /// Creates a goal centred at `position`.
    #[must_use]
    pub const fn at(position: Position, radius: u32) -> Self {
        Self { position, radius }
    }

    /// Centre of the goal region.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Radius of the goal region.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }
}

/// Represents the authoritative state of one maze session.
#[derive(Clone, Debug)]
pub struct World {
    maze: Maze,
    player: Player,
    goal: Goal,
    state: SessionState,
    clock: Duration,
    elapsed: Option<Duration>,
    last_signal: Option<Signal>,
}

impl World {
    /// Builds the maze described by `config` and samples player and goal.
    ///
    /// Player and goal are drawn independently, so they may start arbitrarily
    /// close to each other.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NoNavigableSpace`] when the maze has no free cell.
    pub fn new<R>(config: &MazeConfig, rng: &mut R) -> Result<Self, WorldError>
    where
        R: Rng + ?Sized,
    {
        let maze = Maze::from_config(config);
        let player = Player::spawn(&maze, config.player_radius, rng)?;
        let goal = Goal::at(sample_free_position(&maze, rng)?, config.goal_radius);
        Ok(Self::assemble(maze, player, goal))
    }

    /// Creates a session with explicitly placed player and goal.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::BlockedPosition`] when either position is not a
    /// free cell of `maze`.
    pub fn from_parts(maze: Maze, player: Player, goal: Goal) -> Result<Self, WorldError> {
        for position in [player.position(), goal.position()] {
            if maze.is_occupied(position) {
                return Err(WorldError::BlockedPosition { position });
            }
        }
        Ok(Self::assemble(maze, player, goal))
    }

    fn assemble(maze: Maze, player: Player, goal: Goal) -> Self {
        info!(
            width = maze.width(),
            height = maze.height(),
            player = ?player.position(),
            goal = ?goal.position(),
            "maze session started"
        );
        Self {
            maze,
            player,
            goal,
            state: SessionState::Running,
            clock: Duration::ZERO,
            elapsed: None,
            last_signal: None,
        }
    }

    fn goal_reached(&self) -> bool {
        let reach = f64::from(self.player.radius()) + f64::from(self.goal.radius());
        self.player.position().distance(self.goal.position()) < reach
    }
}

/// Applies the provided command to the world.
///
/// Once the session has finished every command is ignored and no events are
/// emitted.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.state == SessionState::Finished {
        return;
    }

    match command {
        Command::Tick { dt, signal } => {
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });

            world.last_signal = signal;
            if let Some(signal) = signal {
                advance_player(world, signal, out_events);
            }

            if world.goal_reached() {
                world.state = SessionState::Finished;
                world.elapsed = Some(world.clock);
                info!(elapsed_ms = world.clock.as_millis(), "goal reached");
                out_events.push(Event::GoalReached {
                    elapsed: world.clock,
                });
            }
        }
    }
}

fn advance_player(world: &mut World, signal: Signal, out_events: &mut Vec<Event>) {
    let from = world.player.position();
    if world.player.propose_move(&world.maze, signal) {
        let to = world.player.position();
        if to != from {
            out_events.push(Event::PlayerMoved { from, to });
        }
        return;
    }

    let Some(target) = signal.clamp_to(world.maze.width(), world.maze.height()) else {
        return;
    };
    debug!(?target, "move rejected by wall");
    out_events.push(Event::MoveRejected { target });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use neck_maze_core::{SessionState, Signal};

    use super::{Goal, Maze, Player, World};

    /// Provides read-only access to the occupancy grid.
    #[must_use]
    pub fn maze(world: &World) -> &Maze {
        &world.maze
    }

    /// Current player snapshot.
    #[must_use]
    pub fn player(world: &World) -> Player {
        world.player
    }

    /// Goal snapshot.
    #[must_use]
    pub fn goal(world: &World) -> Goal {
        world.goal
    }

    /// Lifecycle state of the session.
    #[must_use]
    pub fn state(world: &World) -> SessionState {
        world.state
    }

    /// Reports whether the goal has been reached.
    #[must_use]
    pub fn is_finished(world: &World) -> bool {
        world.state == SessionState::Finished
    }

    /// Time it took to reach the goal, absent while the session is running.
    #[must_use]
    pub fn elapsed(world: &World) -> Option<Duration> {
        world.elapsed
    }

    /// [`elapsed`] expressed in fractional seconds.
    #[must_use]
    pub fn elapsed_seconds(world: &World) -> Option<f64> {
        world.elapsed.map(|elapsed| elapsed.as_secs_f64())
    }

    /// Signal delivered with the most recent processed tick.
    #[must_use]
    pub fn last_signal(world: &World) -> Option<Signal> {
        world.last_signal
    }
}
