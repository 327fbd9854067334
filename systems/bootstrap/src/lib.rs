#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a neck maze session.

use neck_maze_core::MazeConfig;
use neck_maze_world::{World, WorldError};
use rand::Rng;

/// Starts sessions from a fixed maze configuration.
#[derive(Debug, Default)]
pub struct Bootstrap {
    config: MazeConfig,
}

impl Bootstrap {
    /// Creates a bootstrap system for the provided maze configuration.
    #[must_use]
    pub fn new(config: MazeConfig) -> Self {
        Self { config }
    }

    /// Starts a new session, drawing player and goal positions from `rng`.
    ///
    /// # Errors
    ///
    /// Propagates [`WorldError::NoNavigableSpace`] for a maze without free cells.
    pub fn start<R>(&self, rng: &mut R) -> Result<World, WorldError>
    where
        R: Rng + ?Sized,
    {
        World::new(&self.config, rng)
    }
}
