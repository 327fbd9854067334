//! Player marker steered by the tracking signal.

use neck_maze_core::{Position, Signal};
use rand::Rng;

use crate::{maze::Maze, sampler::sample_free_position, WorldError};

/// Player marker with a fixed radius.
///
/// The radius only matters for reaching the goal; wall collisions are tested
/// against the centre cell alone, so the drawn marker may overlap a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    position: Position,
    radius: u32,
}

impl Player {
    /// Places a player on a randomly sampled free cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NoNavigableSpace`] when the maze has no free cell.
    pub fn spawn<R>(maze: &Maze, radius: u32, rng: &mut R) -> Result<Self, WorldError>
    where
        R: Rng + ?Sized,
    {
        let position = sample_free_position(maze, rng)?;
        Ok(Self::at(position, radius))
    }

    /// Creates a player at an explicit position.
    #[must_use]
    pub const fn at(position: Position, radius: u32) -> Self {
        Self { position, radius }
    }

    /// Current location of the player.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Collision and draw radius of the player.
    #[must_use]
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Moves towards `target` if the clamped target is a free cell.
    ///
    /// Returns `true` when the move was committed. A rejected move leaves the
    /// player where it was.
    pub fn propose_move(&mut self, maze: &Maze, target: Signal) -> bool {
        let Some(clamped) = target.clamp_to(maze.width(), maze.height()) else {
            return false;
        };

        if maze.is_occupied(clamped) {
            return false;
        }

        self.position = clamped;
        true
    }
}
