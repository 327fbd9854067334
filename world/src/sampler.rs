//! Uniform sampling of navigable cells.

use neck_maze_core::Position;
use rand::Rng;
use tracing::debug;

use crate::{maze::Maze, WorldError};

/// Number of uniform draws attempted before falling back to a linear scan.
pub const MAX_SAMPLING_ATTEMPTS: usize = 10_000;

/// Draws a uniformly random free position from the maze.
///
/// Up to [`MAX_SAMPLING_ATTEMPTS`] coordinates are drawn from `rng`; when none
/// of them is free the first free cell in row-major order is returned instead.
///
/// # Errors
///
/// Returns [`WorldError::NoNavigableSpace`] when the maze has no free cell.
pub fn sample_free_position<R>(maze: &Maze, rng: &mut R) -> Result<Position, WorldError>
where
    R: Rng + ?Sized,
{
    if maze.width() == 0 || maze.height() == 0 {
        return Err(WorldError::NoNavigableSpace);
    }

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        let candidate = Position::new(
            rng.gen_range(0..maze.width()),
            rng.gen_range(0..maze.height()),
        );
        if !maze.is_occupied(candidate) {
            return Ok(candidate);
        }
    }

    debug!(
        attempts = MAX_SAMPLING_ATTEMPTS,
        "random sampling exhausted, scanning for a free cell"
    );
    maze.free_cells()
        .next()
        .ok_or(WorldError::NoNavigableSpace)
}
