//! Occupancy grid rasterized from wall segments.

use neck_maze_core::{MazeConfig, Position, WallSegment};

/// Immutable occupancy grid describing which cells are blocked by walls.
///
/// Cells are stored row-major. The grid is built once and never mutated, so a
/// shared reference can be handed to any number of readers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Maze {
    /// Rasterizes `walls` at `stroke_thickness` onto an initially free grid.
    ///
    /// A thickness of zero or one draws a single-cell hairline. Wider strokes
    /// stamp a square brush reaching `stroke_thickness / 2` cells to each side
    /// of the centre line. Wall cells falling outside the grid are clipped.
    #[must_use]
    pub fn new(width: u32, height: u32, walls: &[WallSegment], stroke_thickness: u32) -> Self {
        let capacity_u64 = u64::from(width) * u64::from(height);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut maze = Self {
            width,
            height,
            cells: vec![false; capacity],
        };

        let reach = i64::from(stroke_thickness / 2);
        for wall in walls {
            for (x, y) in line_points(wall.start(), wall.end()) {
                maze.stamp(x, y, reach);
            }
        }
        maze
    }

    /// Builds the maze described by a session configuration.
    #[must_use]
    pub fn from_config(config: &MazeConfig) -> Self {
        Self::new(
            config.width,
            config.height,
            &config.walls,
            config.stroke_thickness,
        )
    }

    /// Reports whether the position is blocked.
    ///
    /// Anything outside `[0, width) x [0, height)` counts as blocked, so callers
    /// never need a separate bounds check.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(true)
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row-major occupancy flags, `true` meaning blocked.
    #[must_use]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Iterates over every free cell in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| !**occupied)
            .filter_map(move |(index, _)| {
                let index = u32::try_from(index).ok()?;
                Some(Position::new(index % width, index / width))
            })
    }

    fn stamp(&mut self, x: i64, y: i64, reach: i64) {
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let (Ok(cx), Ok(cy)) = (u32::try_from(x + dx), u32::try_from(y + dy)) else {
                    continue;
                };
                if let Some(index) = self.index(Position::new(cx, cy)) {
                    self.cells[index] = true;
                }
            }
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.x() < self.width && position.y() < self.height {
            let row = usize::try_from(position.y()).ok()?;
            let column = usize::try_from(position.x()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Cells visited by Bresenham's line algorithm between two endpoints, inclusive.
fn line_points(start: Position, end: Position) -> Vec<(i64, i64)> {
    let (x0, y0) = (i64::from(start.x()), i64::from(start.y()));
    let (x1, y1) = (i64::from(end.x()), i64::from(end.y()));

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut points = Vec::new();
    let (mut x, mut y) = (x0, y0);
    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    points
}
