//! Character-cell downsampling of scenes for terminal output.

use glam::Vec2;

use crate::Scene;

const PLAYER_GLYPH: char = '@';
const GOAL_GLYPH: char = 'O';
const SIGNAL_GLYPH: char = '+';
const WALL_GLYPH: char = '#';
const FLOOR_GLYPH: char = ' ';

/// Renders `scene` as `rows` lines of `columns` characters.
///
/// Each character covers a block of maze cells. A block shows the goal, the
/// player or the signal marker when its centre falls inside that circle, and a
/// wall when any of its cells is a wall. The win banner is appended as a final
/// line once the session has finished.
#[must_use]
pub fn render_text(scene: &Scene, columns: u32, rows: u32) -> String {
    let maze = &scene.maze;
    if columns == 0 || rows == 0 || maze.width == 0 || maze.height == 0 {
        return String::new();
    }

    let mut lines = Vec::with_capacity(rows as usize + 1);
    for row in 0..rows {
        let (top, bottom) = block_span(row, rows, maze.height);
        let mut line = String::with_capacity(columns as usize);
        for column in 0..columns {
            let (left, right) = block_span(column, columns, maze.width);
            let centre = Vec2::new(
                (left + right) as f32 / 2.0 - 0.5,
                (top + bottom) as f32 / 2.0 - 0.5,
            );

            let glyph = if scene.goal.contains(centre) {
                GOAL_GLYPH
            } else if scene.player.contains(centre) {
                PLAYER_GLYPH
            } else if scene
                .signal_marker
                .is_some_and(|marker| marker.contains(centre))
            {
                SIGNAL_GLYPH
            } else if (top..bottom).any(|y| (left..right).any(|x| maze.is_wall(x, y))) {
                WALL_GLYPH
            } else {
                FLOOR_GLYPH
            };
            line.push(glyph);
        }
        lines.push(line);
    }

    if let Some(banner) = scene.banner() {
        lines.push(banner);
    }
    lines.join("\n")
}

/// Half-open range of cells covered by block `index` out of `blocks`.
///
/// Blocks never come out empty, even when there are more blocks than cells.
fn block_span(index: u32, blocks: u32, cells: u32) -> (u32, u32) {
    let start = (u64::from(index) * u64::from(cells) / u64::from(blocks)) as u32;
    let end = (u64::from(index + 1) * u64::from(cells) / u64::from(blocks)) as u32;
    (start.min(cells - 1), end.max(start + 1).min(cells))
}
