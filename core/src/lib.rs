#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the neck maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters translate tracking samples
//! into [`Command`] values, the world executes those commands via its `apply`
//! entry point, and then broadcasts [`Event`] values describing what changed.
//! Nothing in here owns state; every type is a plain value.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Width of the reference maze measured in cells.
pub const REFERENCE_WIDTH: u32 = 400;
/// Height of the reference maze measured in cells.
pub const REFERENCE_HEIGHT: u32 = 400;
/// Stroke thickness used to rasterize reference walls.
pub const REFERENCE_STROKE_THICKNESS: u32 = 2;
/// Radius of the player marker in the reference session.
pub const REFERENCE_PLAYER_RADIUS: u32 = 10;
/// Radius of the goal region in the reference session.
pub const REFERENCE_GOAL_RADIUS: u32 = 20;

/// Lifecycle of a single maze session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// The player is still steering towards the goal.
    #[default]
    Running,
    /// The goal was reached; the session is frozen.
    Finished,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the session by one frame.
    Tick {
        /// Duration of real time that elapsed since the previous tick.
        dt: Duration,
        /// Tracking signal observed during the frame, if the detector found one.
        signal: Option<Signal>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the player committed a move.
    PlayerMoved {
        /// Position the player occupied before moving.
        from: Position,
        /// Position the player occupies after moving.
        to: Position,
    },
    /// Reports that a proposed move landed on a wall and was discarded.
    MoveRejected {
        /// Clamped position the signal pointed at.
        target: Position,
    },
    /// Announces that the player reached the goal and the session finished.
    GoalReached {
        /// Total session time measured up to and including the winning tick.
        elapsed: Duration,
    },
}

/// Outcome of polling the detector for a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sample {
    /// A nose tip was located at the provided frame coordinates.
    Detected(Signal),
    /// The frame was captured but no face was found.
    Missing,
}

impl Sample {
    /// Signal carried by the sample, if any.
    #[must_use]
    pub const fn signal(self) -> Option<Signal> {
        match self {
            Self::Detected(signal) => Some(signal),
            Self::Missing => None,
        }
    }
}

/// Raw two-dimensional point reported by an external tracker.
///
/// Components are signed because detectors happily report points outside the
/// playable area; the world clamps them before use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signal {
    x: i32,
    y: i32,
}

impl Signal {
    /// Creates a new signal from raw tracker coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Clamps the signal componentwise into `[0, width - 1] x [0, height - 1]`.
    ///
    /// Returns `None` for a degenerate area with no cells at all.
    #[must_use]
    pub fn clamp_to(self, width: u32, height: u32) -> Option<Position> {
        if width == 0 || height == 0 {
            return None;
        }

        Some(Position::new(
            clamp_component(self.x, width),
            clamp_component(self.y, height),
        ))
    }
}

fn clamp_component(value: i32, extent: u32) -> u32 {
    let max = i64::from(extent) - 1;
    let clamped = i64::from(value).clamp(0, max);
    u32::try_from(clamped).unwrap_or(0)
}

/// Integer cell coordinate inside the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the position.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row of the position.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Euclidean distance between two positions.
    #[must_use]
    pub fn distance(self, other: Position) -> f64 {
        let dx = f64::from(self.x.abs_diff(other.x));
        let dy = f64::from(self.y.abs_diff(other.y));
        dx.hypot(dy)
    }
}

impl From<Position> for Signal {
    fn from(position: Position) -> Self {
        Self::new(
            i32::try_from(position.x()).unwrap_or(i32::MAX),
            i32::try_from(position.y()).unwrap_or(i32::MAX),
        )
    }
}

/// Straight wall drawn between two endpoints.
///
/// Endpoints may sit on or past the maze border; rasterization clips them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallSegment {
    start: Position,
    end: Position,
}

impl WallSegment {
    /// Creates a wall running from `start` to `end`.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Convenience constructor taking raw endpoint components.
    #[must_use]
    pub const fn between(start: (u32, u32), end: (u32, u32)) -> Self {
        Self::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
    }

    /// First endpoint of the wall.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Second endpoint of the wall.
    #[must_use]
    pub const fn end(&self) -> Position {
        self.end
    }
}

/// Walls of the reference cross-and-box maze.
#[must_use]
pub fn reference_walls() -> Vec<WallSegment> {
    vec![
        WallSegment::between((50, 50), (350, 350)),
        WallSegment::between((50, 350), (350, 50)),
        WallSegment::between((150, 0), (150, 250)),
        WallSegment::between((250, 400), (250, 150)),
        WallSegment::between((0, 150), (150, 150)),
        WallSegment::between((250, 250), (400, 250)),
    ]
}

/// Static configuration of a maze session.
///
/// Missing fields fall back to the reference maze when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Number of columns in the occupancy grid.
    pub width: u32,
    /// Number of rows in the occupancy grid.
    pub height: u32,
    /// Walls rasterized into the grid at construction.
    pub walls: Vec<WallSegment>,
    /// Stroke thickness applied to every wall.
    pub stroke_thickness: u32,
    /// Radius of the player marker.
    pub player_radius: u32,
    /// Radius of the goal region.
    pub goal_radius: u32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_HEIGHT,
            walls: reference_walls(),
            stroke_thickness: REFERENCE_STROKE_THICKNESS,
            player_radius: REFERENCE_PLAYER_RADIUS,
            goal_radius: REFERENCE_GOAL_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MazeConfig, Position, Signal, WallSegment};

    #[test]
    fn clamp_pulls_signal_into_grid() {
        let clamped = Signal::new(-50, 500).clamp_to(400, 400);
        assert_eq!(clamped, Some(Position::new(0, 399)));
    }

    #[test]
    fn clamp_keeps_inside_signal_untouched() {
        let clamped = Signal::new(12, 34).clamp_to(400, 400);
        assert_eq!(clamped, Some(Position::new(12, 34)));
    }

    #[test]
    fn clamp_rejects_degenerate_area() {
        assert_eq!(Signal::new(0, 0).clamp_to(0, 10), None);
        assert_eq!(Signal::new(0, 0).clamp_to(10, 0), None);
    }

    #[test]
    fn distance_is_euclidean() {
        let origin = Position::new(200, 200);
        assert!((origin.distance(Position::new(215, 200)) - 15.0).abs() < f64::EPSILON);
        assert!((origin.distance(Position::new(203, 204)) - 5.0).abs() < f64::EPSILON);
        assert!((Position::new(3, 4).distance(Position::new(0, 0)) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_config_matches_reference_maze() {
        let config = MazeConfig::default();
        assert_eq!((config.width, config.height), (400, 400));
        assert_eq!(config.walls.len(), 6);
        assert_eq!(config.stroke_thickness, 2);
        assert_eq!(config.player_radius, 10);
        assert_eq!(config.goal_radius, 20);
    }

    #[test]
    fn partial_toml_falls_back_to_reference_values() {
        let config: MazeConfig = toml::from_str(
            r#"
            width = 120
            stroke_thickness = 1

            [[walls]]
            start = { x = 0, y = 60 }
            end = { x = 119, y = 60 }
            "#,
        )
        .expect("config parses");

        assert_eq!(config.width, 120);
        assert_eq!(config.height, 400);
        assert_eq!(config.stroke_thickness, 1);
        assert_eq!(config.walls, vec![WallSegment::between((0, 60), (119, 60))]);
        assert_eq!(config.goal_radius, 20);
    }
}
