#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for neck maze adapters.
//!
//! Adapters build a [`Scene`] from world queries once per frame and hand it to
//! a [`RenderingBackend`]. Two reference rasterizers live here: [`Canvas`]
//! draws the scene into an RGB image, and [`render_text`] downsamples it into
//! a block of characters for terminals.

pub mod canvas;
pub mod text;

use anyhow::Result as AnyResult;
use glam::Vec2;
use neck_maze_core::{Position, Sample, Signal};
use std::{error::Error, fmt, time::Duration};

pub use canvas::Canvas;
pub use text::render_text;

/// Radius of the marker drawn at the raw tracking signal.
pub const SIGNAL_MARKER_RADIUS: f32 = 5.0;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque black, used as the maze background.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);
    /// Opaque white, used for walls.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque green, used for the player and the signal marker.
    pub const GREEN: Self = Self::from_rgb_u8(0, 255, 0);
    /// Opaque red, used for the goal.
    pub const RED: Self = Self::from_rgb_u8(255, 0, 0);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color to byte RGB values, dropping alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> [u8; 3] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
        ]
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Converts a maze cell into the world-space point at its centre.
#[must_use]
pub fn cell_center(position: Position) -> Vec2 {
    Vec2::new(position.x() as f32, position.y() as f32)
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameInput {
    /// Raw detector output for this frame.
    pub sample: Sample,
}

/// Filled circle drawn in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CirclePresentation {
    /// Centre of the circle in world units.
    pub center: Vec2,
    /// Radius of the circle in world units.
    pub radius: f32,
    /// Fill color.
    pub color: Color,
}

impl CirclePresentation {
    /// Creates a new circle descriptor.
    #[must_use]
    pub const fn new(center: Vec2, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
        }
    }

    /// Reports whether `point` lies inside or on the circle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

/// Occupancy grid snapshot used to draw walls.
#[derive(Clone, Debug, PartialEq)]
pub struct MazePresentation {
    /// Number of columns in the grid.
    pub width: u32,
    /// Number of rows in the grid.
    pub height: u32,
    /// Row-major occupancy flags, `true` meaning wall.
    cells: Vec<bool>,
    /// Color used for wall cells.
    pub wall_color: Color,
}

impl MazePresentation {
    /// Creates a new maze descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RenderingError::OccupancyMismatch`] when `cells` does not
    /// hold exactly `width * height` entries.
    pub fn new(
        width: u32,
        height: u32,
        cells: Vec<bool>,
        wall_color: Color,
    ) -> Result<Self, RenderingError> {
        let expected = u64::from(width) * u64::from(height);
        if cells.len() as u64 != expected {
            return Err(RenderingError::OccupancyMismatch {
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            width,
            height,
            cells,
            wall_color,
        })
    }

    /// Reports whether the cell at `(x, y)` is a wall; outside cells are not.
    #[must_use]
    pub fn is_wall(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.cells.get(index).copied().unwrap_or(false)
    }
}

/// Declarative description of everything drawn in a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Walls of the maze.
    pub maze: MazePresentation,
    /// Player marker.
    pub player: CirclePresentation,
    /// Goal region.
    pub goal: CirclePresentation,
    /// Marker at the latest raw tracking signal, if any.
    pub signal_marker: Option<CirclePresentation>,
    /// Time taken to reach the goal once the session finished.
    pub finished_after: Option<Duration>,
}

impl Scene {
    /// Creates a new scene for a running session.
    #[must_use]
    pub fn new(
        maze: MazePresentation,
        player: CirclePresentation,
        goal: CirclePresentation,
    ) -> Self {
        Self {
            maze,
            player,
            goal,
            signal_marker: None,
            finished_after: None,
        }
    }

    /// Places or clears the marker for the latest raw signal.
    pub fn mark_signal(&mut self, signal: Option<Signal>) {
        self.signal_marker = signal.map(|signal| {
            CirclePresentation::new(
                Vec2::new(signal.x() as f32, signal.y() as f32),
                SIGNAL_MARKER_RADIUS,
                Color::GREEN,
            )
        });
    }

    /// Reports whether the scene shows a finished session.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished_after.is_some()
    }

    /// Message shown once the goal has been reached.
    #[must_use]
    pub fn banner(&self) -> Option<String> {
        self.finished_after
            .map(|elapsed| format!("You Win! Time: {:.2}s", elapsed.as_secs_f64()))
    }
}

/// Complete description of the frame presented to the backend.
#[derive(Clone, Debug)]
pub struct Presentation {
    /// Title shown by windowed backends.
    pub window_title: String,
    /// Background color behind the maze.
    pub clear_color: Color,
    /// Initial scene.
    pub scene: Scene,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting neck maze scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// input captured by the adapter, and may mutate the scene before it is
    /// presented. Backends stop once their input ends or after presenting a
    /// finished scene.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene);
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The occupancy buffer does not match the declared grid dimensions.
    OccupancyMismatch {
        /// Number of cells implied by the dimensions.
        expected: u64,
        /// Number of cells provided.
        actual: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OccupancyMismatch { expected, actual } => {
                write!(
                    f,
                    "occupancy buffer holds {actual} cells but the grid needs {expected}"
                )
            }
        }
    }
}

impl Error for RenderingError {}
