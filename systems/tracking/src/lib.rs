#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tracking system that turns detector samples into session ticks.
//!
//! Landmark detection lives outside the engine. Whatever produces the nose
//! position implements [`SignalSource`]; the [`Tracking`] system maps each
//! sample into maze space and emits exactly one [`Command::Tick`] per frame.

pub mod track;

use std::time::Duration;

use neck_maze_core::{Command, Sample, Signal};
use tracing::debug;

pub use track::{SignalTrack, TrackError};

/// Producer of per-frame detector samples.
pub trait SignalSource {
    /// Polls the next frame, blocking until it is available.
    ///
    /// Returns `Ok(None)` once the stream has ended, for example when the
    /// camera stops delivering frames. A frame without a detection is
    /// `Some(Sample::Missing)`, not the end of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError`] when the next frame cannot be read or decoded.
    fn poll(&mut self) -> Result<Option<Sample>, TrackError>;
}

/// Maps raw frame coordinates into maze coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalMapper {
    frame_width: u32,
    mirror: bool,
}

impl SignalMapper {
    /// Creates a mapper for frames `frame_width` pixels wide.
    ///
    /// When `mirror` is set the horizontal axis is flipped so that moving the
    /// head to the right moves the marker to the right on a selfie view.
    #[must_use]
    pub const fn new(frame_width: u32, mirror: bool) -> Self {
        Self {
            frame_width,
            mirror,
        }
    }

    /// Mapper that forwards coordinates untouched.
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(0, false)
    }

    /// Applies the mapping to a single signal.
    #[must_use]
    pub fn map(&self, signal: Signal) -> Signal {
        if !self.mirror || self.frame_width == 0 {
            return signal;
        }

        let right_edge = i64::from(self.frame_width) - 1;
        let mirrored = right_edge - i64::from(signal.x());
        let x = i32::try_from(mirrored).unwrap_or(if mirrored < 0 { i32::MIN } else { i32::MAX });
        Signal::new(x, signal.y())
    }
}

impl Default for SignalMapper {
    fn default() -> Self {
        Self::identity()
    }
}

/// Pure system that converts detector samples into tick commands.
#[derive(Debug, Default)]
pub struct Tracking {
    mapper: SignalMapper,
    missed_frames: u32,
}

impl Tracking {
    /// Creates a tracking system that applies `mapper` to every detection.
    #[must_use]
    pub fn new(mapper: SignalMapper) -> Self {
        Self {
            mapper,
            missed_frames: 0,
        }
    }

    /// Consumes one frame's sample and emits the matching tick command.
    pub fn handle(&mut self, sample: Sample, dt: Duration, out: &mut Vec<Command>) {
        let signal = match sample {
            Sample::Detected(raw) => {
                if self.missed_frames > 0 {
                    debug!(missed_frames = self.missed_frames, "tracking reacquired");
                    self.missed_frames = 0;
                }
                Some(self.mapper.map(raw))
            }
            Sample::Missing => {
                if self.missed_frames == 0 {
                    debug!("tracking lost");
                }
                self.missed_frames = self.missed_frames.saturating_add(1);
                None
            }
        };

        out.push(Command::Tick { dt, signal });
    }

    /// Number of consecutive frames without a detection.
    #[must_use]
    pub const fn missed_frames(&self) -> u32 {
        self.missed_frames
    }
}
