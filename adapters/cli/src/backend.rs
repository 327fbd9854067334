//! Terminal rendering backend driven by a signal source.

use std::{
    io::Write,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use neck_maze_rendering::{render_text, Canvas, FrameInput, Presentation, RenderingBackend, Scene};
use neck_maze_system_tracking::SignalSource;
use tracing::{debug, info};

/// Backend that pulls frames from a signal source and prints text previews.
pub(crate) struct TerminalBackend<S, W> {
    source: S,
    out: W,
    frame_step: Option<Duration>,
    columns: u32,
    rows: u32,
    every_frame: bool,
    snapshot: Option<PathBuf>,
}

impl<S, W> TerminalBackend<S, W>
where
    S: SignalSource,
    W: Write,
{
    pub(crate) fn new(source: S, out: W, columns: u32, rows: u32) -> Self {
        Self {
            source,
            out,
            frame_step: None,
            columns,
            rows,
            every_frame: false,
            snapshot: None,
        }
    }

    /// Uses a fixed delta per frame instead of measuring wall-clock time.
    ///
    /// Measured deltas include the time spent waiting for the source, so the
    /// session clock follows the detector in real time.
    pub(crate) fn with_frame_step(mut self, frame_step: Option<Duration>) -> Self {
        self.frame_step = frame_step;
        self
    }

    pub(crate) fn with_every_frame(mut self, every_frame: bool) -> Self {
        self.every_frame = every_frame;
        self
    }

    pub(crate) fn with_snapshot(mut self, snapshot: Option<PathBuf>) -> Self {
        self.snapshot = snapshot;
        self
    }

    fn present(&mut self, scene: &Scene) -> Result<()> {
        writeln!(self.out, "{}", render_text(scene, self.columns, self.rows))
            .context("failed to write frame preview")
    }
}

impl<S, W> RenderingBackend for TerminalBackend<S, W>
where
    S: SignalSource,
    W: Write,
{
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene),
    {
        let Presentation {
            window_title,
            clear_color,
            mut scene,
        } = presentation;
        writeln!(self.out, "{window_title}").context("failed to write title")?;

        let mut frames: u64 = 0;
        let mut last_frame = Instant::now();
        while let Some(sample) = self
            .source
            .poll()
            .context("failed to read the next signal sample")?
        {
            let dt = self.frame_step.unwrap_or_else(|| {
                let now = Instant::now();
                let dt = now.duration_since(last_frame);
                last_frame = now;
                dt
            });
            update_scene(dt, FrameInput { sample }, &mut scene);
            frames += 1;

            if self.every_frame {
                self.present(&scene)?;
            }
            if scene.is_finished() {
                break;
            }
        }
        debug!(frames, "signal replay stopped");

        if !self.every_frame || frames == 0 {
            self.present(&scene)?;
        }

        if let Some(path) = self.snapshot.take() {
            Canvas::render(&scene, clear_color).save_png(&path)?;
            info!(path = %path.display(), "final frame written");
        }
        self.out.flush().context("failed to flush output")
    }
}
