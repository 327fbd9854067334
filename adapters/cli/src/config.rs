//! Command-line arguments and the files they point at.

use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use neck_maze_core::MazeConfig;
use neck_maze_system_tracking::{SignalMapper, SignalTrack};

/// Width of the camera frames the reference detector delivers.
const DEFAULT_FRAME_WIDTH: u32 = 640;

/// Replays a nose-tracking signal through the maze.
#[derive(Debug, Parser)]
#[command(name = "neck-maze", about = "Steer a marker through a maze with a tracking signal")]
pub(crate) struct Args {
    /// TOML file describing the maze; the reference maze is used when omitted.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Signal track with one `x y` sample or `-` per line; `-` or omitted reads stdin.
    #[arg(long)]
    pub(crate) signals: Option<PathBuf>,

    /// Seed for placing the player and goal; random when omitted.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Keep detector x coordinates as reported instead of flipping them for
    /// the selfie view.
    #[arg(long = "no-mirror", action = ArgAction::SetFalse)]
    pub(crate) mirror: bool,

    /// Width of the detector frames, used when mirroring.
    #[arg(long, default_value_t = DEFAULT_FRAME_WIDTH)]
    pub(crate) frame_width: u32,

    /// Fixed time per replayed frame in milliseconds; measured when omitted.
    #[arg(long)]
    pub(crate) frame_millis: Option<u64>,

    /// Number of character columns in the text preview.
    #[arg(long, default_value_t = 80)]
    pub(crate) columns: u32,

    /// Number of character rows in the text preview.
    #[arg(long, default_value_t = 40)]
    pub(crate) rows: u32,

    /// Print the preview after every frame instead of only the last one.
    #[arg(long)]
    pub(crate) every_frame: bool,

    /// Write the final frame to this PNG file.
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
}

impl Args {
    pub(crate) fn mapper(&self) -> SignalMapper {
        SignalMapper::new(self.frame_width, self.mirror)
    }

    pub(crate) fn frame_step(&self) -> Option<Duration> {
        self.frame_millis.map(Duration::from_millis)
    }
}

/// Loads the maze configuration, falling back to the reference maze.
pub(crate) fn load_maze_config(path: Option<&Path>) -> Result<MazeConfig> {
    let Some(path) = path else {
        return Ok(MazeConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read maze config at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse maze config at {}", path.display()))
}

/// Signal track read line by line as frames arrive.
pub(crate) type LiveTrack = SignalTrack<Box<dyn BufRead>>;

/// Opens a signal track from a file, or from stdin for `-` or no path.
///
/// Samples are read lazily, so a detector writing into a pipe drives the
/// session in real time.
pub(crate) fn open_signal_track(path: Option<&Path>) -> Result<LiveTrack> {
    let reader: Box<dyn BufRead> = match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open signal track at {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        _ => Box::new(io::stdin().lock()),
    };
    Ok(SignalTrack::new(reader))
}
