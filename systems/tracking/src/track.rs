//! Line-oriented signal tracks read from files, pipes or in-memory text.

use std::io::{self, BufRead};

use neck_maze_core::{Sample, Signal};
use thiserror::Error;

use crate::SignalSource;

const MISSING_MARKER: &str = "-";
const COMMENT_MARKER: char = '#';

/// Errors raised while reading a signal track.
#[derive(Debug, Error)]
pub enum TrackError {
    /// A line could not be parsed as a sample.
    #[error("line {line}: expected `x y`, `x,y` or `-`, found `{content}`")]
    InvalidSample {
        /// One-based line number of the offending entry.
        line: usize,
        /// Trimmed content of the offending line.
        content: String,
    },
    /// The underlying reader failed.
    #[error("failed to read signal track")]
    Read(#[from] io::Error),
}

/// Signal source that reads one sample per line as the lines arrive.
///
/// The text format holds `x y` or `x,y` for a detection and `-` for a frame
/// without one. Blank lines and `#` comments are skipped. Nothing is buffered
/// ahead, so a detector piped into the reader is consumed live and `poll`
/// blocks until its next frame.
#[derive(Debug)]
pub struct SignalTrack<R> {
    reader: R,
    line: usize,
    buffer: String,
}

impl<R: BufRead> SignalTrack<R> {
    /// Wraps `reader` as a signal source.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buffer: String::new(),
        }
    }
}

impl<R: BufRead> SignalSource for SignalTrack<R> {
    fn poll(&mut self) -> Result<Option<Sample>, TrackError> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            if let Some(sample) = parse_line(self.line, &self.buffer)? {
                return Ok(Some(sample));
            }
        }
    }
}

/// Parses one raw track line; `None` for blanks and comments.
fn parse_line(line: usize, raw: &str) -> Result<Option<Sample>, TrackError> {
    let content = raw
        .split_once(COMMENT_MARKER)
        .map_or(raw, |(before, _)| before)
        .trim();
    if content.is_empty() {
        return Ok(None);
    }

    parse_sample(content)
        .map(Some)
        .ok_or_else(|| TrackError::InvalidSample {
            line,
            content: content.to_owned(),
        })
}

fn parse_sample(content: &str) -> Option<Sample> {
    if content == MISSING_MARKER {
        return Some(Sample::Missing);
    }

    let mut parts = content
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let x = parts.next()?.parse::<i32>().ok()?;
    let y = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Sample::Detected(Signal::new(x, y)))
}
