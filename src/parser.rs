use core::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::{
    colors::Palette,
    command::Command,
    content::Frame,
    error::{Error, RecordError, Result},
    helpers::clamp_index,
    state::DrawState,
};

/// A script line the parser could not fully apply.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// Tag outside the format; the line was ignored.
    #[error("line {line}: unrecognized command `{text}`")]
    UnknownCommand { line: usize, text: String },
    /// Recognised tag with unusable fields; the record was skipped.
    #[error("line {line}: skipped `{text}`: {error}")]
    SkippedRecord {
        line: usize,
        text: String,
        error: RecordError,
    },
    /// Line was not UTF-8; it was read with the bad bytes replaced by U+FFFD.
    #[error("line {line}: invalid UTF-8, read as `{text}`")]
    InvalidUtf8 { line: usize, text: String },
}

impl Diagnostic {
    /// 1-based line number in the script.
    pub fn line(&self) -> usize {
        match self {
            Diagnostic::UnknownCommand { line, .. }
            | Diagnostic::SkippedRecord { line, .. }
            | Diagnostic::InvalidUtf8 { line, .. } => *line,
        }
    }
}

/// Reads a drawing script frame by frame.
///
/// Frames are separated by blank lines. Layer, color and thickness set by
/// `y`, `@` and `r` records stay in effect across frame breaks.
pub struct FrameParser<R: Read> {
    reader: BufReader<R>,
    buf: Vec<u8>,
    state: DrawState,
    palette: Palette,
    frames: Vec<Frame>,
    line_no: usize,
    diagnostics: Vec<Diagnostic>,
}

impl FrameParser<File> {
    /// Opens a script file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| Error::Open {
            path: path.to_path_buf(),
            source: err.into(),
        })?;
        Ok(Self::from_reader(file))
    }
}

impl FrameParser<Cursor<Vec<u8>>> {
    /// Parses a script held in memory.
    pub fn from_text<S: Into<String>>(script: S) -> Self {
        Self::from_bytes(script.into().into_bytes())
    }

    /// Parses raw script bytes; lines that are not UTF-8 are decoded lossily.
    pub fn from_bytes<B: Into<Vec<u8>>>(script: B) -> Self {
        Self::from_reader(Cursor::new(script.into()))
    }
}

impl<R: Read> FrameParser<R> {
    pub fn from_reader(r: R) -> Self {
        Self {
            reader: BufReader::new(r),
            buf: Vec::new(),
            state: DrawState::default(),
            palette: Palette::default(),
            frames: Vec::new(),
            line_no: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn with_palette<P: Into<Palette>>(mut self, palette: P) -> Self {
        self.set_palette(palette);
        self
    }

    /// Replaces the palette used by indexed `@` records.
    pub fn set_palette<P: Into<Palette>>(&mut self, palette: P) {
        self.palette = palette.into();
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Reads the next frame and appends it to [`frames`](Self::frames).
    ///
    /// Returns `Ok(false)` once the stream holds no more records; the frame
    /// list is left untouched in that case and later calls keep returning
    /// `Ok(false)`. A read error keeps the records of the current frame
    /// read so far.
    pub fn parse_next_frame(&mut self) -> Result<bool> {
        self.frames.push(Frame::new());
        let mut consumed = false;
        loop {
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    if !consumed {
                        self.frames.pop();
                    }
                    return Err(err);
                }
            };
            if line.trim().is_empty() {
                if consumed {
                    break;
                }
                continue;
            }
            consumed = true;
            self.apply(&line);
        }
        if !consumed {
            self.frames.pop();
            return Ok(false);
        }
        if let Some(frame) = self.frames.last() {
            debug!(
                "frame {} finished at line {} with {} primitives",
                self.frames.len() - 1,
                self.line_no,
                frame.len()
            );
        }
        Ok(true)
    }

    /// Parses frames until the stream is exhausted and returns how many were added.
    pub fn parse_all(&mut self) -> Result<usize> {
        let mut added = 0;
        while self.parse_next_frame()? {
            added += 1;
        }
        Ok(added)
    }

    fn apply(&mut self, line: &str) {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(error) => {
                self.report(Diagnostic::SkippedRecord {
                    line: self.line_no,
                    text: line.into(),
                    error,
                });
                return;
            }
        };
        match command {
            Command::Draw(shape) => {
                if let Some(frame) = self.frames.last_mut() {
                    frame.push(&shape, &self.state);
                }
            }
            Command::Layer(layer) => self.state.layer = layer,
            Command::Thickness(thickness) => self.state.thickness = thickness,
            Command::Color(spec) => match self.palette.resolve(&spec) {
                Ok(color) => self.state.color = color,
                Err(error) => self.report(Diagnostic::SkippedRecord {
                    line: self.line_no,
                    text: line.into(),
                    error,
                }),
            },
            Command::Unknown => self.report(Diagnostic::UnknownCommand {
                line: self.line_no,
                text: line.into(),
            }),
        }
    }

    /// Reads one line without its terminator and counts it.
    fn read_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        let mut bytes = &self.buf[..];
        if let Some(rest) = bytes.strip_suffix(b"\n") {
            bytes = rest;
        }
        if let Some(rest) = bytes.strip_suffix(b"\r") {
            bytes = rest;
        }
        let valid = std::str::from_utf8(bytes).is_ok();
        let line = String::from_utf8_lossy(bytes).into_owned();
        if !valid {
            self.report(Diagnostic::InvalidUtf8 {
                line: self.line_no,
                text: line.clone(),
            });
        }
        Ok(Some(line))
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

// Accessors
impl<R: Read> FrameParser<R> {
    /// All frames parsed so far.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Like [`frame`](Self::frame) but clamps `index` to the last frame.
    pub fn frame_clamped(&self, index: usize) -> Option<&Frame> {
        self.frames.get(clamp_index(index, self.frames.len()))
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Hands over the frames parsed so far; drawing state is kept.
    pub fn take_frames(&mut self) -> Vec<Frame> {
        std::mem::take(&mut self.frames)
    }

    /// Current layer, color and thickness.
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Number of lines read so far.
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl<R: Read> fmt::Debug for FrameParser<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameParser")
            .field("state", &self.state)
            .field("palette", &self.palette)
            .field("frames", &self.frames.len())
            .field("line_no", &self.line_no)
            .finish()
    }
}
