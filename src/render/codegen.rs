// src/render/codegen.rs
// Emits turtle primitives as Scheme turtle-graphics code, one line per call

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::sink::{angle_dist, DrawSink, PenMode};
use crate::error::SinkError;
use crate::models::{Color, Point};

pub const DEFAULT_PRECISION: usize = 6;

pub struct CodeGenSink<W: Write> {
    out: W,
    precision: usize,
    lines: usize,
    finished: bool,
}

impl CodeGenSink<BufWriter<File>> {
    /// Opens (truncating) `path` for the whole run.
    pub fn create<P: AsRef<Path>>(path: P, precision: usize) -> Result<Self, SinkError> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), precision))
    }
}

impl<W: Write> CodeGenSink<W> {
    pub fn new(out: W, precision: usize) -> Self {
        Self {
            out,
            precision,
            lines: 0,
            finished: false,
        }
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &str) -> Result<(), SinkError> {
        writeln!(self.out, "{}", line)?;
        self.lines += 1;
        Ok(())
    }

    fn real(&self, value: f64) -> String {
        let text = format!("{:.*}", self.precision, value);
        // no "-0.000000" for tiny negatives
        if text.starts_with('-') && text[1..].bytes().all(|b| b == b'0' || b == b'.') {
            text[1..].to_string()
        } else {
            text
        }
    }
}

impl<W: Write> DrawSink for CodeGenSink<W> {
    fn set_speed(&mut self, speed: u32) -> Result<(), SinkError> {
        self.emit(&format!("(speed {})", speed))
    }

    fn set_color(&mut self, color: &Color) -> Result<(), SinkError> {
        self.emit(&format!("(color \"{}\")", color))
    }

    fn begin_fill(&mut self) -> Result<(), SinkError> {
        self.emit("(begin_fill)")
    }

    fn end_fill(&mut self) -> Result<(), SinkError> {
        self.emit("(end_fill)")
    }

    fn hide(&mut self) -> Result<(), SinkError> {
        self.emit("(hideturtle)")
    }

    fn set_position(&mut self, to: Point, mode: PenMode) -> Result<(), SinkError> {
        let position = format!("(setposition {} {})", self.real(to.x), self.real(to.y));
        match mode {
            PenMode::Jump => self.emit(&format!("(penup) {} (pendown)", position)),
            PenMode::KeepDown => self.emit(&position),
        }
    }

    fn stroke_to(&mut self, from: Point, to: Point) -> Result<(), SinkError> {
        let (heading, distance) = angle_dist(from, to);
        let line = format!(
            "(setheading {}) (forward {})",
            self.real(heading),
            self.real(distance)
        );
        self.emit(&line)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        if !self.finished {
            self.out.flush()?;
            self.finished = true;
        }
        Ok(())
    }
}
