// src/draw/interpreter.rs
// Walks one path's tokens and turns them into pen primitives
//
// Relative coordinates are resolved in document space; everything handed to
// the tessellator or the sink is in canvas space. Strokes always start where
// the interpreter last put the pen, so the emitted strokes form one
// continuous polyline per subpath.

use super::bezier::BezierTessellator;
use super::transform::CoordinateTransform;
use crate::error::SinkError;
use crate::models::Point;
use crate::render::{DrawSink, PenMode};
use crate::services::svg::{Command, PathToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    None,
    Line,
    Curve,
}

/// Counters for one interpreted path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathStats {
    pub strokes: usize,
    pub curves: usize,
    pub skipped_tokens: usize,
}

/// Canvas-space control points for the curve segment in progress. Holds at
/// most `capacity` points; a full buffer is drained down to its last point.
#[derive(Debug, Clone)]
struct ControlPointBuffer {
    points: Vec<Point>,
    capacity: usize,
}

impl ControlPointBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
        }
    }

    fn clear(&mut self) {
        self.points.clear();
    }

    fn reseed(&mut self, p: Point) {
        self.points.clear();
        self.points.push(p);
    }

    fn push(&mut self, p: Point) {
        debug_assert!(self.points.len() < self.capacity);
        self.points.push(p);
    }

    fn is_full(&self) -> bool {
        self.points.len() == self.capacity
    }

    fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Keeps only the shared endpoint so the next segment chains from it.
    fn chain(&mut self) {
        if let Some(last) = self.points.last().copied() {
            self.reseed(last);
        }
    }
}

pub struct PathInterpreter<'a> {
    transform: &'a CoordinateTransform,
    tessellator: &'a BezierTessellator,
    mode: Mode,
    buffer: ControlPointBuffer,
    // document space
    anchor: Point,
    current: Point,
    // canvas space, where the pen was last left
    pen: Point,
    stats: PathStats,
}

impl<'a> PathInterpreter<'a> {
    pub fn new(transform: &'a CoordinateTransform, tessellator: &'a BezierTessellator) -> Self {
        Self {
            transform,
            tessellator,
            mode: Mode::None,
            buffer: ControlPointBuffer::new(tessellator.required_points()),
            anchor: Point::default(),
            current: Point::default(),
            pen: transform.to_canvas(Point::default()),
            stats: PathStats::default(),
        }
    }

    /// Interprets a whole decoded path. The first token must be the absolute
    /// start move, which `parse_path_data` guarantees.
    pub fn run<S: DrawSink>(
        transform: &'a CoordinateTransform,
        tessellator: &'a BezierTessellator,
        tokens: &[PathToken],
        sink: &mut S,
    ) -> Result<PathStats, SinkError> {
        let mut interpreter = Self::new(transform, tessellator);
        for token in tokens {
            interpreter.step(token, sink)?;
        }
        Ok(interpreter.stats)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn stats(&self) -> PathStats {
        self.stats
    }

    pub fn step<S: DrawSink>(&mut self, token: &PathToken, sink: &mut S) -> Result<(), SinkError> {
        let delta = Point::new(token.x, token.y);
        match token.command {
            Command::MoveAbsolute => self.move_to(delta, sink)?,
            Command::MoveRelative => self.move_to(self.current + delta, sink)?,
            Command::LineRelative => self.line_by(delta, sink)?,
            Command::CurveRelative => self.curve_by(delta, sink)?,
            Command::Unsupported(letter) => {
                log::warn!("Unrecognized path command ({}), skipping", letter);
                self.stats.skipped_tokens += 1;
                return Ok(());
            }
        }

        if token.closes {
            self.close(sink)?;
        }
        Ok(())
    }

    fn move_to<S: DrawSink>(&mut self, p: Point, sink: &mut S) -> Result<(), SinkError> {
        let canvas = self.transform.to_canvas(p);
        sink.set_position(canvas, PenMode::Jump)?;
        self.buffer.clear();
        self.anchor = p;
        self.current = p;
        self.pen = canvas;
        self.mode = Mode::None;
        Ok(())
    }

    fn line_by<S: DrawSink>(&mut self, delta: Point, sink: &mut S) -> Result<(), SinkError> {
        let target = self.current + delta;
        let canvas = self.transform.to_canvas(target);
        let to = self.transform.clip(canvas);
        sink.stroke_to(self.pen, to)?;
        self.pen = to;
        self.stats.strokes += 1;

        self.buffer.reseed(canvas);
        self.current = target;
        self.mode = Mode::Line;
        Ok(())
    }

    fn curve_by<S: DrawSink>(&mut self, delta: Point, sink: &mut S) -> Result<(), SinkError> {
        let target = self.current + delta;
        if self.mode != Mode::Curve {
            self.buffer.reseed(self.transform.to_canvas(self.current));
        }
        self.buffer.push(self.transform.to_canvas(target));

        if self.buffer.is_full() {
            let points = self.tessellator.flatten(self.buffer.as_slice());
            for p in points {
                let to = self.transform.clip(p);
                sink.stroke_to(self.pen, to)?;
                self.pen = to;
                self.stats.strokes += 1;
            }
            self.stats.curves += 1;
            self.buffer.chain();
        }

        self.current = target;
        self.mode = Mode::Curve;
        Ok(())
    }

    /// One more motion back to the anchor, in the mode of the token just
    /// processed. A subpath closed straight after its move closes with a line.
    fn close<S: DrawSink>(&mut self, sink: &mut S) -> Result<(), SinkError> {
        let back = self.anchor - self.current;
        match self.mode {
            Mode::Curve => self.curve_by(back, sink),
            Mode::Line | Mode::None => self.line_by(back, sink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BezierKind, TessellationConfig};
    use crate::models::{Canvas, Viewport};
    use crate::render::{CodeGenSink, ImmediateSink};
    use crate::services::svg::parse_path_data;

    const EPS: f64 = 1e-9;

    // 100x100 viewport on a 140x140 canvas with padding 20: scale 1, so
    // document (x, y) lands on canvas (x - 50, 50 - y).
    fn transform(clip: bool) -> CoordinateTransform {
        CoordinateTransform::new(
            &Viewport {
                min_x: 0.0,
                min_y: 0.0,
                width: 100.0,
                height: 100.0,
            },
            &Canvas {
                width: 140.0,
                height: 140.0,
                padding: 20.0,
            },
            clip,
        )
        .unwrap()
    }

    fn tessellator(kind: BezierKind, include_endpoint: bool) -> BezierTessellator {
        BezierTessellator::new(&TessellationConfig {
            step_size: 0.5,
            bezier: kind,
            include_endpoint,
        })
        .unwrap()
    }

    fn interpret(d: &str, kind: BezierKind, include_endpoint: bool) -> (PathStats, ImmediateSink) {
        let transform = transform(true);
        let tessellator = tessellator(kind, include_endpoint);
        let tokens = parse_path_data(d).unwrap();
        let mut sink = ImmediateSink::new(None);
        let stats = PathInterpreter::run(&transform, &tessellator, &tokens, &mut sink).unwrap();
        (stats, sink)
    }

    #[test]
    fn test_closed_square_returns_to_anchor() {
        let (stats, sink) = interpret("M10 10 l80 0 l0 80 l-80 0 z", BezierKind::Cubic, false);
        assert_eq!(stats.strokes, 4);
        assert_eq!(stats.curves, 0);

        let anchor = transform(true).to_canvas(Point::new(10.0, 10.0));
        assert!(sink.pen().position.approx_eq(anchor, EPS));
        let lines: Vec<_> = sink.lines().collect();
        assert!(lines[3].1.approx_eq(anchor, EPS));
    }

    #[test]
    fn test_cubic_segment_stroke_counts() {
        let (without, _) = interpret("M0 0 c0 50 50 50 50 0", BezierKind::Cubic, false);
        assert_eq!(without.strokes, 2);
        assert_eq!(without.curves, 1);

        let (with, sink) = interpret("M0 0 c0 50 50 50 50 0", BezierKind::Cubic, true);
        assert_eq!(with.strokes, 3);
        // control points chain: (0,0) -> (0,50) -> (50,100) -> (100,100)
        let end = transform(true).to_canvas(Point::new(100.0, 100.0));
        assert!(sink.pen().position.approx_eq(end, EPS));
    }

    #[test]
    fn test_curve_buffer_chains_between_segments() {
        // two cubic segments share their joint point
        let (stats, _) = interpret("M0 0 c10 0 10 0 10 0 10 0 10 0 10 0", BezierKind::Cubic, true);
        assert_eq!(stats.curves, 2);
        assert_eq!(stats.strokes, 6);
    }

    #[test]
    fn test_partial_curve_is_not_drawn() {
        let (stats, sink) = interpret("M0 0 c10 10 10 10", BezierKind::Cubic, true);
        assert_eq!(stats.curves, 0);
        assert_eq!(stats.strokes, 0);
        assert_eq!(sink.lines().count(), 0);
    }

    #[test]
    fn test_quadratic_segments() {
        let (stats, _) = interpret("M0 0 c10 10 10 -10 10 10 10 -10", BezierKind::Quadratic, false);
        // 4 points after the start: two quadratic segments of 3 strokes each
        assert_eq!(stats.curves, 2);
        assert_eq!(stats.strokes, 6);
    }

    #[test]
    fn test_line_after_curve_discards_partial_buffer() {
        let transform = transform(true);
        let tessellator = tessellator(BezierKind::Cubic, true);
        let tokens = parse_path_data("M0 0 c10 0 10 0 l5 5").unwrap();
        let mut sink = ImmediateSink::new(None);
        let mut interpreter = PathInterpreter::new(&transform, &tessellator);
        for token in &tokens {
            interpreter.step(token, &mut sink).unwrap();
        }
        assert_eq!(interpreter.mode(), Mode::Line);
        assert_eq!(interpreter.current(), Point::new(25.0, 5.0));
        assert_eq!(interpreter.stats().curves, 0);
        assert_eq!(interpreter.stats().strokes, 1);
    }

    #[test]
    fn test_curve_after_line_starts_at_line_end() {
        // the cubic's control points are (10,0) (10,0) (10,0) (20,0): a
        // straight run along y = 0, so every sample stays on that line
        let (stats, sink) = interpret("M0 0 l10 0 c0 0 0 0 10 0", BezierKind::Cubic, true);
        assert_eq!(stats.curves, 1);
        assert_eq!(stats.strokes, 4);
        let t = transform(true);
        let lines: Vec<_> = sink.lines().collect();
        assert!(lines[1].1.approx_eq(t.to_canvas(Point::new(10.0, 0.0)), EPS));
        for (_, end) in &lines {
            assert!((end.y - 50.0).abs() < EPS);
        }
        assert!(sink.pen().position.approx_eq(t.to_canvas(Point::new(20.0, 0.0)), EPS));
    }

    #[test]
    fn test_moves_reset_anchor_and_mode() {
        let transform = transform(true);
        let tessellator = tessellator(BezierKind::Cubic, false);
        let tokens = parse_path_data("M0 0 l10 10 m5 5").unwrap();
        let mut sink = CodeGenSink::new(Vec::new(), 6);
        let mut interpreter = PathInterpreter::new(&transform, &tessellator);
        for token in &tokens {
            interpreter.step(token, &mut sink).unwrap();
        }
        assert_eq!(interpreter.mode(), Mode::None);
        assert_eq!(interpreter.anchor(), Point::new(15.0, 15.0));
        assert_eq!(interpreter.current(), Point::new(15.0, 15.0));

        let code = String::from_utf8(sink.into_inner()).unwrap();
        let jumps = code.lines().filter(|l| l.starts_with("(penup)")).count();
        assert_eq!(jumps, 2);
    }

    #[test]
    fn test_close_in_curve_mode_appends_control_point() {
        // one c pair leaves two control points; the close adds the third and
        // completes a quadratic segment ending at the anchor
        let (stats, sink) = interpret("M20 20 c10 0z", BezierKind::Quadratic, false);
        assert_eq!(stats.curves, 1);
        let anchor = transform(true).to_canvas(Point::new(20.0, 20.0));
        assert!(sink.pen().position.approx_eq(anchor, EPS));
    }

    #[test]
    fn test_close_right_after_move_uses_a_line() {
        let (stats, _) = interpret("M20 20 m10 10z", BezierKind::Cubic, false);
        assert_eq!(stats.strokes, 1);
        assert_eq!(stats.curves, 0);
    }

    #[test]
    fn test_unknown_command_leaves_state_untouched() {
        let (stats, sink) = interpret("M0 0 q5 5 l10 0", BezierKind::Cubic, false);
        assert_eq!(stats.skipped_tokens, 1);
        assert_eq!(stats.strokes, 1);
        let lines: Vec<_> = sink.lines().collect();
        let t = transform(true);
        assert!(lines[0].1.approx_eq(t.to_canvas(Point::new(10.0, 0.0)), EPS));
    }

    #[test]
    fn test_strokes_are_clipped_when_enabled() {
        let (_, sink) = interpret("M50 50 l500 0", BezierKind::Cubic, false);
        assert!(sink.pen().position.approx_eq(Point::new(50.0, 0.0), EPS));

        let transform = transform(false);
        let tessellator = tessellator(BezierKind::Cubic, false);
        let tokens = parse_path_data("M50 50 l500 0").unwrap();
        let mut sink = ImmediateSink::new(None);
        PathInterpreter::run(&transform, &tessellator, &tokens, &mut sink).unwrap();
        assert!(sink.pen().position.approx_eq(Point::new(500.0, 0.0), EPS));
    }
}
