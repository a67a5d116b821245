//! Bézier flattening.
//!
//! Curves are sampled at a fixed parameter step into points the pen can join
//! with straight strokes.

use crate::config::{BezierKind, TessellationConfig};
use crate::error::ConfigError;
use crate::models::Point;

/// Cubic basis matrix; row `i` holds the coefficients of `t^i`.
const CUBIC_BASIS: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [-3.0, 3.0, 0.0, 0.0],
    [3.0, -6.0, 3.0, 0.0],
    [-1.0, 3.0, -3.0, 1.0],
];

#[derive(Debug, Clone)]
pub struct BezierTessellator {
    kind: BezierKind,
    step: f64,
    include_endpoint: bool,
}

impl BezierTessellator {
    pub fn new(config: &TessellationConfig) -> Result<Self, ConfigError> {
        let step = config.step_size;
        if !(step > 0.0 && step <= 1.0) {
            return Err(ConfigError::InvalidStepSize(step));
        }
        Ok(Self {
            kind: config.bezier,
            step,
            include_endpoint: config.include_endpoint,
        })
    }

    pub fn required_points(&self) -> usize {
        self.kind.required_points()
    }

    /// Flattens one segment. `points` must hold exactly `required_points()`
    /// canvas-space control points.
    pub fn flatten(&self, points: &[Point]) -> Vec<Point> {
        debug_assert_eq!(points.len(), self.required_points());
        match self.kind {
            BezierKind::Cubic => self.cubic(points[0], points[1], points[2], points[3]),
            BezierKind::Quadratic => self.quadratic(points[0], points[1], points[2]),
        }
    }

    /// Sample parameters `0, h, 2h, ...` strictly below 1. Counting in integers
    /// keeps an accumulated `h` from creeping up to 1 and emitting it twice.
    fn parameters(&self) -> impl Iterator<Item = f64> + '_ {
        (0usize..)
            .map(move |k| k as f64 * self.step)
            .take_while(|t| *t < 1.0 - 1e-9)
    }

    pub fn cubic(&self, p0: Point, p1: Point, p2: Point, p3: Point) -> Vec<Point> {
        let control = [p0, p1, p2, p3];
        let mut coefficients = [Point::default(); 4];
        for (row, coefficient) in CUBIC_BASIS.iter().zip(coefficients.iter_mut()) {
            for (weight, p) in row.iter().zip(control.iter()) {
                coefficient.x += weight * p.x;
                coefficient.y += weight * p.y;
            }
        }

        let mut out: Vec<Point> = self
            .parameters()
            .map(|t| {
                let monomial = [1.0, t, t * t, t * t * t];
                let mut p = Point::default();
                for (m, c) in monomial.iter().zip(coefficients.iter()) {
                    p.x += m * c.x;
                    p.y += m * c.y;
                }
                p
            })
            .collect();

        out[0] = p0;
        if self.include_endpoint {
            out.push(p3);
        }
        out
    }

    pub fn quadratic(&self, p0: Point, p1: Point, p2: Point) -> Vec<Point> {
        let mut out: Vec<Point> = self
            .parameters()
            .map(|t| {
                let s = 1.0 - t;
                Point::new(
                    s * s * p0.x + 2.0 * s * t * p1.x + t * t * p2.x,
                    s * s * p0.y + 2.0 * s * t * p1.y + t * t * p2.y,
                )
            })
            .collect();
        out[0] = p0;
        out.push(p2);
        out
    }
}
