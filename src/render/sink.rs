// src/render/sink.rs
//
// The DrawSink capability shared by the live pen and the code generator.
// Callers always pass explicit positions, so neither backend has to be
// queried for pen state.

use std::f64::consts::PI;

use crate::error::SinkError;
use crate::models::{Color, Point};

/// Whether a reposition draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenMode {
    /// Lift the pen, move, lower it again.
    Jump,
    /// Move with the pen down, leaving a mark.
    KeepDown,
}

pub trait DrawSink {
    fn set_speed(&mut self, speed: u32) -> Result<(), SinkError>;

    fn set_color(&mut self, color: &Color) -> Result<(), SinkError>;

    fn begin_fill(&mut self) -> Result<(), SinkError>;

    fn end_fill(&mut self) -> Result<(), SinkError>;

    fn hide(&mut self) -> Result<(), SinkError>;

    fn set_position(&mut self, to: Point, mode: PenMode) -> Result<(), SinkError>;

    /// Orients from `from` towards `to` and advances the full distance.
    fn stroke_to(&mut self, from: Point, to: Point) -> Result<(), SinkError>;

    /// Batched refresh signal for live devices.
    fn refresh(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Flushes anything buffered. Called exactly once at the end of a run.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

impl<S: DrawSink + ?Sized> DrawSink for &mut S {
    fn set_speed(&mut self, speed: u32) -> Result<(), SinkError> {
        (**self).set_speed(speed)
    }

    fn set_color(&mut self, color: &Color) -> Result<(), SinkError> {
        (**self).set_color(color)
    }

    fn begin_fill(&mut self) -> Result<(), SinkError> {
        (**self).begin_fill()
    }

    fn end_fill(&mut self) -> Result<(), SinkError> {
        (**self).end_fill()
    }

    fn hide(&mut self) -> Result<(), SinkError> {
        (**self).hide()
    }

    fn set_position(&mut self, to: Point, mode: PenMode) -> Result<(), SinkError> {
        (**self).set_position(to, mode)
    }

    fn stroke_to(&mut self, from: Point, to: Point) -> Result<(), SinkError> {
        (**self).stroke_to(from, to)
    }

    fn refresh(&mut self) -> Result<(), SinkError> {
        (**self).refresh()
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        (**self).finish()
    }
}

/// Heading and distance from `from` to `to`. The heading is measured in
/// degrees clockwise from north (+y), the turtle "logo" convention.
pub fn angle_dist(from: Point, to: Point) -> (f64, f64) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    // counterclockwise from +x
    let theta = dy.atan2(dx) * 180.0 / PI;
    ((450.0 - theta).rem_euclid(360.0), dx.hypot(dy))
}

/// Inverse of `angle_dist`: where a pen heading `heading` ends after `distance`.
pub fn advance(from: Point, heading: f64, distance: f64) -> Point {
    let radians = heading.to_radians();
    Point::new(
        from.x + distance * radians.sin(),
        from.y + distance * radians.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_dist_compass_points() {
        let origin = Point::new(2.0, 1.0);
        assert_eq!(angle_dist(origin, Point::new(2.0, 2.0)).0, 0.0);
        assert_eq!(angle_dist(origin, Point::new(3.0, 1.0)).0, 90.0);
        assert_eq!(angle_dist(origin, Point::new(2.0, 0.0)).0, 180.0);
        assert_eq!(angle_dist(origin, Point::new(1.0, 1.0)).0, 270.0);
    }

    #[test]
    fn test_angle_dist_diagonal() {
        let (angle, distance) = angle_dist(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        assert!((angle - 45.0).abs() < 1e-9);
        assert!((distance - 8.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_angle_always_in_range() {
        for i in 0..36 {
            let a = (i as f64 * 10.0).to_radians();
            let (angle, _) = angle_dist(Point::default(), Point::new(a.cos(), a.sin()));
            assert!((0.0..360.0).contains(&angle), "angle {} out of range", angle);
        }
    }

    #[test]
    fn test_advance_inverts_angle_dist() {
        let from = Point::new(-12.5, 40.0);
        for to in [Point::new(3.0, -7.0), Point::new(-100.0, 40.0), Point::new(-12.5, 90.0)] {
            let (heading, distance) = angle_dist(from, to);
            assert!(advance(from, heading, distance).approx_eq(to, 1e-9));
        }
    }
}
