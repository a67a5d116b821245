// src/models/geometry.rs
// Some types for working with document and canvas geometry

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::error::ConfigError;

/// An (x, y) pair. Whether it lives in document or canvas space is up to the
/// caller; the two are never mixed in one value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The source document's declared viewBox.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Parses a viewBox attribute: four numbers separated by whitespace and/or commas.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let values = value
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f64>()
                    .map_err(|_| ConfigError::MalformedViewport(format!("{value:?}: bad number {s:?}")))
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if values.len() != 4 {
            return Err(ConfigError::MalformedViewport(format!(
                "{value:?}: expected 4 values, found {}",
                values.len()
            )));
        }

        let viewport = Viewport {
            min_x: values[0],
            min_y: values[1],
            width: values[2],
            height: values[3],
        };
        viewport.check_extent()?;
        Ok(viewport)
    }

    pub fn check_extent(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::MalformedViewport(format!(
                "width and height must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// The target drawing surface. Drawing happens inside the padded region,
/// centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Canvas {
    pub fn drawable_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    pub fn drawable_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.drawable_width() / self.drawable_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod viewport_tests {
        use super::*;

        #[test]
        fn test_parse_whitespace_and_commas() {
            let vb = Viewport::parse("0 0 100 200").unwrap();
            assert_eq!(vb.width, 100.0);
            assert_eq!(vb.height, 200.0);

            let vb = Viewport::parse("0,0, 640,480").unwrap();
            assert_eq!(vb.width, 640.0);
            assert_eq!(vb.height, 480.0);
        }

        #[test]
        fn test_parse_rejects_wrong_arity() {
            assert!(matches!(
                Viewport::parse("0 0 100"),
                Err(ConfigError::MalformedViewport(_))
            ));
        }

        #[test]
        fn test_parse_rejects_garbage_and_empty_extent() {
            assert!(Viewport::parse("0 0 wide 10").is_err());
            assert!(Viewport::parse("0 0 0 10").is_err());
            assert!(Viewport::parse("0 0 10 -4").is_err());
        }
    }

    mod canvas_tests {
        use super::*;

        #[test]
        fn test_drawable_region_excludes_padding() {
            let canvas = Canvas {
                width: 550.0,
                height: 450.0,
                padding: 20.0,
            };
            assert_eq!(canvas.drawable_width(), 510.0);
            assert_eq!(canvas.drawable_height(), 410.0);
        }
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a + b, Point::new(4.0, 6.0));
        assert_eq!(b - a, Point::new(2.0, 2.0));
        assert!((a.distance(b) - 8.0_f64.sqrt()).abs() < 1e-12);
    }
}
