// src/draw/transform.rs
// maps document-space points (origin top left, y down) into canvas space
// (origin centered, y up)

use crate::error::ConfigError;
use crate::models::{Canvas, Point, Viewport};

const ASPECT_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct CoordinateTransform {
    x_scale: f64,
    y_scale: f64,
    x_shift: f64,
    y_shift: f64,
    drawable_height: f64,
    clip_enabled: bool,
    // canvas-space bounds of the viewport, set once at construction
    min: Point,
    max: Point,
}

impl CoordinateTransform {
    pub fn new(viewport: &Viewport, canvas: &Canvas, clip_enabled: bool) -> Result<Self, ConfigError> {
        if viewport.min_x != 0.0 || viewport.min_y != 0.0 {
            return Err(ConfigError::UnsupportedViewport {
                min_x: viewport.min_x,
                min_y: viewport.min_y,
            });
        }
        viewport.check_extent()?;

        let width = canvas.drawable_width();
        let height = canvas.drawable_height();
        if width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::InvalidCanvas {
                width: canvas.width,
                height: canvas.height,
                padding: canvas.padding,
            });
        }

        let sx = width / viewport.width;
        let sy = height / viewport.height;
        let viewport_aspect = viewport.aspect_ratio();
        let canvas_aspect = canvas.aspect_ratio();

        // Uniform scale on the constraining axis when the shapes differ
        let (x_scale, y_scale) = if (canvas_aspect - viewport_aspect).abs() <= ASPECT_EPSILON {
            (sx, sy)
        } else if viewport_aspect > canvas_aspect {
            (sx, sx)
        } else {
            (sy, sy)
        };

        let mut transform = Self {
            x_scale,
            y_scale,
            x_shift: -width / 2.0,
            y_shift: -height / 2.0,
            drawable_height: height,
            clip_enabled,
            min: Point::default(),
            max: Point::default(),
        };

        let top_left = transform.to_canvas(Point::new(0.0, 0.0));
        let bottom_right = transform.to_canvas(Point::new(viewport.width, viewport.height));
        transform.min = Point::new(top_left.x, bottom_right.y);
        transform.max = Point::new(bottom_right.x, top_left.y);

        Ok(transform)
    }

    pub fn to_canvas(&self, p: Point) -> Point {
        Point::new(
            p.x * self.x_scale + self.x_shift,
            self.drawable_height - p.y * self.y_scale + self.y_shift,
        )
    }

    /// Clamps a canvas-space point to the viewport's drawable rectangle, or
    /// passes it through when clipping is disabled.
    pub fn clip(&self, p: Point) -> Point {
        if !self.clip_enabled {
            return p;
        }
        Point::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.x_scale, self.y_scale)
    }

    /// Corners of the drawable rectangle, in drawing order starting top left.
    pub fn boundary(&self) -> [Point; 4] {
        [
            Point::new(self.min.x, self.max.y),
            Point::new(self.max.x, self.max.y),
            Point::new(self.max.x, self.min.y),
            Point::new(self.min.x, self.min.y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn canvas(width: f64, height: f64) -> Canvas {
        Canvas {
            width,
            height,
            padding: 20.0,
        }
    }

    fn viewport(width: f64, height: f64) -> Viewport {
        Viewport {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        }
    }

    #[test]
    fn test_corners_map_to_drawable_rectangle() {
        let cases = [
            (viewport(100.0, 100.0), canvas(550.0, 550.0)),
            (viewport(300.0, 100.0), canvas(550.0, 550.0)),
            (viewport(100.0, 300.0), canvas(550.0, 550.0)),
            (viewport(640.0, 480.0), canvas(720.0, 675.0)),
        ];
        for (vb, cv) in cases {
            let t = CoordinateTransform::new(&vb, &cv, true).unwrap();
            let corners = [
                t.to_canvas(Point::new(0.0, 0.0)),
                t.to_canvas(Point::new(vb.width, 0.0)),
                t.to_canvas(Point::new(vb.width, vb.height)),
                t.to_canvas(Point::new(0.0, vb.height)),
            ];
            for (corner, expected) in corners.iter().zip(t.boundary().iter()) {
                assert!(corner.approx_eq(*expected, EPS), "{:?} != {:?}", corner, expected);
            }
        }
    }

    #[test]
    fn test_matching_aspect_fills_canvas() {
        let t = CoordinateTransform::new(&viewport(100.0, 100.0), &canvas(550.0, 550.0), true).unwrap();
        // drawable region is 510 x 510 centered on the origin
        assert!(t.to_canvas(Point::new(0.0, 0.0)).approx_eq(Point::new(-255.0, 255.0), EPS));
        assert!(t.to_canvas(Point::new(100.0, 100.0)).approx_eq(Point::new(255.0, -255.0), EPS));
        assert!(t.to_canvas(Point::new(50.0, 50.0)).approx_eq(Point::new(0.0, 0.0), EPS));
    }

    #[test]
    fn test_wide_viewport_scales_by_width() {
        let t = CoordinateTransform::new(&viewport(200.0, 100.0), &canvas(550.0, 550.0), true).unwrap();
        let (sx, sy) = t.scale();
        assert!((sx - 510.0 / 200.0).abs() < EPS);
        assert_eq!(sx, sy);
        let right = t.to_canvas(Point::new(200.0, 0.0));
        assert!((right.x - 255.0).abs() < EPS);
    }

    #[test]
    fn test_tall_viewport_scales_by_height() {
        let t = CoordinateTransform::new(&viewport(100.0, 400.0), &canvas(550.0, 550.0), true).unwrap();
        let (sx, sy) = t.scale();
        assert!((sy - 510.0 / 400.0).abs() < EPS);
        assert_eq!(sx, sy);
        let bottom = t.to_canvas(Point::new(0.0, 400.0));
        assert!((bottom.y + 255.0).abs() < EPS);
    }

    #[test]
    fn test_clip_clamps_only_when_enabled() {
        let vb = viewport(100.0, 100.0);
        let cv = canvas(550.0, 550.0);
        let outside = Point::new(400.0, -400.0);

        let clipping = CoordinateTransform::new(&vb, &cv, true).unwrap();
        // 5.1 scale leaves the corner a few ulps short of 255
        assert!(clipping.clip(outside).approx_eq(Point::new(255.0, -255.0), EPS));
        assert_eq!(clipping.clip(outside), clipping.boundary()[2]);

        let inside = Point::new(10.0, 10.0);
        assert_eq!(clipping.clip(inside), inside);

        let passthrough = CoordinateTransform::new(&vb, &cv, false).unwrap();
        assert_eq!(passthrough.clip(outside), outside);
    }

    #[test]
    fn test_translated_viewport_is_rejected() {
        let vb = Viewport {
            min_x: 10.0,
            min_y: 0.0,
            width: 100.0,
            height: 100.0,
        };
        let result = CoordinateTransform::new(&vb, &canvas(550.0, 550.0), true);
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedViewport { min_x, .. }) if min_x == 10.0
        ));
    }
}
