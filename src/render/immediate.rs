// src/render/immediate.rs
// A live turtle pen rendered through nannou
//
// The pen keeps real heading/position state like a turtle device would. Every
// mark it makes lands in a display list; the window draws the part of that
// list published by the last refresh.

use nannou::lyon::tessellation::LineCap;
use nannou::prelude::*;

use super::sink::{advance, angle_dist, DrawSink, PenMode};
use crate::error::SinkError;
use crate::models::{Color, Point};

const DEFAULT_PEN_WIDTH: f32 = 1.0;
const CURSOR_SIZE: f32 = 9.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayItem {
    Line {
        start: Point,
        end: Point,
        color: Rgb,
        weight: f32,
    },
    Fill {
        points: Vec<Point>,
        color: Rgb,
    },
}

#[derive(Debug, Clone)]
pub struct TurtlePen {
    pub position: Point,
    /// Degrees clockwise from north.
    pub heading: f64,
    pub pen_down: bool,
    pub color: Rgb,
    pub visible: bool,
    pub speed: u32,
    pub weight: f32,
    fill_path: Option<Vec<Point>>,
}

impl TurtlePen {
    pub fn new(weight: Option<f32>) -> Self {
        Self {
            position: Point::default(),
            heading: 0.0,
            pen_down: true,
            color: rgb(0.0, 0.0, 0.0),
            visible: true,
            speed: 3,
            weight: weight.unwrap_or(DEFAULT_PEN_WIDTH),
            fill_path: None,
        }
    }

    pub fn is_filling(&self) -> bool {
        self.fill_path.is_some()
    }
}

pub struct ImmediateSink {
    pen: TurtlePen,
    items: Vec<DisplayItem>,
    published: usize,
    refreshes: usize,
}

impl ImmediateSink {
    pub fn new(pen_width: Option<f32>) -> Self {
        Self {
            pen: TurtlePen::new(pen_width),
            items: Vec::new(),
            published: 0,
            refreshes: 0,
        }
    }

    pub fn pen(&self) -> &TurtlePen {
        &self.pen
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Items a viewer can currently see.
    pub fn published(&self) -> &[DisplayItem] {
        &self.items[..self.published]
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes
    }

    /// Straight strokes in drawing order, as (start, end) pairs.
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::Line { start, end, .. } => Some((*start, *end)),
            DisplayItem::Fill { .. } => None,
        })
    }

    fn set_heading(&mut self, heading: f64) {
        self.pen.heading = heading;
    }

    fn forward(&mut self, distance: f64) {
        let target = advance(self.pen.position, self.pen.heading, distance);
        self.move_pen(target);
    }

    fn move_pen(&mut self, target: Point) {
        if self.pen.pen_down {
            self.items.push(DisplayItem::Line {
                start: self.pen.position,
                end: target,
                color: self.pen.color,
                weight: self.pen.weight,
            });
        }
        if let Some(path) = self.pen.fill_path.as_mut() {
            path.push(target);
        }
        self.pen.position = target;
    }

    pub fn draw(&self, draw: &Draw) {
        for item in self.published() {
            match item {
                DisplayItem::Line {
                    start,
                    end,
                    color,
                    weight,
                } => {
                    draw.line()
                        .start(to_pt2(*start))
                        .end(to_pt2(*end))
                        .color(*color)
                        .stroke_weight(*weight)
                        .caps(LineCap::Round);
                }
                DisplayItem::Fill { points, color } => {
                    draw.polygon()
                        .color(*color)
                        .points(points.iter().map(|p| to_pt2(*p)));
                }
            }
        }

        if self.pen.visible {
            self.draw_cursor(draw);
        }
    }

    // small arrowhead pointing along the heading
    fn draw_cursor(&self, draw: &Draw) {
        let tip = advance(self.pen.position, self.pen.heading, CURSOR_SIZE as f64);
        let left = advance(self.pen.position, self.pen.heading - 140.0, CURSOR_SIZE as f64 * 0.6);
        let right = advance(self.pen.position, self.pen.heading + 140.0, CURSOR_SIZE as f64 * 0.6);
        draw.tri()
            .points(to_pt2(tip), to_pt2(left), to_pt2(right))
            .color(self.pen.color);
    }
}

fn to_pt2(p: Point) -> Point2 {
    pt2(p.x as f32, p.y as f32)
}

fn to_rgb(color: &Color) -> Rgb {
    match color.to_rgb8() {
        Some((r, g, b)) => rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0),
        None => {
            log::warn!("Unsupported color {}, drawing in black", color);
            rgb(0.0, 0.0, 0.0)
        }
    }
}

impl DrawSink for ImmediateSink {
    fn set_speed(&mut self, speed: u32) -> Result<(), SinkError> {
        self.pen.speed = speed;
        Ok(())
    }

    fn set_color(&mut self, color: &Color) -> Result<(), SinkError> {
        self.pen.color = to_rgb(color);
        Ok(())
    }

    fn begin_fill(&mut self) -> Result<(), SinkError> {
        self.pen.fill_path = Some(vec![self.pen.position]);
        Ok(())
    }

    fn end_fill(&mut self) -> Result<(), SinkError> {
        if let Some(points) = self.pen.fill_path.take() {
            if points.len() >= 3 {
                self.items.push(DisplayItem::Fill {
                    points,
                    color: self.pen.color,
                });
            }
        }
        Ok(())
    }

    fn hide(&mut self) -> Result<(), SinkError> {
        self.pen.visible = false;
        Ok(())
    }

    fn set_position(&mut self, to: Point, mode: PenMode) -> Result<(), SinkError> {
        match mode {
            PenMode::Jump => {
                self.pen.pen_down = false;
                self.move_pen(to);
                self.pen.pen_down = true;
            }
            PenMode::KeepDown => self.move_pen(to),
        }
        Ok(())
    }

    fn stroke_to(&mut self, from: Point, to: Point) -> Result<(), SinkError> {
        let (heading, distance) = angle_dist(from, to);
        self.set_heading(heading);
        self.forward(distance);
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), SinkError> {
        self.published = self.items.len();
        self.refreshes += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.refresh()
    }
}
