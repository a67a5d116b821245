// src/render/replay.rs
// Reads generated turtle code back and drives any sink with it

use regex::Regex;
use std::sync::OnceLock;

use super::sink::{advance, DrawSink, PenMode};
use crate::error::SinkError;
use crate::models::{Color, Point};

fn call_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\((?P<name>[a-z_]+)(?P<args>(?:\s+(?:"[^"]*"|[^\s()]+))*)\s*\)"#)
            .expect("static replay pattern")
    })
}

/// Pen state the generated code implies. Code never queries the device, so
/// the replayer reconstructs positions itself.
struct ReplayState {
    position: Point,
    heading: f64,
    pen_up: bool,
}

/// Replays generated code into `sink`, returning the number of calls made.
pub fn replay<S: DrawSink>(source: &str, sink: &mut S) -> Result<usize, SinkError> {
    let mut state = ReplayState {
        position: Point::default(),
        heading: 0.0,
        pen_up: false,
    };
    let mut calls = 0;

    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        for caps in call_pattern().captures_iter(line) {
            let name = &caps["name"];
            let args: Vec<&str> = caps["args"].split_whitespace().collect();
            let error = |message: String| SinkError::Replay {
                line: line_no,
                message,
            };
            let number = |i: usize| -> Result<f64, SinkError> {
                args.get(i)
                    .and_then(|s| s.parse::<f64>().ok())
                    .ok_or_else(|| error(format!("({}) expects a number at argument {}", name, i + 1)))
            };

            match name {
                "speed" => {
                    sink.set_speed(number(0)? as u32)?;
                }
                "color" => {
                    let value = caps["args"].trim().trim_matches('"');
                    sink.set_color(&Color::new(value))?;
                }
                "begin_fill" => sink.begin_fill()?,
                "end_fill" => sink.end_fill()?,
                "hideturtle" => sink.hide()?,
                "penup" => {
                    state.pen_up = true;
                    continue;
                }
                "pendown" => {
                    state.pen_up = false;
                    continue;
                }
                "setposition" => {
                    let to = Point::new(number(0)?, number(1)?);
                    let mode = if state.pen_up {
                        PenMode::Jump
                    } else {
                        PenMode::KeepDown
                    };
                    sink.set_position(to, mode)?;
                    state.position = to;
                }
                "setheading" => {
                    state.heading = number(0)?;
                    continue;
                }
                "forward" => {
                    let to = advance(state.position, state.heading, number(0)?);
                    sink.stroke_to(state.position, to)?;
                    state.position = to;
                }
                other => return Err(error(format!("unknown command ({})", other))),
            }
            calls += 1;
        }
    }

    Ok(calls)
}
