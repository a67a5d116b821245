// src/draw/mod.rs
// Geometry from document space to pen strokes

pub mod bezier;
pub mod interpreter;
pub mod transform;

pub use bezier::BezierTessellator;
pub use interpreter::{Mode, PathInterpreter, PathStats};
pub use transform::CoordinateTransform;
