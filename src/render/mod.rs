// src/render/mod.rs
// Pen backends: the live nannou pen, the code generator and the code replayer

pub mod codegen;
pub mod immediate;
pub mod replay;
pub mod sink;

pub use codegen::{CodeGenSink, DEFAULT_PRECISION};
pub use immediate::{DisplayItem, ImmediateSink, TurtlePen};
pub use replay::replay;
pub use sink::{advance, angle_dist, DrawSink, PenMode};
