pub mod document;
pub mod geometry;

pub use document::{Color, Document, Group, Node, PathNode, DEFAULT_FILL};
pub use geometry::{Canvas, Point, Viewport};
