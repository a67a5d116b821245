pub mod draw_controller;

pub use draw_controller::{DrawController, RunSummary};
