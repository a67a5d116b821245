pub mod color_service;
pub mod svg;

pub use color_service::resolve;
