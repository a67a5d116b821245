// src/services/svg/mod.rs
pub mod parser;
pub mod path_data;

pub use parser::{load_document, parse_svg};
pub use path_data::{parse_path_data, Command, PathToken};
