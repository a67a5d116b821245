// src/lib.rs
pub mod config;
pub mod controllers;
pub mod draw;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod utilities;

pub use error::{Error, Result};
