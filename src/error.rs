// src/error.rs
//
// Error types for every stage of a run

use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration problems, raised before any drawing begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("viewBox translations are not supported (min-x={min_x}, min-y={min_y})")]
    UnsupportedViewport { min_x: f64, min_y: f64 },

    #[error("malformed viewport: {0}")]
    MalformedViewport(String),

    #[error("step size must be in (0, 1], got {0}")]
    InvalidStepSize(f64),

    #[error("canvas {width}x{height} with padding {padding} has no drawable area")]
    InvalidCanvas { width: f64, height: f64, padding: f64 },
}

/// Problems turning an input file into a document tree.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no <svg> root element found")]
    MissingRoot,

    #[error("<svg> root has no viewBox attribute")]
    MissingViewBox,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Structural errors in a path's `d` attribute. Fatal for that path only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathDataError {
    #[error("path has no `d` attribute")]
    MissingData,

    #[error("path data must start with an absolute move, found {0:?}")]
    MissingStart(String),

    #[error("path data has an odd number of coordinate tokens ({0})")]
    OddTokenCount(usize),

    #[error("non-numeric coordinate {0:?}")]
    NonNumeric(String),
}

/// Failures writing to a sink's device or output stream.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("replay line {line}: {message}")]
    Replay { line: usize, message: String },
}

/// Top-level error for a complete run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
