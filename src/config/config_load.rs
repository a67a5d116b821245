// src/config/config_load.rs
//
// loading of config.toml

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::config_types::*;
use crate::error::ConfigError;
use crate::models::Canvas;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub canvas: CanvasConfig,
    pub tessellation: TessellationConfig,
    pub drawing: DrawingConfig,
    pub traversal: TraversalConfig,
    pub refresh: RefreshConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return exe_config;
        }

        // Fallback to the current working directory, then to defaults
        let local = Path::new("config.toml");
        if local.exists() {
            Self::load_from(local)
        } else {
            log::info!("No config.toml found, using defaults");
            Ok(Self::default())
        }
    }

    fn load_from_exe_dir() -> Option<Result<Self, ConfigError>> {
        let exe_path = std::env::current_exe().ok()?;
        let exe_dir = exe_path.parent()?;
        let config_path = exe_dir.join("config.toml");

        if config_path.exists() {
            Some(Self::load_from(&config_path))
        } else {
            None
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Rejects settings that would make the run meaningless before anything is drawn.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let h = self.tessellation.step_size;
        if !(h > 0.0 && h <= 1.0) {
            return Err(ConfigError::InvalidStepSize(h));
        }
        let canvas = self.canvas();
        if canvas.drawable_width() <= 0.0 || canvas.drawable_height() <= 0.0 {
            return Err(ConfigError::InvalidCanvas {
                width: canvas.width,
                height: canvas.height,
                padding: canvas.padding,
            });
        }
        Ok(())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.window.width as f64,
            height: self.window.height as f64,
            padding: self.canvas.padding,
        }
    }

    pub fn resolve_output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output.directory)
    }
}
