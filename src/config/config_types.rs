// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 550,
            height: 550,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub padding: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { padding: 20.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BezierKind {
    Cubic,
    Quadratic,
}

impl BezierKind {
    /// Control points needed to flush one segment, including the leading point.
    pub fn required_points(self) -> usize {
        match self {
            BezierKind::Cubic => 4,
            BezierKind::Quadratic => 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TessellationConfig {
    pub step_size: f64,
    pub bezier: BezierKind,
    /// Emit the `t = 1` sample for cubic curves. Quadratic curves always do.
    pub include_endpoint: bool,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            step_size: 0.5,
            bezier: BezierKind::Cubic,
            include_endpoint: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    pub fill_shapes: bool,
    pub draw_boundary: bool,
    pub clip: bool,
    pub pen_width: Option<f32>,
    pub speed: u32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            fill_shapes: false,
            draw_boundary: false,
            clip: true,
            pen_width: Some(1.0),
            speed: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalMode {
    Sequential,
    Interleaved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterleaveAlignment {
    Start,
    End,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    pub mode: TraversalMode,
    pub alignment: InterleaveAlignment,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            mode: TraversalMode::Interleaved,
            alignment: InterleaveAlignment::Start,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshUnit {
    Path,
    Group,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub unit: RefreshUnit,
    pub rate: usize,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            unit: RefreshUnit::Group,
            rate: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "out".to_string(),
            precision: 6,
        }
    }
}
