pub mod config_load;
pub mod config_types;

pub use config_load::Config;
pub use config_types::{
    BezierKind, CanvasConfig, DrawingConfig, InterleaveAlignment, OutputConfig, RefreshConfig,
    RefreshUnit, TessellationConfig, TraversalConfig, TraversalMode, WindowConfig,
};
