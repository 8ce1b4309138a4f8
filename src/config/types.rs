//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Pen defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Stroke color - a named color or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_pen_color")]
    pub pen_color: ColorSpec,

    /// Stroke width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_thickness")]
    pub thickness: f64,

    /// Tool active at startup
    #[serde(default)]
    pub default_tool: Tool,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            pen_color: default_pen_color(),
            thickness: default_thickness(),
            default_tool: Tool::default(),
        }
    }
}

/// Size and background of the drawing surface.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Surface width in pixels (valid range: 16 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: i32,

    /// Surface height in pixels (valid range: 16 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: i32,

    /// Background fill
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: default_background(),
        }
    }
}

/// Offline asset cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AssetsConfig {
    /// Cache generation; bumping it starts a fresh cache
    #[serde(default = "default_cache_version")]
    pub version: u32,

    /// Cache root override (defaults to the platform cache directory)
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Request paths cached on install
    #[serde(default = "default_assets")]
    pub assets: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            version: default_cache_version(),
            cache_dir: None,
            assets: default_assets(),
        }
    }
}

/// Where rendered drawings are written when no output path is given.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Output directory (defaults to `<pictures>/LowCalorieDraw`)
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// File name template (chrono format specifiers, no extension)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filename_template: default_filename_template(),
        }
    }
}

fn default_pen_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_thickness() -> f64 {
    3.0
}

fn default_canvas_width() -> i32 {
    800
}

fn default_canvas_height() -> i32 {
    600
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_cache_version() -> u32 {
    1
}

pub(crate) fn default_assets() -> Vec<String> {
    [
        "/",
        "/index.html",
        "/style.css",
        "/app.js",
        "/constants.js",
        "/lib/Emitter.js",
        "/lib/point-distance.js",
        "/lib/util.js",
        "/icons/icon.png",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_filename_template() -> String {
    "drawing_%Y-%m-%d_%H%M%S".to_string()
}
