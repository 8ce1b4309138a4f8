//! Configuration file support.
//!
//! Settings are read from `~/.config/low-calorie-draw/config.toml` (or a path
//! given on the command line). Every field has a default, so a missing file or
//! a partial file is fine.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{AssetsConfig, CanvasConfig, DrawingConfig, ExportConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// pen_color = "blue"
/// thickness = 4.0
/// default_tool = "pen"
///
/// [canvas]
/// width = 1024
/// height = 768
/// background = [255, 250, 240]
///
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
///
/// [assets]
/// version = 2
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub drawing: DrawingConfig,

    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Clamps out-of-range values, logging a warning for each.
    ///
    /// - `drawing.thickness`: 1.0 - 50.0
    /// - `canvas.width`, `canvas.height`: 16 - 8192
    /// - `assets.version`: at least 1
    fn validate_and_clamp(&mut self) {
        if !(1.0..=50.0).contains(&self.drawing.thickness) {
            warn!(
                "Invalid thickness {:.1}, clamping to 1.0-50.0 range",
                self.drawing.thickness
            );
            self.drawing.thickness = if self.drawing.thickness.is_nan() {
                1.0
            } else {
                self.drawing.thickness.clamp(1.0, 50.0)
            };
        }

        for (name, value) in [
            ("width", &mut self.canvas.width),
            ("height", &mut self.canvas.height),
        ] {
            if !(16..=8192).contains(&*value) {
                warn!("Invalid canvas {} {}, clamping to 16-8192 range", name, value);
                *value = (*value).clamp(16, 8192);
            }
        }

        if self.assets.version == 0 {
            warn!("Invalid asset cache version 0, using 1");
            self.assets.version = 1;
        }
    }

    /// Returns the default configuration file path.
    ///
    /// # Errors
    /// Fails if the platform config directory cannot be determined.
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("low-calorie-draw");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads the default configuration file, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Loads and validates the configuration at `path`.
    ///
    /// # Errors
    /// Fails if the file cannot be read or is not valid TOML for this schema.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);
        Ok(config)
    }

    /// Writes the configuration as TOML to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, config_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Tool;
    use tempfile::TempDir;

    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn empty_file_yields_defaults() {
        let (_dir, path) = write_config("");
        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.drawing.thickness, 3.0);
        assert_eq!(config.drawing.default_tool, Tool::Pen);
        assert_eq!((config.canvas.width, config.canvas.height), (800, 600));
        assert_eq!(config.assets.version, 1);
        assert_eq!(config.assets.assets.len(), 9);
        assert_eq!(config.keybindings.undo, vec!["Ctrl+Z".to_string()]);
    }

    #[test]
    fn partial_sections_override_defaults() {
        let (_dir, path) = write_config(
            r#"
[drawing]
pen_color = [0, 0, 255]
default_tool = "eraser"

[keybindings]
redo = ["Ctrl+Shift+Z"]
"#,
        );
        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.drawing.pen_color, ColorSpec::Rgb([0, 0, 255]));
        assert_eq!(config.drawing.default_tool, Tool::Eraser);
        assert_eq!(config.keybindings.redo, vec!["Ctrl+Shift+Z".to_string()]);
        assert_eq!(config.keybindings.undo, vec!["Ctrl+Z".to_string()]);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let (_dir, path) = write_config(
            r#"
[drawing]
thickness = 500.0

[canvas]
width = 4
height = 100000

[assets]
version = 0
"#,
        );
        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.drawing.thickness, 50.0);
        assert_eq!(config.canvas.width, 16);
        assert_eq!(config.canvas.height, 8192);
        assert_eq!(config.assets.version, 1);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let (_dir, path) = write_config("[drawing\nthickness = ");
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.drawing.thickness = 7.5;
        config.canvas.background = ColorSpec::Rgb([10, 20, 30]);

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded.drawing.thickness, 7.5);
        assert_eq!(loaded.canvas.background, ColorSpec::Rgb([10, 20, 30]));
    }

    #[test]
    fn schema_lists_top_level_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        for section in ["drawing", "canvas", "keybindings", "assets", "export"] {
            assert!(schema.contains(section), "schema should mention {section}");
        }
    }
}
