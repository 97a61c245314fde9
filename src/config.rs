use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CompositorError, ConfigError, Result},
    layout::{LayerDefaults, LayerKind, LayerStyle, Offset},
};

/// Main configuration for the thumbnail compositor
///
/// Every section falls back to its defaults, so a TOML file only needs to
/// name the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External tool settings shared by both steps
    pub tool: ToolConfig,

    /// Default styles for the text layers
    pub layers: LayerDefaults,

    /// Thumbnail embed settings
    pub embed: EmbedConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into(),
            _ => CompositorError::Io(e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;
        Ok(content)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.tool.validate()?;
        for kind in LayerKind::ALL {
            validate_layer(kind, self.layers.get(kind))?;
        }
        self.embed.validate()?;
        Ok(())
    }
}

fn invalid<K: Into<String>, V: ToString>(key: K, value: V) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.into(),
        value: value.to_string(),
    }
}

fn validate_layer(kind: LayerKind, style: &LayerStyle) -> Result<()> {
    if style.point_size == 0 {
        return Err(invalid(format!("layers.{}.point_size", kind), style.point_size).into());
    }
    Ok(())
}

/// Settings for the external raster tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Program to launch (`convert` for ImageMagick 6, `magick` for 7)
    pub program: String,

    /// Font file used for all text layers, if present on disk
    pub font_path: PathBuf,

    /// Gravity anchor that text offsets are relative to
    pub gravity: String,

    /// Extra spacing between lines of multi-line text
    pub interline_spacing: i32,

    /// Resampling filter for the final resize
    pub resize_filter: String,

    /// Output geometry, e.g. `1280x720!`
    pub output_geometry: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "convert".to_string(),
            font_path: PathBuf::from("fonts/Montserrat-Bold.ttf"),
            gravity: "North".to_string(),
            interline_spacing: -10,
            resize_filter: "Lanczos".to_string(),
            output_geometry: "1280x720!".to_string(),
        }
    }
}

impl ToolConfig {
    fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(invalid("tool.program", &self.program).into());
        }

        if self.output_geometry.trim().is_empty() {
            return Err(invalid("tool.output_geometry", &self.output_geometry).into());
        }

        Ok(())
    }
}

/// Settings for the thumbnail embed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Box the embedded image is resized to fit in
    pub box_geometry: String,

    /// Gravity anchor for the embedded image
    pub gravity: String,

    /// Compose operator used for blending
    pub blend_mode: String,

    /// Offset from the gravity anchor
    pub offset: Offset,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            box_geometry: "360x360".to_string(),
            gravity: "SouthEast".to_string(),
            blend_mode: "Over".to_string(),
            offset: Offset::new(40, 40),
        }
    }
}

impl EmbedConfig {
    fn validate(&self) -> Result<()> {
        if self.box_geometry.trim().is_empty() {
            return Err(invalid("embed.box_geometry", &self.box_geometry).into());
        }
        Ok(())
    }
}
