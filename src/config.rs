//! Configuration persistence for snapcam settings

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::Size;

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for TextColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TextColor {
    pub const WHITE: TextColor = TextColor {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            255,
        ]
    }
}

/// Save location for exported photos (Pictures or Documents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
}

/// Fixed display canvas size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

impl From<CanvasSize> for Size {
    fn from(c: CanvasSize) -> Self {
        Size::new(c.width, c.height)
    }
}

/// Text style applied to newly created overlays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub min_scale_factor: f32,
    pub color: TextColor,
    pub shadow: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            min_scale_factor: default_min_scale_factor(),
            color: TextColor::WHITE,
            shadow: false,
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapcamConfig {
    /// Where to save photos (Pictures or Documents folder)
    pub save_location: SaveLocation,
    /// Color for new text overlays
    pub text_color: TextColor,
    /// Whether to draw a shadow behind new text overlays
    pub text_shadow: bool,
    /// Font size for new text overlays, before shrink-to-fit
    pub font_size: f32,
    /// Smallest fraction of `font_size` text may shrink to before wrapping
    pub min_scale_factor: f32,
    /// TrueType/OpenType font used for overlays (None = system lookup)
    pub font_path: Option<PathBuf>,
    /// Display canvas size (None = use the photo's own size)
    pub canvas: Option<CanvasSize>,
}

fn default_font_size() -> f32 {
    30.0
}

fn default_min_scale_factor() -> f32 {
    0.5
}

impl Default for SnapcamConfig {
    fn default() -> Self {
        Self {
            save_location: SaveLocation::Pictures,
            // White text, no shadow
            text_color: TextColor::WHITE,
            text_shadow: false,
            font_size: default_font_size(),
            min_scale_factor: default_min_scale_factor(),
            font_path: None,
            canvas: None,
        }
    }
}

impl SnapcamConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "snapcam";

    /// Path of the config file in the user config dir
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Text style for new overlays
    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font_size: self.font_size,
            min_scale_factor: self.min_scale_factor.clamp(0.0, 1.0),
            color: self.text_color,
            shadow: self.text_shadow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_label_style() {
        let style = SnapcamConfig::default().text_style();
        assert_eq!(style.font_size, 30.0);
        assert_eq!(style.min_scale_factor, 0.5);
        assert_eq!(style.color, TextColor::WHITE);
        assert!(!style.shadow);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = SnapcamConfig {
            save_location: SaveLocation::Documents,
            text_shadow: true,
            canvas: Some(CanvasSize {
                width: 390.0,
                height: 844.0,
            }),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = SnapcamConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "font_size": 24.0 }"#).unwrap();

        let loaded = SnapcamConfig::load_from(&path).unwrap();
        assert_eq!(loaded.font_size, 24.0);
        assert_eq!(loaded.min_scale_factor, 0.5);
        assert_eq!(loaded.save_location, SaveLocation::Pictures);
    }

    #[test]
    fn test_text_color_is_clamped() {
        let color = TextColor::new(2.0, -1.0, 0.5);
        assert_eq!(color.to_rgba_u8(), [255, 0, 128, 255]);
    }
}
