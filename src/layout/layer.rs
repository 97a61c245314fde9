use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::Offset;

/// The three text layers, in the order they are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Header,
    Title,
    Caption,
}

impl LayerKind {
    /// Drawing order. Later layers paint over earlier ones.
    pub const ALL: [LayerKind; 3] = [LayerKind::Header, LayerKind::Title, LayerKind::Caption];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Title => "title",
            Self::Caption => "caption",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Styling for a single text layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Font size in points
    pub point_size: u32,

    /// Text fill color (any ImageMagick color spec)
    pub fill_color: String,

    /// Outline color
    pub stroke_color: String,

    /// Outline width in pixels; 0 disables the outline pass visually
    pub stroke_width: u32,

    /// Position relative to the overlay gravity anchor
    pub position: Offset,
}

impl LayerStyle {
    pub fn header() -> Self {
        Self {
            point_size: 48,
            fill_color: "white".to_string(),
            stroke_color: "black".to_string(),
            stroke_width: 4,
            position: Offset::new(0, 40),
        }
    }

    pub fn title() -> Self {
        Self {
            point_size: 96,
            fill_color: "#ffd700".to_string(),
            stroke_color: "black".to_string(),
            stroke_width: 8,
            position: Offset::new(0, 320),
        }
    }

    pub fn caption() -> Self {
        Self {
            point_size: 36,
            fill_color: "white".to_string(),
            stroke_color: "black".to_string(),
            stroke_width: 3,
            position: Offset::new(0, 620),
        }
    }

    /// Apply per-invocation overrides on top of this style.
    ///
    /// Values are taken as given; nothing here checks that a color parses
    /// or that a size is sensible.
    pub fn with_overrides(&self, overrides: &StyleOverrides) -> Self {
        Self {
            point_size: overrides.point_size.unwrap_or(self.point_size),
            fill_color: overrides
                .fill_color
                .clone()
                .unwrap_or_else(|| self.fill_color.clone()),
            ..self.clone()
        }
    }
}

/// User-supplied overrides for one layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOverrides {
    pub point_size: Option<u32>,
    pub fill_color: Option<String>,
}

/// Layer defaults for all three text layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerDefaults {
    pub header: LayerStyle,
    pub title: LayerStyle,
    pub caption: LayerStyle,
}

impl Default for LayerDefaults {
    fn default() -> Self {
        Self {
            header: LayerStyle::header(),
            title: LayerStyle::title(),
            caption: LayerStyle::caption(),
        }
    }
}

impl LayerDefaults {
    pub fn get(&self, kind: LayerKind) -> &LayerStyle {
        match kind {
            LayerKind::Header => &self.header,
            LayerKind::Title => &self.title,
            LayerKind::Caption => &self.caption,
        }
    }
}

/// A text layer ready to be turned into command arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayer {
    pub kind: LayerKind,
    pub text: String,
    pub style: LayerStyle,
}
