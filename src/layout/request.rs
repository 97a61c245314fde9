use std::path::{Path, PathBuf};

use crate::layout::{LayerDefaults, LayerKind, ResolvedLayer, StyleOverrides};

/// Default output file when none is given
pub const DEFAULT_OUTPUT: &str = "output.png";

/// Everything the user asked for in a single run.
///
/// Built once from command-line input and only read afterwards. The output
/// path is fixed here, before any external command is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub background: PathBuf,
    pub output: PathBuf,
    pub header: Option<String>,
    pub title: Option<String>,
    pub caption: Option<String>,
    pub embed: Option<PathBuf>,
    pub header_style: StyleOverrides,
    pub title_style: StyleOverrides,
    pub caption_style: StyleOverrides,
    /// Added to the configured title Y coordinate
    pub title_offset_y: i32,
}

impl RenderRequest {
    pub fn new<P: Into<PathBuf>>(background: P) -> Self {
        Self {
            background: background.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            header: None,
            title: None,
            caption: None,
            embed: None,
            header_style: StyleOverrides::default(),
            title_style: StyleOverrides::default(),
            caption_style: StyleOverrides::default(),
            title_offset_y: 0,
        }
    }

    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_header<S: Into<String>>(mut self, text: S) -> Self {
        self.header = Some(text.into());
        self
    }

    pub fn with_title<S: Into<String>>(mut self, text: S) -> Self {
        self.title = Some(text.into());
        self
    }

    pub fn with_caption<S: Into<String>>(mut self, text: S) -> Self {
        self.caption = Some(text.into());
        self
    }

    pub fn with_embed<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.embed = Some(path.into());
        self
    }

    pub fn with_title_offset(mut self, dy: i32) -> Self {
        self.title_offset_y = dy;
        self
    }

    pub fn text(&self, kind: LayerKind) -> Option<&str> {
        match kind {
            LayerKind::Header => self.header.as_deref(),
            LayerKind::Title => self.title.as_deref(),
            LayerKind::Caption => self.caption.as_deref(),
        }
    }

    pub fn overrides(&self, kind: LayerKind) -> &StyleOverrides {
        match kind {
            LayerKind::Header => &self.header_style,
            LayerKind::Title => &self.title_style,
            LayerKind::Caption => &self.caption_style,
        }
    }

    pub fn embed_path(&self) -> Option<&Path> {
        self.embed.as_deref()
    }

    /// True when at least one text layer or an embed image was requested
    pub fn has_content(&self) -> bool {
        LayerKind::ALL.iter().any(|kind| self.text(*kind).is_some()) || self.embed.is_some()
    }

    /// Resolve the present text layers against configured defaults, in
    /// drawing order.
    pub fn resolve_layers(&self, defaults: &LayerDefaults) -> Vec<ResolvedLayer> {
        LayerKind::ALL
            .iter()
            .filter_map(|&kind| {
                let text = self.text(kind)?;
                let mut style = defaults.get(kind).with_overrides(self.overrides(kind));
                if kind == LayerKind::Title {
                    style.position = style.position.shifted_y(self.title_offset_y);
                }
                Some(ResolvedLayer {
                    kind,
                    text: text.to_string(),
                    style,
                })
            })
            .collect()
    }
}
