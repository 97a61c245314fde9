use std::path::Path;

use tracing::{debug, warn};

use crate::{
    command::ExternalCommand,
    config::Config,
    error::RenderWarning,
    layout::{RenderRequest, ResolvedLayer},
};

/// Both external commands for a run, plus anything worth warning about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// Text overlay and resize, always run
    pub overlay: ExternalCommand,

    /// Thumbnail composite preview; only [`CommandBuilder::plan`] fills it
    pub embed: Option<ExternalCommand>,

    pub warnings: Vec<RenderWarning>,
}

pub(crate) fn log_warnings(warnings: &[RenderWarning]) {
    for warning in warnings {
        warn!("{}", warning);
    }
}

/// Translates a [`RenderRequest`] into external tool invocations
pub struct CommandBuilder<'a> {
    config: &'a Config,
}

impl<'a> CommandBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Build every command needed for `request` up front.
    ///
    /// The embed command here is a preview: whether the embed image exists
    /// is only known for certain once the overlay step has run, so
    /// [`CompositionEngine`](crate::composition::CompositionEngine) decides
    /// that again after the overlay succeeds.
    pub fn plan(&self, request: &RenderRequest) -> RenderPlan {
        let mut plan = self.plan_overlay(request);

        let mut embed_warnings = Vec::new();
        plan.embed = self.embed(request, &mut embed_warnings);
        log_warnings(&embed_warnings);
        plan.warnings.extend(embed_warnings);

        plan
    }

    /// Build the overlay step only, leaving `embed` empty.
    ///
    /// Warnings are logged as they come up and collected on the plan.
    pub fn plan_overlay(&self, request: &RenderRequest) -> RenderPlan {
        let mut warnings = Vec::new();

        if !request.has_content() {
            warnings.push(RenderWarning::NothingToDraw);
        }

        let overlay = self.overlay(request, &mut warnings);
        log_warnings(&warnings);

        RenderPlan {
            overlay,
            embed: None,
            warnings,
        }
    }

    /// Text overlay: draw each present layer, then resize to the output
    /// geometry and write the output file.
    pub fn overlay(&self, request: &RenderRequest, warnings: &mut Vec<RenderWarning>) -> ExternalCommand {
        let tool = &self.config.tool;
        let layers = request.resolve_layers(&self.config.layers);

        let mut command = ExternalCommand::new(&tool.program);
        command
            .arg(request.background.display().to_string())
            .option("-gravity", &tool.gravity);

        let font = if layers.is_empty() {
            None
        } else if tool.font_path.is_file() {
            Some(tool.font_path.as_path())
        } else {
            warnings.push(RenderWarning::MissingFont {
                path: tool.font_path.clone(),
            });
            None
        };

        for layer in &layers {
            debug!("Adding {} layer at {}", layer.kind, layer.style.position);
            self.push_layer(&mut command, layer, font);
        }

        command
            .option("-filter", &tool.resize_filter)
            .option("-resize", &tool.output_geometry)
            .arg(request.output.display().to_string());

        command
    }

    /// Stroked pass first, then a fill-only pass on top of it at the same
    /// position. The order matters: the fill must cover the inner half of
    /// the outline.
    fn push_layer(&self, command: &mut ExternalCommand, layer: &ResolvedLayer, font: Option<&Path>) {
        let style = &layer.style;
        let position = style.position.to_string();

        if let Some(font) = font {
            command.option("-font", font.display());
        }

        command
            .option("-pointsize", style.point_size)
            .option("-fill", &style.fill_color)
            .option("-stroke", &style.stroke_color)
            .option("-strokewidth", style.stroke_width)
            .option("-interline-spacing", self.config.tool.interline_spacing)
            .option("-annotate", &position)
            .arg(layer.text.as_str())
            .option("-strokewidth", 0)
            .option("-annotate", &position)
            .arg(layer.text.as_str());
    }

    /// Thumbnail composite onto the already written output.
    ///
    /// Returns `None` when no embed image was asked for, or when it does not
    /// exist (with a warning).
    pub fn embed(&self, request: &RenderRequest, warnings: &mut Vec<RenderWarning>) -> Option<ExternalCommand> {
        let embed_path = request.embed_path()?;

        if !embed_path.is_file() {
            warnings.push(RenderWarning::MissingEmbedImage {
                path: embed_path.to_path_buf(),
            });
            return None;
        }

        let embed = &self.config.embed;
        let output = request.output.display().to_string();

        let mut command = ExternalCommand::new(&self.config.tool.program);
        command
            .arg(output.as_str())
            .arg("(")
            .arg(embed_path.display().to_string())
            .option("-resize", &embed.box_geometry)
            .arg(")")
            .option("-gravity", &embed.gravity)
            .option("-geometry", embed.offset)
            .option("-compose", &embed.blend_mode)
            .arg("-composite")
            .arg(output);

        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    /// Config whose font file exists inside a temp dir
    fn config_with_font() -> (Config, TempDir) {
        let dir = tempdir().unwrap();
        let font = dir.path().join("font.ttf");
        std::fs::write(&font, b"not really a font").unwrap();

        let mut config = Config::default();
        config.tool.font_path = font;
        (config, dir)
    }

    fn config_without_font() -> Config {
        let mut config = Config::default();
        config.tool.font_path = PathBuf::from("/definitely/not/here/font.ttf");
        config
    }

    fn position_of(command: &ExternalCommand, token: &str, from: usize) -> usize {
        command.args()[from..]
            .iter()
            .position(|arg| arg == token)
            .map(|i| i + from)
            .unwrap_or_else(|| panic!("{} not found after {} in {}", token, from, command))
    }

    #[test]
    fn test_empty_request_is_resize_only() {
        let config = config_without_font();
        let request = RenderRequest::new("bg.jpg");
        let mut warnings = Vec::new();

        let command = CommandBuilder::new(&config).overlay(&request, &mut warnings);

        assert_eq!(
            command.args(),
            ["bg.jpg", "-gravity", "North", "-filter", "Lanczos", "-resize", "1280x720!", "output.png"]
        );
        assert!(!command.contains("-annotate"));
        assert!(!command.contains("-font"));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_nothing_to_draw_warning() {
        let config = config_without_font();
        let plan = CommandBuilder::new(&config).plan(&RenderRequest::new("bg.jpg"));

        assert_eq!(plan.warnings, vec![RenderWarning::NothingToDraw]);
        assert!(plan.embed.is_none());
    }

    #[test]
    fn test_overlay_plan_leaves_embed_undecided() {
        let config = config_without_font();
        let request = RenderRequest::new("bg.jpg").with_embed("/no/such/thumb.png");

        let plan = CommandBuilder::new(&config).plan_overlay(&request);
        assert!(plan.embed.is_none());
        assert!(plan.warnings.is_empty());

        let preview = CommandBuilder::new(&config).plan(&request);
        assert_eq!(
            preview.warnings,
            vec![RenderWarning::MissingEmbedImage {
                path: PathBuf::from("/no/such/thumb.png")
            }]
        );
    }

    #[test]
    fn test_header_layer_order() {
        let (config, _dir) = config_with_font();
        let request = RenderRequest::new("bg.jpg").with_header("Hello");
        let mut warnings = Vec::new();

        let command = CommandBuilder::new(&config).overlay(&request, &mut warnings);
        let header = &config.layers.header;
        let font = config.tool.font_path.display().to_string();

        let expected = vec![
            "bg.jpg".to_string(),
            "-gravity".to_string(),
            "North".to_string(),
            "-font".to_string(),
            font,
            "-pointsize".to_string(),
            header.point_size.to_string(),
            "-fill".to_string(),
            header.fill_color.clone(),
            "-stroke".to_string(),
            header.stroke_color.clone(),
            "-strokewidth".to_string(),
            header.stroke_width.to_string(),
            "-interline-spacing".to_string(),
            "-10".to_string(),
            "-annotate".to_string(),
            "+0+40".to_string(),
            "Hello".to_string(),
            "-strokewidth".to_string(),
            "0".to_string(),
            "-annotate".to_string(),
            "+0+40".to_string(),
            "Hello".to_string(),
            "-filter".to_string(),
            "Lanczos".to_string(),
            "-resize".to_string(),
            "1280x720!".to_string(),
            "output.png".to_string(),
        ];

        assert_eq!(command.args(), expected.as_slice());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_font_warns_once_and_omits_flag() {
        let config = config_without_font();
        let request = RenderRequest::new("bg.jpg")
            .with_header("One")
            .with_title("Two")
            .with_caption("Three");
        let mut warnings = Vec::new();

        let command = CommandBuilder::new(&config).overlay(&request, &mut warnings);

        assert!(!command.contains("-font"));
        assert_eq!(command.count("-annotate"), 6);
        assert_eq!(
            warnings,
            vec![RenderWarning::MissingFont {
                path: config.tool.font_path.clone()
            }]
        );
    }

    #[test]
    fn test_layers_drawn_header_title_caption() {
        let (config, _dir) = config_with_font();
        let request = RenderRequest::new("bg.jpg")
            .with_caption("C")
            .with_header("H")
            .with_title("T")
            .with_title_offset(50);

        let command = CommandBuilder::new(&config).overlay(&request, &mut Vec::new());

        let header_at = position_of(&command, "H", 0);
        let title_at = position_of(&command, "T", header_at);
        let caption_at = position_of(&command, "C", title_at);
        assert!(header_at < title_at && title_at < caption_at);

        assert_eq!(command.count("-font"), 3);
        assert_eq!(command.count("+0+370"), 2);
    }

    #[test]
    fn test_overrides_reach_the_command() {
        let config = config_without_font();
        let mut request = RenderRequest::new("bg.jpg").with_title("T");
        request.title_style.point_size = Some(120);
        request.title_style.fill_color = Some("#00ff00".to_string());

        let command = CommandBuilder::new(&config).overlay(&request, &mut Vec::new());
        let size_at = position_of(&command, "-pointsize", 0);

        assert_eq!(command.args()[size_at + 1], "120");
        assert_eq!(command.args()[size_at + 3], "#00ff00");
    }

    #[test]
    fn test_output_path_is_last_token() {
        let config = config_without_font();
        let request = RenderRequest::new("bg.jpg")
            .with_title("T")
            .with_output("out/thumb.png");

        let command = CommandBuilder::new(&config).overlay(&request, &mut Vec::new());
        assert_eq!(command.args().last().map(String::as_str), Some("out/thumb.png"));
    }

    #[test]
    fn test_embed_command_when_image_exists() {
        let dir = tempdir().unwrap();
        let thumb = dir.path().join("thumb.png");
        std::fs::write(&thumb, b"png").unwrap();
        let thumb_str = thumb.display().to_string();

        let config = config_without_font();
        let request = RenderRequest::new("bg.jpg")
            .with_embed(&thumb)
            .with_output("final.png");
        let mut warnings = Vec::new();

        let command = CommandBuilder::new(&config)
            .embed(&request, &mut warnings)
            .expect("embed command");

        assert_eq!(
            command.args(),
            [
                "final.png", "(", thumb_str.as_str(), "-resize", "360x360", ")", "-gravity", "SouthEast",
                "-geometry", "+40+40", "-compose", "Over", "-composite", "final.png",
            ]
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_embed_skipped_when_image_missing() {
        let config = config_without_font();
        let request = RenderRequest::new("bg.jpg").with_embed("/no/such/thumb.png");
        let mut warnings = Vec::new();

        let command = CommandBuilder::new(&config).embed(&request, &mut warnings);

        assert!(command.is_none());
        assert_eq!(
            warnings,
            vec![RenderWarning::MissingEmbedImage {
                path: PathBuf::from("/no/such/thumb.png")
            }]
        );
    }

    #[test]
    fn test_no_embed_requested() {
        let config = config_without_font();
        let mut warnings = Vec::new();
        let command = CommandBuilder::new(&config).embed(&RenderRequest::new("bg.jpg"), &mut warnings);

        assert!(command.is_none());
        assert!(warnings.is_empty());
    }
}
