use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use thumbnail_compositor::{
    composition::CompositionEngine,
    config::Config,
    layout::{RenderRequest, StyleOverrides, DEFAULT_OUTPUT},
    process::SystemRunner,
};

#[derive(Parser)]
#[command(
    name = "thumbnail-compositor",
    version,
    about = "Put text and a thumbnail on top of a background image",
    long_about = "Thumbnail-Compositor draws an outlined header, title and caption onto a background image and optionally embeds a second image, using ImageMagick to do the actual rendering."
)]
struct Cli {
    /// Background image path
    #[arg(required_unless_present = "dump_config")]
    background: Option<PathBuf>,

    /// Header text (top line)
    #[arg(long)]
    header: Option<String>,

    /// Header point size
    #[arg(long)]
    header_size: Option<u32>,

    /// Header fill color
    #[arg(long)]
    header_color: Option<String>,

    /// Title text
    #[arg(long)]
    title: Option<String>,

    /// Title point size
    #[arg(long)]
    title_size: Option<u32>,

    /// Title fill color
    #[arg(long)]
    title_color: Option<String>,

    /// Move the title down (positive) or up (negative) by this many pixels
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    title_offset: i32,

    /// Caption text (bottom line)
    #[arg(long)]
    caption: Option<String>,

    /// Caption point size
    #[arg(long)]
    caption_size: Option<u32>,

    /// Caption fill color
    #[arg(long)]
    caption_color: Option<String>,

    /// Image to embed as a thumbnail
    #[arg(short, long)]
    embed: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Font file for all text layers
    #[arg(long)]
    font: Option<PathBuf>,

    /// ImageMagick program to run (e.g. convert, magick)
    #[arg(long)]
    program: Option<String>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the commands that would run and exit
    #[arg(long)]
    dry_run: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(config_path) => {
                info!("Loading configuration from {:?}", config_path);
                Config::from_file(config_path)
                    .with_context(|| format!("loading {}", config_path.display()))?
            }
            None => Config::default(),
        };

        if let Some(font) = &self.font {
            config.tool.font_path = font.clone();
        }
        if let Some(program) = &self.program {
            config.tool.program = program.clone();
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    fn to_request(&self, background: PathBuf) -> RenderRequest {
        RenderRequest {
            background,
            output: self.output.clone(),
            header: self.header.clone(),
            title: self.title.clone(),
            caption: self.caption.clone(),
            embed: self.embed.clone(),
            header_style: StyleOverrides {
                point_size: self.header_size,
                fill_color: self.header_color.clone(),
            },
            title_style: StyleOverrides {
                point_size: self.title_size,
                fill_color: self.title_color.clone(),
            },
            caption_style: StyleOverrides {
                point_size: self.caption_size,
                fill_color: self.caption_color.clone(),
            },
            title_offset_y: self.title_offset,
        }
    }
}

/// `RUST_LOG` wins when it parses; otherwise `--verbose` picks debug or info
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.load_config()?;

    if cli.dump_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }

    let background = cli
        .background
        .clone()
        .context("a background image is required")?;

    info!("Starting Thumbnail-Compositor v{}", env!("CARGO_PKG_VERSION"));
    info!("Background: {:?}", background);
    info!("Output: {:?}", cli.output);

    let request = cli.to_request(background);
    let engine = CompositionEngine::new(config);

    if cli.dry_run {
        let plan = engine.plan(&request);
        if !SystemRunner::is_available(&engine.config().tool.program).await {
            warn!("{} does not appear to be installed", engine.config().tool.program);
        }
        println!("{}", plan.overlay);
        if let Some(embed) = &plan.embed {
            println!("{}", embed);
        }
        return Ok(());
    }

    match engine.render(&request).await {
        Ok(report) => {
            info!("Composition complete! Output saved to: {:?}", report.output);
            Ok(())
        }
        // Already logged by the engine; this is the final message on stderr
        Err(failure) => Err(anyhow::anyhow!(failure.source.user_message())),
    }
}
