//! # Thumbnail Compositor
//!
//! Put a header, title, caption and a small embedded image on top of a
//! background picture by driving ImageMagick.
//!
//! No pixels are touched in Rust. The library turns a handful of layout
//! parameters into two `convert` invocations (text overlay, then thumbnail
//! embed) and runs them one after the other.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use thumbnail_compositor::{CompositionEngine, Config, RenderRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let request = RenderRequest::new("background.jpg")
//!     .with_header("WEEKLY UPDATE")
//!     .with_title("Episode 12")
//!     .with_embed("guest.png")
//!     .with_output("thumbnail.png");
//!
//! let engine = CompositionEngine::new(Config::default());
//! let report = engine.render(&request).await?;
//! println!("wrote {:?}", report.output);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`layout`] - text layers, styles, offsets and the render request
//! - [`command`] - turns a request into ImageMagick argument lists
//! - [`process`] - launches those commands and checks exit status
//! - [`composition`] - sequences the steps
//! - [`config`] - TOML configuration

pub mod command;
pub mod composition;
pub mod config;
pub mod error;
pub mod layout;
pub mod process;

// Re-export commonly used types for convenience
pub use crate::{
    command::{CommandBuilder, ExternalCommand, RenderPlan},
    composition::{CompositionEngine, RenderFailure, RenderReport, RenderState},
    config::Config,
    error::{CompositorError, RenderWarning, Result},
    layout::{LayerKind, LayerStyle, Offset, RenderRequest},
    process::{ProcessRunner, SystemRunner},
};
