//! # Layout Module
//!
//! Describes what goes where: the three text layers (header, title, caption),
//! their styles, and the gravity-relative offsets they are drawn at.
//!
//! ## Usage
//!
//! ```rust
//! use thumbnail_compositor::layout::{LayerDefaults, RenderRequest};
//!
//! let request = RenderRequest::new("background.jpg")
//!     .with_title("Episode 12")
//!     .with_title_offset(50);
//!
//! let layers = request.resolve_layers(&LayerDefaults::default());
//! assert_eq!(layers[0].style.position.to_string(), "+0+370");
//! ```

pub mod layer;
pub mod offset;
pub mod request;

pub use layer::{LayerDefaults, LayerKind, LayerStyle, ResolvedLayer, StyleOverrides};
pub use offset::Offset;
pub use request::{RenderRequest, DEFAULT_OUTPUT};
