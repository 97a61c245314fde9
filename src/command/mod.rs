//! # Command Module
//!
//! Builds ImageMagick invocations as argument arrays. Nothing here launches
//! a process; see [`crate::process`] for that.

pub mod builder;
pub mod external;

pub use builder::{CommandBuilder, RenderPlan};
pub use external::ExternalCommand;
