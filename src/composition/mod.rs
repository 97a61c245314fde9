//! # Composition Engine
//!
//! Sequences the text overlay and thumbnail embed steps and tracks the
//! render state machine.

pub mod engine;

// Re-exports for convenience
pub use engine::{CompositionEngine, RenderEvent, RenderFailure, RenderReport, RenderState};
