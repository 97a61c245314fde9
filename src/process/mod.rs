//! # Process Module
//!
//! Launches external commands one at a time and maps their exit status onto
//! [`CompositorError`](crate::error::CompositorError).

pub mod runner;

pub use runner::{ProcessRunner, SystemRunner};
