//! Canvas: the public drawing API.
//!
//! This module contains:
//! - [`Canvas`]: the thread-safe facade over the text and vector layers
//! - [`CanvasConfig`]: initial size, colors, zoom, pen and font metrics

#[allow(clippy::module_inception)]
mod canvas;
mod config;

pub use canvas::Canvas;
pub use config::CanvasConfig;
