//! # Easel
//!
//! A print-and-draw canvas for beginner programs.
//!
//! Callers print colored text and draw points, lines, circles and strings
//! onto a logical canvas; Easel composites both into an opaque RGB frame that
//! a window shell can display or that can be saved as a bitmap.
//!
//! ## Core Concepts
//!
//! - **Color runs**: printed text is kept as spans of one color, wrapped to
//!   the canvas width on every change
//! - **Scrollback-free viewport**: lines that no longer fit are discarded,
//!   text included
//! - **Persistent vector layer**: drawings accumulate on a transparent layer
//!   above the text
//! - **Zoom**: integer nearest-neighbor scaling of displayed frames only
//!
//! ## Example
//!
//! ```rust,no_run
//! use easel::{Canvas, NamedColor};
//!
//! let canvas = Canvas::new();
//! canvas.println("Hello, world!");
//! canvas.color(NamedColor::Red);
//! canvas.circle(250, 250, 100);
//!
//! let frame = canvas.flush();
//! assert_eq!(frame.width(), 500);
//! canvas.save("hello.bmp").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod canvas;
pub mod compositor;
pub mod draw;
pub mod encode;
pub mod error;
pub mod ffi;
pub mod font;
pub mod raster;
pub mod text;

// Re-exports for convenience
pub use actor::{AutoFlusher, FlushCommand, FrameSink};
pub use canvas::{Canvas, CanvasConfig};
pub use draw::VectorSurface;
pub use error::{CanvasError, Result};
pub use font::FontMetrics;
pub use raster::{scale, Frame, NamedColor, Raster, Rgb, Rgba};
pub use text::{ColorRun, FormattedBuffer, PrintBuffer, Segment, TextLayer};
