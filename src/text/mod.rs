//! Text: printed output, before and after wrapping.
//!
//! This module contains:
//! - [`PrintBuffer`]: color runs in print order
//! - [`reflow()`]: wrapping and viewport truncation
//! - [`TextLayer`]: both buffers plus geometry, mutated as one unit

mod layer;
mod reflow;
mod runs;

pub use layer::TextLayer;
pub use reflow::{format, reflow, FormattedBuffer, Geometry, Reflow, Segment};
pub use runs::{ColorRun, PrintBuffer};
