//! Raster module: pixel types and pixel grids.
//!
//! This module contains:
//! - [`Rgb`] / [`Rgba`]: opaque and translucent colors
//! - [`NamedColor`]: the 16-entry palette
//! - [`Raster`]: a row-major pixel grid, and [`Frame`] (an opaque raster)
//! - [`scale`]: nearest-neighbor zoom, capped at [`MAX_PIXELS`] per frame

mod color;
#[allow(clippy::module_inception)]
mod raster;
mod scale;

pub use color::{NamedColor, Rgb, Rgba};
pub use raster::{Frame, Raster};
pub use scale::{frame_pixels, scale, MAX_PIXELS};
