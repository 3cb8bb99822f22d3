//! Draw: vector primitives on a persistent layer.
//!
//! This module contains:
//! - [`stroke`]: line and circle rasterization
//! - [`VectorSurface`]: the RGBA layer and its pen

pub mod stroke;
mod surface;

pub use surface::VectorSurface;
