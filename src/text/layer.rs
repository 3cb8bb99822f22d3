//! Text layer: the print buffer together with its current formatting.
//!
//! The two are always mutated together so a reader never sees a formatted
//! buffer that disagrees with the runs it came from. The canvas keeps one
//! `TextLayer` behind a single lock.

use super::reflow::{reflow, FormattedBuffer, Geometry};
use super::runs::PrintBuffer;
use crate::font::FontMetrics;
use crate::raster::Rgb;

/// Printed text, its layout, and the geometry it was laid out for.
#[derive(Debug, Clone)]
pub struct TextLayer {
    /// Everything printed that still fits.
    buffer: PrintBuffer,
    /// Wrapped form of `buffer`.
    formatted: FormattedBuffer,
    /// Canvas size and cell size.
    geometry: Geometry,
}

impl TextLayer {
    /// Create an empty layer printing in `color`.
    pub fn new(geometry: Geometry, color: Rgb) -> Self {
        Self {
            buffer: PrintBuffer::new(color),
            formatted: FormattedBuffer::default(),
            geometry,
        }
    }

    /// Get the layout geometry.
    #[inline]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Get the glyph cell size.
    #[inline]
    pub const fn metrics(&self) -> FontMetrics {
        self.geometry.metrics
    }

    /// Get the print buffer.
    #[inline]
    pub const fn buffer(&self) -> &PrintBuffer {
        &self.buffer
    }

    /// Get the formatted buffer as of the last reflow.
    #[inline]
    pub const fn formatted(&self) -> &FormattedBuffer {
        &self.formatted
    }

    /// Get the current text color.
    #[inline]
    pub const fn color(&self) -> Rgb {
        self.buffer.color()
    }

    /// Set the color of subsequently printed text.
    pub fn set_color(&mut self, color: Rgb) {
        self.buffer.set_color(color);
    }

    /// Append `text` and reflow.
    pub fn print(&mut self, text: &str) {
        self.buffer.append(text);
        self.reflow();
    }

    /// Remove the last printed grapheme and reflow.
    pub fn backspace(&mut self) -> Option<String> {
        let removed = self.buffer.backspace();
        if removed.is_some() {
            self.reflow();
        }
        removed
    }

    /// Discard all text.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.formatted = FormattedBuffer::default();
    }

    /// Lay the text out for a new canvas size.
    ///
    /// Shrinking can push old lines out of the viewport; they are discarded.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.geometry.width = width;
        self.geometry.height = height;
        self.reflow();
    }

    /// Rebuild the formatted buffer, truncating if needed.
    ///
    /// Returns the number of lines discarded.
    pub fn reflow(&mut self) -> usize {
        let result = reflow(&mut self.buffer, &self.geometry);
        self.formatted = result.formatted;
        result.dropped
    }
}
