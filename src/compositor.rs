//! Compositor: flatten the text and vector layers into one opaque frame.
//!
//! Nothing is cached between calls. Every frame is rebuilt from the current
//! layer state: background first, then the formatted text cell by cell, then
//! the vector layer blended source-over on top.

use crate::draw::VectorSurface;
use crate::font;
use crate::raster::{Frame, Raster, Rgb};
use crate::text::{Segment, TextLayer};

/// Build the opaque frame for the current state of both layers.
///
/// The frame has the text layer's logical size. A vector layer of a
/// different size is clipped or leaves the uncovered area untouched.
pub fn composite(text: &TextLayer, surface: &VectorSurface, background: Rgb) -> Frame {
    let geometry = text.geometry();
    let mut frame = Raster::filled(geometry.width, geometry.height, background);
    render_text(&mut frame, text);
    frame.blend_from(surface.layer());
    frame
}

/// Draw every fragment at its cell position in its own color.
fn render_text(frame: &mut Frame, text: &TextLayer) {
    let metrics = text.metrics();
    let char_width = i32::try_from(metrics.char_width()).unwrap_or(i32::MAX);
    let char_height = i32::try_from(metrics.char_height()).unwrap_or(i32::MAX);

    let mut column = 0i32;
    let mut row = 0i32;
    for segment in text.formatted().segments() {
        match segment {
            Segment::Fragment { color, text } => {
                let x = column.saturating_mul(char_width);
                let y = row.saturating_mul(char_height);
                let cells = font::draw_str(text, x, y, metrics, |px, py| {
                    frame.set(px, py, *color);
                });
                column = column.saturating_add(i32::try_from(cells).unwrap_or(i32::MAX));
            }
            Segment::HardBreak | Segment::SoftBreak => {
                column = 0;
                row += 1;
            }
        }
    }
}
