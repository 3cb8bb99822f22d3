//! Zoom: nearest-neighbor integer upscaling for display.
//!
//! Drawing coordinates always live in unscaled canvas space; only the
//! displayed frame grows.

use super::raster::Raster;

/// Largest frame, in pixels, the canvas will produce (8192 x 8192).
pub const MAX_PIXELS: usize = 1 << 26;

/// Pixel count of a `width` x `height` frame zoomed by `factor`.
///
/// Returns `None` if the count overflows or exceeds [`MAX_PIXELS`].
pub fn frame_pixels(width: u32, height: u32, factor: u32) -> Option<usize> {
    let f = factor as usize;
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(f)?
        .checked_mul(f)
        .filter(|&count| count <= MAX_PIXELS)
}

/// Upscale `frame` so each source pixel becomes a `factor` x `factor` block.
///
/// A factor of 1 returns an identical copy. A factor whose output would not
/// fit in [`MAX_PIXELS`] is logged and also returns a copy.
///
/// # Panics
/// Panics if `factor` is 0. Callers validate zoom factors before they get
/// here.
pub fn scale<P: Copy>(frame: &Raster<P>, factor: u32) -> Raster<P> {
    assert!(factor > 0, "zoom factor must be positive");
    if factor == 1 {
        return frame.clone();
    }

    let (Some(capacity), Some(out_width), Some(out_height)) = (
        frame_pixels(frame.width(), frame.height(), factor),
        frame.width().checked_mul(factor),
        frame.height().checked_mul(factor),
    ) else {
        log::error!(
            "zoom: {factor} is out of range for a {}x{} frame",
            frame.width(),
            frame.height()
        );
        return frame.clone();
    };

    let f = factor as usize;
    let row_len = out_width as usize;
    let mut pixels = Vec::with_capacity(capacity);

    for row in frame.rows() {
        let start = pixels.len();
        for &pixel in row {
            pixels.extend(std::iter::repeat(pixel).take(f));
        }
        // Replicate the widened row f - 1 more times.
        for _ in 1..f {
            pixels.extend_from_within(start..start + row_len);
        }
    }

    let scaled = Raster::from_pixels(out_width, out_height, pixels);
    debug_assert!(scaled.is_some());
    scaled.unwrap_or_else(|| frame.clone())
}
