//! Raster: a grid of pixels.
//!
//! Pixels are stored contiguously in row-major order. Coordinates are signed
//! so drawing code can hand in off-canvas points and rely on clipping here.

use super::color::{Rgb, Rgba};

/// An opaque RGB image, as produced by the compositor.
pub type Frame = Raster<Rgb>;

/// A grid of pixels.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster<P> {
    /// Contiguous pixel storage (row-major order).
    pixels: Vec<P>,
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
}

impl<P: Copy> Raster<P> {
    /// Create a raster with every pixel set to `fill`.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn filled(width: u32, height: u32, fill: P) -> Self {
        assert!(width > 0 && height > 0, "Raster dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            pixels: vec![fill; size],
            width,
            height,
        }
    }

    /// Wrap existing row-major pixels.
    ///
    /// Returns `None` if the pixel count does not match the dimensions or a
    /// dimension is 0.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<P>) -> Option<Self> {
        let expected = (width as usize).checked_mul(height as usize)?;
        (width > 0 && height > 0 && pixels.len() == expected).then_some(Self {
            pixels,
            width,
            height,
        })
    }

    /// Get the raster width.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the raster height.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the raster is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Get a reference to the underlying pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get the pixel at (x, y).
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<P> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, pixel: P) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.pixels[idx] = pixel;
            true
        } else {
            false
        }
    }

    /// Fill the whole raster.
    pub fn fill(&mut self, pixel: P) {
        self.pixels.fill(pixel);
    }

    /// Fill a rectangular region, clipped to the raster.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, pixel: P) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add_unsigned(width).min(self.width as i32);
        let y1 = y.saturating_add_unsigned(height).min(self.height as i32);
        for row in y0..y1 {
            for col in x0..x1 {
                self.set(col, row, pixel);
            }
        }
    }

    /// Resize the raster, keeping content anchored at the top-left origin.
    ///
    /// Content outside the new bounds is lost; new pixels are set to `pad`.
    pub fn resize(&mut self, new_width: u32, new_height: u32, pad: P) {
        if new_width == self.width && new_height == self.height {
            return;
        }

        let mut resized = Self::filled(new_width, new_height, pad);

        let copy_width = self.width.min(new_width) as usize;
        let copy_height = self.height.min(new_height) as usize;

        for y in 0..copy_height {
            let old_start = y * (self.width as usize);
            let new_start = y * (new_width as usize);
            resized.pixels[new_start..new_start + copy_width]
                .copy_from_slice(&self.pixels[old_start..old_start + copy_width]);
        }

        *self = resized;
    }

    /// Get an iterator over rows, top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[P]> + ExactSizeIterator {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Get a mutable iterator over rows, top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [P]> {
        self.pixels.chunks_exact_mut(self.width as usize)
    }
}

impl Raster<Rgb> {
    /// Source-over composite `layer` onto this frame at the origin.
    ///
    /// Pixels of `layer` outside this frame are ignored.
    pub fn blend_from(&mut self, layer: &Raster<Rgba>) {
        let w = self.width.min(layer.width) as usize;
        for (dst_row, src_row) in self.rows_mut().zip(layer.rows()) {
            for (dst, src) in dst_row[..w].iter_mut().zip(&src_row[..w]) {
                *dst = dst.blend(*src);
            }
        }
    }
}

impl<P> std::fmt::Debug for Raster<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_filled() {
        let raster = Raster::filled(8, 4, Rgb::WHITE);
        assert_eq!(raster.width(), 8);
        assert_eq!(raster.height(), 4);
        assert_eq!(raster.len(), 32);
        assert!(raster.pixels().iter().all(|p| *p == Rgb::WHITE));
    }

    #[test]
    #[should_panic]
    fn test_raster_zero_width() {
        Raster::filled(0, 4, Rgb::BLACK);
    }

    #[test]
    fn test_raster_from_pixels() {
        assert!(Raster::from_pixels(2, 2, vec![Rgb::BLACK; 4]).is_some());
        assert!(Raster::from_pixels(2, 2, vec![Rgb::BLACK; 3]).is_none());
        assert!(Raster::<Rgb>::from_pixels(0, 2, Vec::new()).is_none());
    }

    #[test]
    fn test_raster_bounds() {
        let mut raster = Raster::filled(10, 5, Rgb::BLACK);
        assert!(raster.set(9, 4, Rgb::WHITE));
        assert!(!raster.set(10, 4, Rgb::WHITE));
        assert!(!raster.set(-1, 0, Rgb::WHITE));
        assert_eq!(raster.get(9, 4), Some(Rgb::WHITE));
        assert_eq!(raster.get(0, 5), None);
        assert_eq!(raster.index_of(3, 2), Some(23));
    }

    #[test]
    fn test_raster_fill_rect_clips() {
        let mut raster = Raster::filled(4, 4, 0u8);
        raster.fill_rect(-2, 2, 4, 10, 1);
        assert_eq!(raster.get(0, 2), Some(1));
        assert_eq!(raster.get(1, 3), Some(1));
        assert_eq!(raster.get(2, 2), Some(0));
        assert_eq!(raster.get(0, 1), Some(0));
    }

    #[test]
    fn test_raster_resize_preserves_origin() {
        let mut raster = Raster::filled(4, 4, 0u8);
        raster.set(1, 1, 7);
        raster.set(3, 3, 9);

        raster.resize(6, 5, 2);
        assert_eq!(raster.width(), 6);
        assert_eq!(raster.height(), 5);
        assert_eq!(raster.get(1, 1), Some(7));
        assert_eq!(raster.get(3, 3), Some(9));
        assert_eq!(raster.get(5, 4), Some(2));

        raster.resize(2, 2, 2);
        assert_eq!(raster.get(1, 1), Some(7));
        assert_eq!(raster.get(3, 3), None);
    }

    #[test]
    fn test_raster_rows() {
        let mut raster = Raster::filled(3, 2, 0u8);
        raster.set(2, 1, 5);
        let rows: Vec<&[u8]> = raster.rows().collect();
        assert_eq!(rows, vec![&[0u8, 0, 0][..], &[0u8, 0, 5][..]]);
    }

    #[test]
    fn test_blend_from() {
        let mut frame = Raster::filled(2, 1, Rgb::BLACK);
        let mut layer = Raster::filled(2, 1, Rgba::TRANSPARENT);
        layer.set(1, 0, Rgb::new(255, 0, 0).with_alpha(255));
        frame.blend_from(&layer);
        assert_eq!(frame.get(0, 0), Some(Rgb::BLACK));
        assert_eq!(frame.get(1, 0), Some(Rgb::new(255, 0, 0)));
    }
}
