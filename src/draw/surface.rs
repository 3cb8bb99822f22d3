//! Vector surface: the persistent drawing layer.
//!
//! Primitives are rasterized immediately into an RGBA layer using the pen
//! state at the time of the call. Untouched pixels stay transparent so the
//! text layer shows through when the two are composited.

use super::stroke;
use crate::font::{self, FontMetrics};
use crate::raster::{Raster, Rgb, Rgba};

/// A transparent RGBA layer plus the pen that draws on it.
#[derive(Debug, Clone)]
pub struct VectorSurface {
    /// Drawn pixels; transparent where nothing was drawn.
    layer: Raster<Rgba>,
    /// Pen color for subsequent primitives.
    color: Rgb,
    /// Pen side length in pixels, at least 1.
    thickness: u32,
    /// Cell size used by `text`.
    metrics: FontMetrics,
}

impl VectorSurface {
    /// Create a fully transparent surface.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u32, height: u32, color: Rgb, thickness: u32, metrics: FontMetrics) -> Self {
        Self {
            layer: Raster::filled(width, height, Rgba::TRANSPARENT),
            color,
            thickness: thickness.max(1),
            metrics,
        }
    }

    /// Get the surface width.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.layer.width()
    }

    /// Get the surface height.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.layer.height()
    }

    /// Get the drawn pixels.
    #[inline]
    pub const fn layer(&self) -> &Raster<Rgba> {
        &self.layer
    }

    /// Get the pen color.
    #[inline]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Set the pen color. Already drawn pixels keep theirs.
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Get the pen thickness.
    #[inline]
    pub const fn thickness(&self) -> u32 {
        self.thickness
    }

    /// Set the pen thickness; 0 is treated as 1.
    pub fn set_thickness(&mut self, thickness: u32) {
        self.thickness = thickness.max(1);
    }

    /// Draw a single pen stamp at `(x, y)`.
    pub fn point(&mut self, x: i32, y: i32) {
        self.line(x, y, x, y);
    }

    /// Draw a line between two points, clipped to the surface.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let pen = Pen::new(self.color, self.thickness);
        let layer = &mut self.layer;
        stroke::line(x0, y0, x1, y1, |x, y| pen.stamp(layer, x, y));
    }

    /// Draw a circle outline of radius `r` around `(x, y)`.
    ///
    /// A radius of 0 draws the same pixels as `point(x, y)`.
    pub fn circle(&mut self, x: i32, y: i32, r: u32) {
        if r == 0 {
            self.point(x, y);
            return;
        }
        let pen = Pen::new(self.color, self.thickness);
        let layer = &mut self.layer;
        stroke::circle(x, y, r, |px, py| pen.stamp(layer, px, py));
    }

    /// Draw `text` with the top-left corner of its first cell at `(x, y)`.
    ///
    /// Glyphs are always one pixel wide regardless of thickness.
    pub fn text(&mut self, x: i32, y: i32, text: &str) {
        let pixel = self.color.with_alpha(u8::MAX);
        let layer = &mut self.layer;
        font::draw_str(text, x, y, self.metrics, |px, py| {
            layer.set(px, py, pixel);
        });
    }

    /// Resize, keeping drawn content anchored at the top-left.
    ///
    /// New area is transparent; content past the new edges is lost.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.layer.resize(width, height, Rgba::TRANSPARENT);
    }

    /// Erase everything.
    pub fn clear(&mut self) {
        self.layer.fill(Rgba::TRANSPARENT);
    }
}

/// Square opaque pen.
#[derive(Debug, Clone, Copy)]
struct Pen {
    pixel: Rgba,
    size: u32,
    offset: i32,
}

impl Pen {
    const fn new(color: Rgb, thickness: u32) -> Self {
        Self {
            pixel: color.with_alpha(u8::MAX),
            size: thickness,
            offset: stroke::pen_offset(thickness),
        }
    }

    #[inline]
    fn stamp(self, layer: &mut Raster<Rgba>, x: i32, y: i32) {
        if self.size == 1 {
            layer.set(x, y, self.pixel);
        } else {
            layer.fill_rect(
                x.saturating_add(self.offset),
                y.saturating_add(self.offset),
                self.size,
                self.size,
                self.pixel,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const RED: Rgb = Rgb::new(255, 0, 0);

    fn surface() -> VectorSurface {
        VectorSurface::new(32, 32, Rgb::WHITE, 1, FontMetrics::default())
    }

    fn drawn(surface: &VectorSurface) -> HashSet<(i32, i32)> {
        let mut set = HashSet::new();
        for y in 0..surface.height() as i32 {
            for x in 0..surface.width() as i32 {
                if surface.layer().get(x, y).is_some_and(|p| !p.is_transparent()) {
                    set.insert((x, y));
                }
            }
        }
        set
    }

    #[test]
    fn test_new_is_transparent() {
        assert!(drawn(&surface()).is_empty());
    }

    #[test]
    fn test_point_sets_one_pixel() {
        let mut s = surface();
        s.point(3, 4);
        assert_eq!(drawn(&s), HashSet::from([(3, 4)]));
        assert_eq!(s.layer().get(3, 4), Some(Rgb::WHITE.with_alpha(255)));
    }

    #[test]
    fn test_thick_point() {
        let mut s = surface();
        s.set_thickness(3);
        s.point(10, 10);
        let pixels = drawn(&s);
        assert_eq!(pixels.len(), 9);
        assert!(pixels.contains(&(9, 9)) && pixels.contains(&(11, 11)));
    }

    #[test]
    fn test_circle_zero_matches_point() {
        for thickness in [1, 2, 5] {
            let mut a = surface();
            let mut b = surface();
            a.set_thickness(thickness);
            b.set_thickness(thickness);
            a.circle(7, 9, 0);
            b.point(7, 9);
            assert_eq!(drawn(&a), drawn(&b), "thickness {thickness}");
        }
    }

    #[test]
    fn test_line_clips() {
        let mut s = surface();
        s.line(-10, 5, 100, 5);
        let pixels = drawn(&s);
        assert_eq!(pixels.len(), 32);
        assert!(pixels.iter().all(|&(_, y)| y == 5));
    }

    #[test]
    fn test_circle_outline() {
        let mut s = surface();
        s.circle(16, 16, 5);
        let pixels = drawn(&s);
        assert!(pixels.contains(&(21, 16)));
        assert!(pixels.contains(&(16, 11)));
        assert!(!pixels.contains(&(16, 16)));
    }

    #[test]
    fn test_color_change_not_retroactive() {
        let mut s = surface();
        s.point(1, 1);
        s.set_color(RED);
        s.point(2, 2);
        assert_eq!(s.layer().get(1, 1).map(Rgba::rgb), Some(Rgb::WHITE));
        assert_eq!(s.layer().get(2, 2).map(Rgba::rgb), Some(RED));
    }

    #[test]
    fn test_text_ignores_thickness() {
        let mut thin = surface();
        let mut thick = surface();
        thick.set_thickness(4);
        thin.text(2, 2, "Hi");
        thick.text(2, 2, "Hi");
        assert!(!drawn(&thin).is_empty());
        assert_eq!(drawn(&thin), drawn(&thick));
    }

    #[test]
    fn test_text_top_left_anchor() {
        let mut s = surface();
        s.text(4, 6, "T");
        let pixels = drawn(&s);
        // Default cell is 8x10 with the baseline 8 px down.
        assert!(pixels.iter().all(|&(x, y)| (4..12).contains(&x) && (6..16).contains(&y)));
        assert!(pixels.iter().any(|&(_, y)| y == 7));
    }

    #[test]
    fn test_resize_preserves_and_pads() {
        let mut s = surface();
        s.point(5, 5);
        s.point(30, 30);
        s.resize(40, 20);
        assert_eq!(s.width(), 40);
        assert_eq!(s.height(), 20);
        assert_eq!(drawn(&s), HashSet::from([(5, 5)]));

        s.resize(64, 64);
        assert_eq!(drawn(&s), HashSet::from([(5, 5)]));
        assert_eq!(s.layer().get(63, 63), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_clear() {
        let mut s = surface();
        s.line(0, 0, 31, 31);
        s.clear();
        assert!(drawn(&s).is_empty());
    }
}
