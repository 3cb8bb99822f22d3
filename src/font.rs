//! Monospace glyph cells.
//!
//! Every printed character occupies one cell of `char_width` x `char_height`
//! pixels. Glyph shapes come from the 8x8 bitmaps in `font8x8`; a glyph's
//! bottom row holds descenders, so the bitmap is placed with its baseline
//! between rows 6 and 7.

use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS};

/// Side length of a glyph bitmap in pixels.
pub const GLYPH_SIZE: i32 = 8;

/// Rows of a glyph bitmap that sit above the baseline.
const GLYPH_ASCENT: i32 = 7;

/// Geometry of one glyph cell.
///
/// Cell sizes are never zero; [`FontMetrics::new`] is the only constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontMetrics {
    char_width: u32,
    char_height: u32,
    char_ascent: u32,
}

impl FontMetrics {
    /// Create metrics; zero sizes are bumped to 1.
    pub const fn new(char_width: u32, char_height: u32, char_ascent: u32) -> Self {
        Self {
            char_width: if char_width == 0 { 1 } else { char_width },
            char_height: if char_height == 0 { 1 } else { char_height },
            char_ascent,
        }
    }

    /// Horizontal advance per character, in pixels.
    #[inline]
    pub const fn char_width(&self) -> u32 {
        self.char_width
    }

    /// Line height, in pixels.
    #[inline]
    pub const fn char_height(&self) -> u32 {
        self.char_height
    }

    /// Distance from the top of a cell to the baseline, in pixels.
    #[inline]
    pub const fn char_ascent(&self) -> u32 {
        self.char_ascent
    }

    /// Number of whole cells across `width` pixels.
    #[inline]
    pub const fn columns(&self, width: u32) -> u32 {
        width / self.char_width
    }

    /// Number of whole cells down `height` pixels.
    #[inline]
    pub const fn rows(&self, height: u32) -> u32 {
        height / self.char_height
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::new(8, 10, 8)
    }
}

/// Look up the bitmap for a character, if any font block covers it.
pub fn glyph(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| BLOCK_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
}

/// Offsets of the lit pixels of `ch`, relative to the top-left corner of a
/// cell drawn with `metrics`.
pub fn lit_pixels(ch: char, metrics: FontMetrics) -> impl Iterator<Item = (i32, i32)> {
    let top = metrics.char_ascent as i32 - GLYPH_ASCENT;
    let rows = glyph(ch).unwrap_or([0; 8]);
    rows.into_iter().enumerate().flat_map(move |(row, bits)| {
        (0..GLYPH_SIZE)
            .filter(move |col| (bits >> col) & 1 == 1)
            .map(move |col| (col, top + row as i32))
    })
}

/// Render `text` with its top-left corner at `(x, y)`, one cell per
/// grapheme, calling `plot` for every lit pixel.
///
/// Returns the number of cells advanced.
pub fn draw_str(
    text: &str,
    x: i32,
    y: i32,
    metrics: FontMetrics,
    mut plot: impl FnMut(i32, i32),
) -> usize {
    use unicode_segmentation::UnicodeSegmentation;

    let mut cells = 0;
    let mut pen_x = x;
    for grapheme in text.graphemes(true) {
        if let Some(ch) = grapheme.chars().next() {
            for (dx, dy) in lit_pixels(ch, metrics) {
                plot(pen_x + dx, y + dy);
            }
        }
        pen_x = pen_x.saturating_add_unsigned(metrics.char_width);
        cells += 1;
    }
    cells
}
