//! Reflow: wrap color runs into lines that fit the canvas.
//!
//! The formatted buffer is rebuilt from scratch on every call. When the
//! formatted lines no longer fit the viewport, the oldest lines are dropped
//! and the print buffer is rewritten from what survived, so discarded text is
//! gone for good.

use super::runs::{ColorRun, PrintBuffer};
use crate::font::FontMetrics;
use crate::raster::Rgb;
use unicode_segmentation::UnicodeSegmentation;

/// Canvas size plus glyph cell size: everything layout depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Glyph cell size.
    pub metrics: FontMetrics,
}

impl Geometry {
    /// Create a new geometry.
    pub const fn new(width: u32, height: u32, metrics: FontMetrics) -> Self {
        Self {
            width,
            height,
            metrics,
        }
    }

    /// Whole glyph cells per line, never less than one.
    #[inline]
    pub const fn columns(&self) -> u32 {
        let columns = self.metrics.columns(self.width);
        if columns == 0 {
            1
        } else {
            columns
        }
    }

    /// Whole glyph rows in the viewport.
    #[inline]
    pub const fn rows(&self) -> u32 {
        self.metrics.rows(self.height)
    }

    /// Whether `lines` line breaks still fit the viewport.
    #[inline]
    const fn fits(&self, lines: usize) -> bool {
        lines * (self.metrics.char_height() as usize) < self.height as usize
    }
}

/// One element of the formatted buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text drawn in one color, never wider than the canvas.
    Fragment {
        /// Foreground color.
        color: Rgb,
        /// The text, without newlines.
        text: String,
    },
    /// Line break from an explicit newline.
    HardBreak,
    /// Line break inserted because a run was wider than the canvas.
    SoftBreak,
}

impl Segment {
    /// Whether this segment ends a line.
    #[inline]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::HardBreak | Self::SoftBreak)
    }

    fn fragment(color: Rgb, text: &str) -> Self {
        Self::Fragment {
            color,
            text: text.to_owned(),
        }
    }
}

/// Print buffer content split into fragments and line breaks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedBuffer {
    segments: Vec<Segment>,
    lines: usize,
}

impl FormattedBuffer {
    /// Get the segments in display order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of line breaks, hard and soft.
    #[inline]
    pub const fn line_breaks(&self) -> usize {
        self.lines
    }

    /// Number of soft breaks.
    pub fn soft_breaks(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::SoftBreak))
            .count()
    }

    /// Whether there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Fragment text concatenated, break markers dropped.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Fragment { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn push_break(&mut self, brk: Segment) {
        debug_assert!(brk.is_break());
        self.segments.push(brk);
        self.lines += 1;
    }

    /// Drop whole lines from the top until the rest fits `geometry`.
    ///
    /// Returns the number of lines dropped.
    fn truncate(&mut self, geometry: &Geometry) -> usize {
        if self.lines == 0 || geometry.fits(self.lines) {
            return 0;
        }

        let mut cut = 0;
        let mut dropped = 0;
        while !geometry.fits(self.lines) {
            // `lines` counts the breaks, so one is always left to find.
            match self.segments[cut..].iter().position(Segment::is_break) {
                Some(offset) => cut += offset + 1,
                None => {
                    cut = self.segments.len();
                    break;
                }
            }
            self.lines -= 1;
            dropped += 1;
        }
        self.segments.drain(..cut);
        dropped
    }
}

/// Split `text` into newline tokens and the text between them.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
        .flat_map(|piece| match piece.strip_suffix('\n') {
            Some(body) => [Some(body), Some("\n")],
            None => [Some(piece), None],
        })
        .flatten()
        .filter(|token| !token.is_empty())
}

/// Split after the first `n` graphemes.
fn split_graphemes(s: &str, n: usize) -> (&str, &str) {
    match s.grapheme_indices(true).nth(n) {
        Some((at, _)) => s.split_at(at),
        None => (s, ""),
    }
}

/// Wrap `runs` to `geometry` without truncating.
pub fn format(runs: &[ColorRun], geometry: &Geometry) -> FormattedBuffer {
    let columns = geometry.columns() as usize;
    let char_width = geometry.metrics.char_width() as usize;
    let width = geometry.width as usize;

    let mut out = FormattedBuffer::default();
    let mut cursor_x = 0usize;

    for run in runs {
        for token in tokens(&run.text) {
            if token == "\n" {
                out.push_break(Segment::HardBreak);
                cursor_x = 0;
                continue;
            }

            let mut rest = token;
            let mut len = rest.graphemes(true).count();
            while char_width * (len + cursor_x) > width {
                let take = columns.saturating_sub(cursor_x);
                let (head, tail) = split_graphemes(rest, take);
                out.segments.push(Segment::fragment(run.color, head));
                out.push_break(Segment::SoftBreak);
                cursor_x = 0;
                rest = tail;
                len = len.saturating_sub(take);
            }
            out.segments.push(Segment::fragment(run.color, rest));
            cursor_x += len;
        }
    }

    out
}

/// Turn surviving formatted content back into color runs.
///
/// Hard breaks become newlines in the preceding run. Soft breaks vanish, so
/// the fragments on either side join up again; a trailing soft break adds
/// nothing. Adjacent fragments merge when their colors match.
fn rebuild(formatted: &FormattedBuffer, color: Rgb) -> PrintBuffer {
    let mut runs: Vec<ColorRun> = Vec::new();
    for segment in &formatted.segments {
        match segment {
            Segment::HardBreak => match runs.last_mut() {
                Some(run) => run.text.push('\n'),
                None => runs.push(ColorRun::new(color, "\n")),
            },
            Segment::SoftBreak => {}
            Segment::Fragment { text, .. } if text.is_empty() => {}
            Segment::Fragment { color: c, text } => match runs.last_mut() {
                Some(run) if run.color == *c => run.text.push_str(text),
                _ => runs.push(ColorRun::new(*c, text.as_str())),
            },
        }
    }
    PrintBuffer::from_runs(runs, color)
}

/// Outcome of a reflow pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflow {
    /// The formatted buffer, already truncated to the viewport.
    pub formatted: FormattedBuffer,
    /// Lines discarded from the top.
    pub dropped: usize,
}

/// Wrap `buffer` to `geometry`, discarding the oldest lines that do not fit.
///
/// When lines are discarded `buffer` is rewritten to hold only the surviving
/// text, and the returned formatting is regenerated from it.
pub fn reflow(buffer: &mut PrintBuffer, geometry: &Geometry) -> Reflow {
    let mut formatted = format(buffer.runs(), geometry);
    let dropped = formatted.truncate(geometry);
    if dropped > 0 {
        *buffer = rebuild(&formatted, buffer.color());
        formatted = format(buffer.runs(), geometry);
        log::debug!(
            "reflow discarded {dropped} line(s); {} break(s) remain",
            formatted.line_breaks()
        );
    }
    Reflow { formatted, dropped }
}
